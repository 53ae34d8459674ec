use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::application::ports::ThresholdStorePort;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::thresholds::ProductThresholds;

/// Almacén por defecto: registra el guardado y lo descarta. `load`
/// siempre devuelve los valores por defecto del editor.
pub struct DiscardThresholdStore;

impl DiscardThresholdStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DiscardThresholdStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThresholdStorePort for DiscardThresholdStore {
    async fn load(&self, _product_name: &str) -> DomainResult<Option<ProductThresholds>> {
        Ok(None)
    }

    async fn save(
        &self,
        product_name: &str,
        thresholds: ProductThresholds,
    ) -> DomainResult<()> {
        tracing::info!("Umbrales guardados (descartados) para {product_name}: {thresholds:?}");
        Ok(())
    }
}

/// Variante que sí retiene los valores durante la vida del proceso.
/// Útil en tests y como paso previo a un backend real.
pub struct InMemoryThresholdStore {
    entries: RwLock<HashMap<String, ProductThresholds>>,
}

impl InMemoryThresholdStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryThresholdStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ThresholdStorePort for InMemoryThresholdStore {
    async fn load(&self, product_name: &str) -> DomainResult<Option<ProductThresholds>> {
        let entries = self
            .entries
            .read()
            .map_err(|_| DomainError::OperationFailed("lock de umbrales envenenado".into()))?;
        Ok(entries.get(product_name).copied())
    }

    async fn save(
        &self,
        product_name: &str,
        thresholds: ProductThresholds,
    ) -> DomainResult<()> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| DomainError::OperationFailed("lock de umbrales envenenado".into()))?;
        entries.insert(product_name.to_string(), thresholds);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::thresholds::ThresholdSettings;

    #[tokio::test]
    async fn discard_store_forgets_on_save() {
        let store = DiscardThresholdStore::new();
        store
            .save("Maçã Gala", ProductThresholds::default())
            .await
            .unwrap();
        assert!(store.load("Maçã Gala").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn in_memory_store_round_trips() {
        let store = InMemoryThresholdStore::new();
        let mut t = ProductThresholds::default();
        t.stock = ThresholdSettings::new(90.0, 50.0, 10.0);
        store.save("Banana", t).await.unwrap();
        let loaded = store.load("Banana").await.unwrap().unwrap();
        assert_eq!(loaded.stock.good, 90.0);
        assert!(store.load("Pera").await.unwrap().is_none());
    }
}
