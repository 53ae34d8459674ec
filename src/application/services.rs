use std::sync::Arc;

use crate::{
    application::{
        ports::{ShelfDataPort, ThresholdStorePort},
        store::{ShelfsState, SHELF_CAMERAS},
    },
    domain::{errors::DomainResult, thresholds::ProductThresholds},
};

/// Servicio de carga de estanterías: lanza las tres peticiones en paralelo
/// y espera a que todas terminen. Sin reintentos; un fallo de transporte
/// tumba la carga completa y el llamador marca el error genérico.
#[derive(Clone)]
pub struct ShelfService {
    source: Arc<dyn ShelfDataPort>,
}

impl ShelfService {
    pub fn new(source: Arc<dyn ShelfDataPort>) -> Self {
        Self { source }
    }

    pub async fn load_all(&self) -> DomainResult<ShelfsState> {
        let (s6591, s6371, s6373) = tokio::try_join!(
            self.source.fetch_shelf(SHELF_CAMERAS[0]),
            self.source.fetch_shelf(SHELF_CAMERAS[1]),
            self.source.fetch_shelf(SHELF_CAMERAS[2]),
        )?;

        let mut shelfs = ShelfsState::default();
        shelfs.set(SHELF_CAMERAS[0], s6591);
        shelfs.set(SHELF_CAMERAS[1], s6371);
        shelfs.set(SHELF_CAMERAS[2], s6373);
        Ok(shelfs)
    }
}

/// Servicio del editor de umbrales. La persistencia está detrás de un
/// puerto; el adaptador por defecto descarta al guardar.
#[derive(Clone)]
pub struct ThresholdService {
    store: Arc<dyn ThresholdStorePort>,
}

impl ThresholdService {
    pub fn new(store: Arc<dyn ThresholdStorePort>) -> Self {
        Self { store }
    }

    /// Valores actuales del producto, o los por defecto del editor si
    /// nunca se guardó nada.
    pub async fn thresholds_for(&self, product_name: &str) -> DomainResult<ProductThresholds> {
        Ok(self
            .store
            .load(product_name)
            .await?
            .unwrap_or_default())
    }

    /// Fija los umbrales a [0, 100] y los escribe a través del puerto.
    pub async fn save(
        &self,
        product_name: &str,
        thresholds: ProductThresholds,
    ) -> DomainResult<ProductThresholds> {
        let clamped = thresholds.clamped();
        self.store.save(product_name, clamped).await?;
        Ok(clamped)
    }
}
