use async_trait::async_trait;

use crate::domain::{detection::Detection, errors::DomainResult, thresholds::ProductThresholds};

/// Puerto de lectura del backend de visión.
#[async_trait]
pub trait ShelfDataPort: Send + Sync {
    /// Devuelve `None` cuando el backend no tiene detecciones para esa
    /// cámara (estantería ausente, no es un error).
    async fn fetch_shelf(&self, camera_id: &str) -> DomainResult<Option<Vec<Detection>>>;
}

/// Puerto de persistencia de umbrales por producto.
/// El adaptador por defecto descarta al guardar; un backend real se
/// sustituye aquí sin tocar el editor.
#[async_trait]
pub trait ThresholdStorePort: Send + Sync {
    async fn load(&self, product_name: &str) -> DomainResult<Option<ProductThresholds>>;
    async fn save(&self, product_name: &str, thresholds: ProductThresholds) -> DomainResult<()>;
}
