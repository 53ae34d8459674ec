use serde::{Deserialize, Serialize};

use crate::{
    application::{
        aggregate::{GlobalSummary, ProductSummary, ScoreBand, SectionSummary},
        store::FilterKind,
    },
    domain::{detection::Detection, thresholds::ProductThresholds, user::Role},
};

#[derive(Debug, Clone, Serialize)]
pub struct SummaryResponse {
    pub filter: FilterKind,
    pub summary: GlobalSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionsResponse {
    pub sections: Vec<SectionSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductsResponse {
    pub products: Vec<ProductSummary>,
}

/// Una casilla de la grelha, ya en orden de lectura.
#[derive(Debug, Clone, Serialize)]
pub struct GridSlot {
    pub band: ScoreBand,
    #[serde(flatten)]
    pub detection: Detection,
}

/// Entrada del ranking de alertas de la barra lateral.
#[derive(Debug, Clone, Serialize)]
pub struct AlertEntry {
    pub band: ScoreBand,
    pub band_label: &'static str,
    #[serde(flatten)]
    pub detection: Detection,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShelfDetailResponse {
    pub camera_id: String,
    pub grid: Vec<GridSlot>,
    pub alerts: Vec<AlertEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LiveViewResponse {
    pub camera_id: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetectionsResponse {
    pub filter: FilterKind,
    pub detections: Vec<Detection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetFilterRequest {
    pub filter: FilterKind,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SwitchUserRequest {
    pub role: Role,
}

/// Selección de casilla en la grelha; `None` limpia la selección.
#[derive(Debug, Clone, Deserialize)]
pub struct SelectSlotRequest {
    pub roi_id: Option<String>,
}

/// Apertura/cierre del editor de umbrales; `None` lo cierra.
#[derive(Debug, Clone, Deserialize)]
pub struct ThresholdModalRequest {
    pub product_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AppStateResponse {
    pub loading: bool,
    pub error: Option<String>,
    pub shelves: Vec<&'static str>,
    pub detection_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ThresholdsResponse {
    pub product_name: String,
    pub thresholds: ProductThresholds,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateThresholdsRequest {
    #[serde(flatten)]
    pub thresholds: ProductThresholds,
}

#[derive(Debug, Clone, Serialize)]
pub struct OkResponse {
    pub ok: bool,
}
