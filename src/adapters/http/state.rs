use std::sync::{Arc, RwLock};

use crate::application::{services::ThresholdService, store::DashboardStore};

/// Estado compartido para los manejadores HTTP de Axum.
/// El store es el dueño único del estado del dashboard; los handlers toman
/// guards cortos y corren hasta completarse.
#[derive(Clone)]
pub struct HttpState {
    pub store: Arc<RwLock<DashboardStore>>,
    pub thresholds: Arc<ThresholdService>,
}
