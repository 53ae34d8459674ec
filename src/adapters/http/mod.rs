pub mod routes;
pub mod state;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::adapters::http::state::HttpState;

pub fn router(state: HttpState) -> Router {
    Router::new()
        .route("/api/state", get(routes::get_app_state))
        .route("/api/summary", get(routes::get_summary))
        .route("/api/sections", get(routes::get_sections))
        .route("/api/products", get(routes::get_products))
        .route("/api/products/:name/thresholds", get(routes::get_thresholds))
        .route("/api/products/:name/thresholds", put(routes::update_thresholds))
        .route("/api/shelf/:camera_id", get(routes::get_shelf_detail))
        .route("/api/shelf/:camera_id/live", get(routes::get_live_view))
        .route("/api/detections", get(routes::get_detections))
        .route("/api/filter", post(routes::set_filter))
        .route("/api/selection", get(routes::get_selection))
        .route("/api/selection", post(routes::set_selection))
        .route("/api/threshold-modal", post(routes::set_threshold_modal))
        .route("/api/user", get(routes::get_user))
        .route("/api/user", post(routes::switch_user))
        .with_state(state)
}
