use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::adapters::http::state::HttpState;
use crate::application::store::SHELF_CAMERAS;
use crate::application::{
    aggregate::{
        alert_ranking, global_summary, grid_order, product_summaries, score_band,
        section_summaries,
    },
    dto::{
        AlertEntry, AppStateResponse, DetectionsResponse, GridSlot, LiveViewResponse, OkResponse,
        ProductsResponse, SectionsResponse, SelectSlotRequest, SetFilterRequest,
        ShelfDetailResponse, SummaryResponse, SwitchUserRequest, ThresholdModalRequest,
        ThresholdsResponse, UpdateThresholdsRequest,
    },
};

// Los guards cortos sobre el RwLock solo fallan si un handler anterior
// entró en pánico con el lock tomado.
macro_rules! read_store {
    ($st:expr) => {
        match $st.store.read() {
            Ok(guard) => guard,
            Err(_) => {
                return (StatusCode::INTERNAL_SERVER_ERROR, "estado del dashboard no disponible")
                    .into_response()
            }
        }
    };
}

macro_rules! write_store {
    ($st:expr) => {
        match $st.store.write() {
            Ok(guard) => guard,
            Err(_) => {
                return (StatusCode::INTERNAL_SERVER_ERROR, "estado del dashboard no disponible")
                    .into_response()
            }
        }
    };
}

pub async fn get_app_state(State(st): State<HttpState>) -> impl IntoResponse {
    let store = read_store!(st);
    Json(AppStateResponse {
        loading: store.loading(),
        error: store.error().map(str::to_string),
        shelves: store.shelfs().present_cameras(),
        detection_count: store.detections().len(),
    })
    .into_response()
}

pub async fn get_summary(State(st): State<HttpState>) -> impl IntoResponse {
    let store = read_store!(st);
    let view = store.filtered_detections();
    Json(SummaryResponse {
        filter: store.current_filter(),
        summary: global_summary(&view),
    })
    .into_response()
}

pub async fn get_sections(State(st): State<HttpState>) -> impl IntoResponse {
    let store = read_store!(st);
    let view = store.filtered_detections();
    Json(SectionsResponse {
        sections: section_summaries(&view),
    })
    .into_response()
}

pub async fn get_products(State(st): State<HttpState>) -> impl IntoResponse {
    let store = read_store!(st);
    let view = store.filtered_detections();
    Json(ProductsResponse {
        products: product_summaries(&view),
    })
    .into_response()
}

/// Detalle de estantería: la ruta acepta el identificador de cámara, de
/// ROI o de producto indistintamente.
pub async fn get_shelf_detail(
    State(st): State<HttpState>,
    Path(camera_id): Path<String>,
) -> impl IntoResponse {
    let store = read_store!(st);
    let view = store.filtered_detections();
    let shelf: Vec<_> = view
        .iter()
        .filter(|d| {
            d.camera_id == camera_id || d.roi_id == camera_id || d.product_id == camera_id
        })
        .cloned()
        .collect();

    if shelf.is_empty() {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": format!("There are no shelf detections for ID: {camera_id}")
            })),
        )
            .into_response();
    }

    let grid = grid_order(&shelf)
        .into_iter()
        .map(|d| GridSlot {
            band: score_band(d.score),
            detection: d,
        })
        .collect();
    let alerts = alert_ranking(&shelf)
        .into_iter()
        .map(|d| {
            let band = score_band(d.score);
            AlertEntry {
                band,
                band_label: band.label(),
                detection: d,
            }
        })
        .collect();

    Json(ShelfDetailResponse {
        camera_id,
        grid,
        alerts,
    })
    .into_response()
}

/// La imagen en directo la sirve `ServeDir`; aquí solo se resuelve la URL,
/// y solo para las cámaras fijas del piloto.
pub async fn get_live_view(Path(camera_id): Path<String>) -> impl IntoResponse {
    if !SHELF_CAMERAS.contains(&camera_id.as_str()) {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": format!("Cámara desconocida: {camera_id}") })),
        )
            .into_response();
    }
    Json(LiveViewResponse {
        image_url: format!("/media/{camera_id}.jpg"),
        camera_id,
    })
    .into_response()
}

pub async fn get_detections(State(st): State<HttpState>) -> impl IntoResponse {
    let store = read_store!(st);
    Json(DetectionsResponse {
        filter: store.current_filter(),
        detections: store.filtered_detections(),
    })
    .into_response()
}

pub async fn set_filter(
    State(st): State<HttpState>,
    Json(req): Json<SetFilterRequest>,
) -> impl IntoResponse {
    let mut store = write_store!(st);
    store.set_filter(req.filter);
    Json(OkResponse { ok: true }).into_response()
}

pub async fn get_selection(State(st): State<HttpState>) -> impl IntoResponse {
    let store = read_store!(st);
    Json(store.selected_slot().cloned()).into_response()
}

/// Selecciona la casilla por `roi_id` dentro de la lista combinada;
/// `roi_id: null` limpia la selección.
pub async fn set_selection(
    State(st): State<HttpState>,
    Json(req): Json<SelectSlotRequest>,
) -> impl IntoResponse {
    let mut store = write_store!(st);
    match req.roi_id {
        None => {
            store.set_selected_slot(None);
            Json(OkResponse { ok: true }).into_response()
        }
        Some(roi_id) => {
            let slot = store
                .detections()
                .iter()
                .find(|d| d.roi_id == roi_id)
                .cloned();
            match slot {
                Some(d) => {
                    store.set_selected_slot(Some(d));
                    Json(OkResponse { ok: true }).into_response()
                }
                None => (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "error": format!("roi_id desconocido: {roi_id}") })),
                )
                    .into_response(),
            }
        }
    }
}

pub async fn set_threshold_modal(
    State(st): State<HttpState>,
    Json(req): Json<ThresholdModalRequest>,
) -> impl IntoResponse {
    let mut store = write_store!(st);
    match req.product_name {
        Some(product) => store.open_threshold_modal(product),
        None => store.close_threshold_modal(),
    }
    Json(OkResponse { ok: true }).into_response()
}

pub async fn get_user(State(st): State<HttpState>) -> impl IntoResponse {
    let store = read_store!(st);
    Json(store.current_user().clone()).into_response()
}

/// Cambio de rol sin autenticación: transición local, igual que la UI.
pub async fn switch_user(
    State(st): State<HttpState>,
    Json(req): Json<SwitchUserRequest>,
) -> impl IntoResponse {
    let mut store = write_store!(st);
    store.switch_user(req.role);
    Json(store.current_user().clone()).into_response()
}

pub async fn get_thresholds(
    State(st): State<HttpState>,
    Path(name): Path<String>,
) -> impl IntoResponse {
    match st.thresholds.thresholds_for(&name).await {
        Ok(thresholds) => Json(ThresholdsResponse {
            product_name: name,
            thresholds,
        })
        .into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

pub async fn update_thresholds(
    State(st): State<HttpState>,
    Path(name): Path<String>,
    Json(req): Json<UpdateThresholdsRequest>,
) -> impl IntoResponse {
    match st.thresholds.save(&name, req.thresholds).await {
        Ok(saved) => Json(ThresholdsResponse {
            product_name: name,
            thresholds: saved,
        })
        .into_response(),
        Err(e) => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": e.to_string() })),
        )
            .into_response(),
    }
}
