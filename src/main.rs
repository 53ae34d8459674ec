use std::sync::{Arc, RwLock};

use tower_http::services::ServeDir;

use shelf_monitor_dashboard::adapters::{
    backend::api_client::ShelfApiClient,
    http::{router, state::HttpState},
    persistence::memory::DiscardThresholdStore,
};
use shelf_monitor_dashboard::application::{
    services::{ShelfService, ThresholdService},
    store::DashboardStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Inicializar logs (RUST_LOG=info por defecto)
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    tracing::info!("🔧 Inicializando adaptadores...");

    // 2. Instanciar Adaptadores (Capa de Infraestructura)
    let api_client = Arc::new(ShelfApiClient::new());
    let threshold_store = Arc::new(DiscardThresholdStore::new());

    // 3. Instanciar Servicios (Capa de Aplicación)
    let shelf_service = ShelfService::new(api_client);
    let threshold_service = Arc::new(ThresholdService::new(threshold_store));

    // 4. Carga única de las tres estanterías. Un fallo deja el dashboard
    //    arriba con la bandera de error genérica, sin reintentos.
    let mut store = DashboardStore::new();
    match shelf_service.load_all().await {
        Ok(shelfs) => {
            store.apply_loaded(shelfs);
            tracing::info!(
                "📦 Estanterías cargadas: {:?} ({} detecciones)",
                store.shelfs().present_cameras(),
                store.detections().len()
            );
        }
        Err(e) => {
            tracing::error!("Fallo al cargar detecciones: {e}");
            store.apply_load_failed();
        }
    }

    // 5. Configurar el Estado de la API y el Router de Axum
    let state = HttpState {
        store: Arc::new(RwLock::new(store)),
        thresholds: threshold_service,
    };
    let app = router(state).fallback_service(ServeDir::new("static"));

    // 6. Lanzar el Servidor
    let port = 8090;
    let addr = format!("0.0.0.0:{}", port);

    tracing::info!("🚀 Dashboard de estanterías en http://{}", addr);
    tracing::info!("📂 Archivos estáticos servidos desde la carpeta './static'");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
