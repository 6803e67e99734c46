mod application;
mod config;
mod domain;
mod infrastructure;
mod logging;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, Method},
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use application::combiner_service::CombinerService;
use config::AppConfig;
use domain::selection::SelectionSlots;
use infrastructure::axum_handler::{
    combine_handler, download_handler, reset_handler, result_preview_handler, set_format_handler,
    slot_preview_handler, state_handler, upload_data_url_handler, upload_image_handler, AppState,
};
use infrastructure::image_compositor::RasterCompositor;
use infrastructure::image_decoder::RasterDecoder;
use infrastructure::image_exporter::RasterExporter;
use infrastructure::selection_logger::SelectionLogger;

fn build_router(state: Arc<AppState>, config: &AppConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/state", get(state_handler))
        .route("/api/images/:slot", post(upload_image_handler))
        .route("/api/images/:slot/data-url", post(upload_data_url_handler))
        .route("/api/images/:slot/preview", get(slot_preview_handler))
        .route("/api/combine", post(combine_handler))
        .route("/api/result/preview", get(result_preview_handler))
        .route("/api/format", put(set_format_handler))
        .route("/api/download", get(download_handler))
        .route("/api/reset", post(reset_handler))
        .fallback_service(ServeDir::new(&config.static_dir))
        .layer(DefaultBodyLimit::max(config.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load();
    logging::init_logging(&config.logging);

    let combiner_service = CombinerService::new(
        SelectionSlots::with_observer(Arc::new(SelectionLogger)),
        Arc::new(RasterDecoder::new()),
        Arc::new(RasterCompositor::new()),
        Arc::new(RasterExporter::new()),
        config.separator_width,
        config.default_format,
    );
    let state = Arc::new(AppState {
        combiner_service: Arc::new(combiner_service),
    });

    let app = build_router(state, &config);

    tracing::info!(
        addr = %config.bind_addr,
        static_dir = %config.static_dir.display(),
        separator_width = config.separator_width,
        default_format = %config.default_format,
        "Image combiner listening"
    );
    axum::Server::bind(&config.bind_addr)
        .serve(app.into_make_service())
        .await
        .context("server terminated")?;

    Ok(())
}
