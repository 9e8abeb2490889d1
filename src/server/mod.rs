//! HTTP front door.
//!
//! - `POST /upload`: multipart field `file`, answers with the PDF
//! - `POST /html`: same input, answers with the rendered HTML
//! - `GET /health`, `GET /languages`
//!
//! Errors are returned as `{"error": <kind>, "message": <text>}`.

pub mod error;
pub mod routes;

use crate::config::AppConfig;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Request},
    http::{Method, header},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{Any, CorsLayer};
use transform2pdf_core::ConversionPipeline;

pub use error::ServerError;

/// Shared application state accessible to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: ConversionPipeline,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(pipeline: ConversionPipeline, config: AppConfig) -> Self {
        Self {
            pipeline,
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/upload", post(routes::upload))
        .route("/html", post(routes::html))
        .route("/health", get(routes::health))
        .route("/languages", get(routes::languages))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes()))
        .layer(middleware::from_fn(log_requests));

    if state.config.enable_cors {
        router = router.layer(cors_layer());
    }
    router.with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} -> {} ({:.2?})",
        method,
        path,
        response.status().as_u16(),
        start.elapsed()
    );
    response
}

/// Starts the server and runs until Ctrl+C.
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(&config.upload_dir).await?;
    let pipeline = crate::build_pipeline(&config)?;

    let addr = config.socket_addr();
    let state = AppState::new(pipeline, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("transform2pdf listening on {}", addr);
    log::info!("Endpoints:");
    log::info!("  - POST /upload");
    log::info!("  - POST /html");
    log::info!("  - GET  /health");
    log::info!("  - GET  /languages");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutdown signal received.");
}
