//! Room Telemetry API Server
//!
//! REST API server for the room sensor dashboard.

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use std::time::Instant;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod error;
mod routes;
mod settings;

pub use error::ApiError;
pub use settings::Settings;

use storage::Repository;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Storage repository
    pub repository: Repository,
    /// Start time
    pub started_at: Instant,
}

impl AppState {
    /// Create new application state around a connected repository
    pub fn new(repository: Repository) -> Self {
        Self {
            repository,
            started_at: Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub readings_stored: i64,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/sensors",
            get(routes::sensors::get_readings).post(routes::sensors::record_reading),
        )
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let readings_stored = state.repository.count().await.unwrap_or(0);

    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        readings_stored,
    })
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Connect storage and run the server until shutdown
pub async fn run_server(settings: Settings) -> anyhow::Result<()> {
    let repository = Repository::connect(&settings.storage).await?;
    let state = AppState::new(repository);
    let app = create_router(state);

    let addr = settings.bind_addr();
    info!("Starting API server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
