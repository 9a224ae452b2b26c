//! Room Telemetry Server - Main Entry Point

use api::{init_logging, run_server, Settings};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let settings = Settings::load()?;
    info!("=== Room Telemetry v{} ===", env!("CARGO_PKG_VERSION"));

    run_server(settings).await
}
