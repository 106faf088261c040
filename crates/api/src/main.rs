//! SuitOps Mission Console - Main Entry Point

use api::{init_logging, run_server, ServerConfig};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    info!("=== SuitOps Mission Console v{} ===", env!("CARGO_PKG_VERSION"));
    info!("Starting suit telemetry demo...");

    let config = ServerConfig::load()?;
    run_server(config).await?;

    Ok(())
}
