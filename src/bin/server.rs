use std::sync::Arc;

use code_clicker::server::{start_server, AppState, ServerConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let config = ServerConfig::from_env()?;
    info!(host = config.host, port = config.port, "configuration loaded");

    start_server(&config, Arc::new(AppState::new())).await?;
    Ok(())
}
