//! Save/load HTTP service.
//!
//! A single-tenant, in-memory store for `GameState` snapshots. There is no
//! authentication and no persistence beyond the process lifetime.

pub mod config;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

pub use config::{ConfigError, ServerConfig};
pub use error::{ApiError, ServerError};
pub use router::build_router;
pub use state::AppState;

/// Bind to the configured address and serve until Ctrl-C.
///
/// # Errors
///
/// Returns [`ServerError`] if the listener cannot bind or serving fails.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let router = build_router(state);
    let listener = bind(config).await?;

    match listener.local_addr() {
        Ok(addr) => info!(%addr, "Code Clicker API listening"),
        Err(_) => info!(host = %config.host, port = config.port, "Code Clicker API listening"),
    }

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ServerError::Serve(format!("{e}")))?;

    info!("Code Clicker API stopped");
    Ok(())
}

/// Open the listener. Host names such as `localhost` are resolved.
async fn bind(config: &ServerConfig) -> Result<TcpListener, ServerError> {
    TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|e| ServerError::Bind(format!("bind failed on {}:{}: {e}", config.host, config.port)))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until killed.
        std::future::pending::<()>().await;
    }
}
