//! Monis HTTP API server entry point.

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

use monis_server::config::ServerConfig;
use monis_server::{init_state, routes};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    info!("Starting Monis API server");

    let config = ServerConfig::load()?;
    info!(port = config.http_port, db = %config.database_path.display(), "Configuration loaded");

    let state = init_state(&config).await;
    let app = routes::router(state);

    let bind_addr = format!("0.0.0.0:{}", config.http_port);
    let listener = TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=monis=trace` - Show trace for monis crates only
/// - Default: INFO level
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,monis=debug,sqlx=warn"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolves when Ctrl-C is received.
async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutdown signal received");
}
