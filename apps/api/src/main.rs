//! # Tally API
//!
//! Entry point: tracing, configuration, database, then the HTTP server.
//!
//! ## Lifecycle
//! ```text
//! load config ──► open pool (+migrations) ──► bind ──► serve
//!                                                        │
//!                                         Ctrl+C / SIGTERM
//!                                                        ▼
//!                                       drain requests ──► close pool
//! ```

use anyhow::Context;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use tally_api::{router, ApiConfig, AppState};
use tally_db::Database;

const DEFAULT_LOG_FILTER: &str = "info,tally=debug,sqlx=warn,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .with_target(true)
        .init();

    info!("Starting Tally API server...");

    // Load configuration
    let config = ApiConfig::load()?;
    info!(
        addr = %config.bind_address(),
        database = %config.database_path,
        max_connections = config.db_max_connections,
        "Configuration loaded"
    );

    // Open the pool; migrations run on connect
    let db = Database::new(config.db_config())
        .await
        .context("failed to open database")?;

    let app = router(AppState::new(db.clone()));

    let addr = config.bind_address();
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!(%addr, "Listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    db.close().await;

    served.context("server error")?;
    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, starting graceful shutdown...");
}
