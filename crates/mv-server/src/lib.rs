//! mv-server: HTTP delivery of media assets with byte-range support.
//!
//! This crate ties the mv-* crates together into a running server:
//!
//! - [`resolver`] looks up a media record per request,
//! - [`streaming`] plans the range response and streams bytes from the
//!   filesystem or from a legacy inline buffer,
//! - [`router`] wires the routes, request-id middleware, CORS and tracing.

pub mod context;
pub mod error;
pub mod middleware;
pub mod resolver;
pub mod router;
pub mod routes;
pub mod streaming;

use std::net::SocketAddr;

use mv_core::config::Config;

use crate::context::AppContext;

/// Start the mediavault server.
///
/// Opens the metadata database, builds the [`AppContext`] and serves HTTP
/// until a shutdown signal is received.
pub async fn start(config: Config) -> mv_core::Result<()> {
    for warning in config.validate() {
        tracing::warn!("Config warning: {warning}");
    }

    let db_path = &config.server.db_path;
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
            tracing::info!("Created database directory {}", parent.display());
        }
    }
    let db_str = db_path.to_string_lossy();
    let db = mv_db::pool::init_pool(&db_str)?;
    tracing::info!("Database opened at {db_str}");
    tracing::info!(
        "Serving media files from {}",
        config.storage.media_dir.display()
    );

    let ctx = AppContext::new(&config, db);
    let app = router::build_router(ctx);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .map_err(|e| mv_core::Error::Internal(format!("Invalid server address: {e}")))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| mv_core::Error::Internal(format!("Failed to bind to {addr}: {e}")))?;

    tracing::info!("Starting server on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for a shutdown signal (SIGINT or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {e}");
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
                tracing::error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }

    tracing::info!("Shutdown signal received");
}
