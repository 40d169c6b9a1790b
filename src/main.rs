//! L1 Cache server
//!
//! Hosts the byte-budgeted cache behind a thin operational HTTP surface.

use std::net::SocketAddr;

use anyhow::Context;
use tokio::signal;
use tokio::task::JoinHandle;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use l1_cache::{api::create_router, spawn_eviction_logger, AppState, Config};

/// Main entry point for the L1 cache server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Create the L1 cache with the configured budget
/// 4. Start the eviction logging task if enabled
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "l1_cache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting L1 cache server");

    let config = Config::from_env();
    info!(
        "Configuration loaded: cache_size_mb={}, port={}, log_evictions={}",
        config.cache_size_mb, config.server_port, config.log_evictions
    );

    let state = AppState::from_config(&config)
        .with_context(|| format!("unable to create L1 cache of {} MB", config.cache_size_mb))?;
    info!("L1 cache initialized with {} bytes", state.cache.max_size_bytes());

    let eviction_handle = config
        .log_evictions
        .then(|| spawn_eviction_logger(state.cache.evict_listener()));

    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("unable to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(eviction_handle))
        .await
        .context("HTTP server failed")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the eviction logging task.
async fn shutdown_signal(eviction_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = eviction_handle {
        handle.abort();
        warn!("Eviction logging task aborted");
    }
}
