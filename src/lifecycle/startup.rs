//! Startup orchestration.
//!
//! # Responsibilities
//! - Choose the execution model: a fixed worker pool or a single thread
//! - Dump the configuration in debug mode
//! - Start the metrics exporter when configured
//! - Bind the listener, then serve until a termination signal
//!
//! Any failure before the listener is bound aborts startup; nothing is
//! retried.

use std::io;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::runtime::{Builder, Runtime};

use crate::config::ServerConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::net::{self, ListenerError};
use crate::observability::metrics;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("{0}")]
    Listener(#[from] ListenerError),

    #[error("Failed to start metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Build the runtime that serves requests.
///
/// With a positive worker count, connections are spread over exactly that
/// many threads. With zero, everything runs on the calling thread.
pub fn build_runtime(config: &ServerConfig) -> io::Result<Runtime> {
    if config.is_pooled() {
        Builder::new_multi_thread()
            .worker_threads(config.worker_count)
            .thread_name("sqlgate-worker")
            .enable_all()
            .build()
    } else {
        Builder::new_current_thread().enable_all().build()
    }
}

/// Log the full configuration (no-op unless debug logging is on).
pub fn log_configuration(config: &ServerConfig) {
    tracing::info!("Configuration:");
    tracing::info!("Version: {}", config.version);
    tracing::info!("Port: {}", config.port);
    tracing::info!("Backlog: {}", config.backlog);
    tracing::info!("Thread Pool Size: {}", config.worker_count);
    tracing::info!("Debug Mode: {}", config.debug);
    tracing::info!("GET App active: {}", config.get_enabled);
    match serde_json::to_string(config) {
        Ok(json) => tracing::debug!(config = %json, "Configuration loaded"),
        Err(e) => tracing::warn!(error = %e, "Could not serialize configuration"),
    }
}

/// Bind and serve until a termination signal arrives.
pub async fn serve(config: ServerConfig) -> Result<(), StartupError> {
    if let Some(addr) = config.metrics_address {
        metrics::init_metrics(addr)?;
    }

    let listener = net::bind(&config).await?;
    let local_addr = listener.local_addr()?;

    if config.is_pooled() {
        tracing::info!(threads = config.worker_count, "Thread pool set");
    } else {
        tracing::info!("Running in synchronous mode (no thread pool)");
    }

    tracing::info!(address = %local_addr, "Server is listening");
    println!("Server is listening on http://localhost:{}", local_addr.port());

    let shutdown = Shutdown::new();
    let signal = shutdown.subscribe();
    let signal_task = tokio::spawn(async move {
        signals::trigger_on_signal(&shutdown).await;
    });

    let result = HttpServer::new(config).run(listener, signal).await;
    signal_task.abort();
    result.map_err(StartupError::from)
}
