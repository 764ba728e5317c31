//! TCP listener setup.
//!
//! # Responsibilities
//! - Bind to the configured port on all interfaces
//! - Apply the configured kernel backlog
//! - Report the address actually bound (port 0 picks a free port)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::{TcpListener, TcpSocket};

use crate::config::ServerConfig;

/// Backlog used when the configuration leaves it at 0.
pub const DEFAULT_BACKLOG: u32 = 1024;

/// Error type for listener operations.
#[derive(Debug, Error)]
pub enum ListenerError {
    /// Failed to create or bind the socket.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    /// Failed to start listening.
    #[error("Failed to listen on {addr}: {source}")]
    Listen {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Effective backlog for a configured value.
pub fn effective_backlog(configured: u32) -> u32 {
    if configured == 0 {
        DEFAULT_BACKLOG
    } else {
        configured
    }
}

/// Bind a listener for `config`. Must be called from within a Tokio runtime.
pub async fn bind(config: &ServerConfig) -> Result<TcpListener, ListenerError> {
    bind_addr(config.bind_address(), config.backlog).await
}

/// Bind a listener on an explicit address with the given backlog.
pub async fn bind_addr(addr: SocketAddr, backlog: u32) -> Result<TcpListener, ListenerError> {
    let bind_err = |source: std::io::Error| ListenerError::Bind { addr, source };

    let socket = if addr.is_ipv4() {
        TcpSocket::new_v4()
    } else {
        TcpSocket::new_v6()
    }
    .map_err(bind_err)?;

    socket.set_reuseaddr(true).map_err(bind_err)?;
    socket.bind(addr).map_err(bind_err)?;

    let backlog = effective_backlog(backlog);
    let listener = socket
        .listen(backlog)
        .map_err(|source| ListenerError::Listen { addr, source })?;

    tracing::info!(
        address = %listener.local_addr().unwrap_or(addr),
        backlog,
        "Listener bound"
    );

    Ok(listener)
}
