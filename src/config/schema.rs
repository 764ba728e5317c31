//! Configuration schema definitions.
//!
//! `ServerConfig` is built once from the command line and never mutated
//! afterwards; it is shared read-only (behind an `Arc`) by every request.

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Serialize;

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8641;

/// Root configuration for the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServerConfig {
    /// TCP port to listen on (0 lets the OS pick one).
    pub port: u16,

    /// Kernel backlog for pending connections (0 = platform default).
    pub backlog: u32,

    /// Worker threads serving requests (0 = synchronous, single thread).
    pub worker_count: usize,

    /// Enables logging and the startup configuration dump.
    pub debug: bool,

    /// Whether GET requests receive the status page.
    pub get_enabled: bool,

    /// Reported service version.
    pub version: String,

    /// Status page template on disk; the built-in page is used when unset.
    pub template_path: Option<PathBuf>,

    /// Address of the Prometheus exporter, if any.
    pub metrics_address: Option<SocketAddr>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            backlog: 0,
            worker_count: 0,
            debug: false,
            get_enabled: true,
            version: env!("CARGO_PKG_VERSION").to_string(),
            template_path: None,
            metrics_address: None,
        }
    }
}

impl ServerConfig {
    /// True when requests are served by a fixed pool of worker threads.
    pub fn is_pooled(&self) -> bool {
        self.worker_count > 0
    }

    /// Address the listener binds to.
    pub fn bind_address(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}
