//! Semantic checks on parsed command-line values.
//!
//! Clap handles syntax (unknown flags, non-numeric values); this module turns
//! the raw numbers into a `ServerConfig`. Every problem is collected, not
//! just the first one.

use thiserror::Error;

use crate::config::loader::Cli;
use crate::config::schema::ServerConfig;

/// A single rejected command-line value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Port must be between 0 and 65535, got {0}")]
    PortOutOfRange(i64),

    #[error("Thread pool size must be non-negative, got {0}")]
    NegativeThreads(i64),
}

/// Validate parsed flags and build the immutable configuration.
///
/// A negative backlog is clamped to zero instead of being rejected.
pub fn validate_cli(cli: Cli) -> Result<ServerConfig, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut config = ServerConfig::default();

    if let Some(port) = cli.port {
        match u16::try_from(port) {
            Ok(port) => config.port = port,
            Err(_) => errors.push(ValidationError::PortOutOfRange(port)),
        }
    }

    if let Some(backlog) = cli.backlog {
        config.backlog = u32::try_from(backlog.max(0)).unwrap_or(u32::MAX);
    }

    if let Some(threads) = cli.threads {
        if threads < 0 {
            errors.push(ValidationError::NegativeThreads(threads));
        } else {
            config.worker_count = usize::try_from(threads).unwrap_or(usize::MAX);
        }
    }

    config.debug = cli.debug;
    config.get_enabled = !cli.no_get;
    config.template_path = cli.template;
    config.metrics_address = cli.metrics;

    if errors.is_empty() {
        Ok(config)
    } else {
        Err(errors)
    }
}
