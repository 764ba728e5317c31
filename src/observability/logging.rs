//! Structured logging.
//!
//! Logging is a single switch: with debug off the subscriber filters every
//! event out, so call sites use plain `tracing` macros without checking the
//! flag themselves. With debug on, `RUST_LOG` takes precedence over the
//! built-in directive.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used in debug mode when `RUST_LOG` is unset.
const DEBUG_DIRECTIVE: &str = "sqlgate=debug,tower_http=debug";

/// Build the event filter for the given debug setting.
pub fn filter(debug: bool) -> EnvFilter {
    if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEBUG_DIRECTIVE.into())
    } else {
        EnvFilter::new("off")
    }
}

/// Install the global subscriber. Lines go to stdout with a timestamp and level.
///
/// Returns `false` if a subscriber was already installed (e.g. by a test).
pub fn init(debug: bool) -> bool {
    tracing_subscriber::registry()
        .with(filter(debug))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .try_init()
        .is_ok()
}
