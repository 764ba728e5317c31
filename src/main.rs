//! sqlgate server binary.
//!
//! ```text
//!   Client ──▶ listener ──▶ dispatcher ──┬─▶ POST: JSON "Q" ──▶ SQL validator ──▶ canonical text
//!                                        ├─▶ GET:  status page (or 403)
//!                                        └─▶ other: 405
//! ```

use std::process::ExitCode;

use sqlgate::config::ServerConfig;
use sqlgate::lifecycle::startup;
use sqlgate::observability::logging;

fn main() -> ExitCode {
    let config = match ServerConfig::from_args(std::env::args_os()) {
        Ok(config) => config,
        Err(e) => {
            print!("{}", e.console_output());
            return ExitCode::SUCCESS;
        }
    };

    logging::init(config.debug);
    tracing::info!("sqlgate v{} starting", config.version);
    if config.debug {
        startup::log_configuration(&config);
    }

    let port = config.port;
    let runtime = match startup::build_runtime(&config) {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "Failed to build runtime");
            eprintln!("Could not start server on port {}: {}", port, e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(startup::serve(config)) {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Could not start server on port {}", port);
            eprintln!("Could not start server on port {}: {}", port, e);
            ExitCode::FAILURE
        }
    }
}
