//! Configuration loading from the command line.

use std::ffi::OsString;
use std::net::SocketAddr;
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};

use crate::config::schema::ServerConfig;
use crate::config::validation::{validate_cli, ValidationError};

/// Legacy two-letter short flag, rewritten to its long form before parsing.
const NO_GET_SHORT: &str = "-ng";
const NO_GET_LONG: &str = "--noget";

/// Raw command-line flags.
#[derive(Debug, Parser)]
#[command(name = "sqlgate")]
#[command(version, about = "Validates SELECT statements over HTTP and returns their canonical form")]
pub struct Cli {
    /// Port number to run the server on.
    #[arg(short, long, allow_negative_numbers = true)]
    pub port: Option<i64>,

    /// Maximum number of pending connections.
    #[arg(short, long, allow_negative_numbers = true)]
    pub backlog: Option<i64>,

    /// Number of threads in the worker pool (0 = synchronous).
    #[arg(short, long, allow_negative_numbers = true)]
    pub threads: Option<i64>,

    /// Enable debug mode.
    #[arg(short, long)]
    pub debug: bool,

    /// Disable the GET status page (short form: -ng).
    #[arg(long = "noget")]
    pub no_get: bool,

    /// Serve the status page from this template file.
    #[arg(long, value_name = "PATH")]
    pub template: Option<PathBuf>,

    /// Expose Prometheus metrics on this address.
    #[arg(long, value_name = "ADDR")]
    pub metrics: Option<SocketAddr>,
}

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Cli(clap::Error),
    Validation(Vec<ValidationError>),
}

impl ConfigError {
    /// Help or version text when the user asked for `--help` or `--version`.
    pub fn informational_output(&self) -> Option<String> {
        match self {
            ConfigError::Cli(e)
                if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) =>
            {
                Some(e.to_string())
            }
            _ => None,
        }
    }

    /// Text printed on stdout before exiting without starting a server.
    pub fn console_output(&self) -> String {
        match self.informational_output() {
            Some(output) => output,
            None => format!("Invalid arguments: {}\n\n{}", self, ServerConfig::usage()),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Cli(e) => {
                // Clap renders usage hints after the first line; keep only the message.
                let rendered = e.to_string();
                let first = rendered.lines().next().unwrap_or_default();
                write!(f, "{}", first.trim_start_matches("error: "))
            }
            ConfigError::Validation(errors) => {
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl ServerConfig {
    /// Parse and validate command-line arguments (including the program name).
    pub fn from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let args = args.into_iter().map(|arg| {
            let arg: OsString = arg.into();
            if arg == NO_GET_SHORT {
                OsString::from(NO_GET_LONG)
            } else {
                arg
            }
        });

        let cli = Cli::try_parse_from(args).map_err(ConfigError::Cli)?;
        validate_cli(cli).map_err(ConfigError::Validation)
    }

    /// Rendered help text listing every flag.
    pub fn usage() -> String {
        Cli::command().render_help().to_string()
    }
}
