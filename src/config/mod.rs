//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! command-line arguments
//!     → loader.rs (clap parse, -ng alias)
//!     → validation.rs (range checks, clamping)
//!     → ServerConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - Every field has a default so an empty command line is valid
//! - Validation separates syntactic (clap) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{Cli, ConfigError};
pub use schema::ServerConfig;
pub use validation::ValidationError;
