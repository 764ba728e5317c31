//! sqlgate: validates SELECT statements over HTTP.
//!
//! A POST body `{"Q": "<sql>"}` is parsed with a SQL grammar; a single plain
//! SELECT comes back in canonical form, anything else as a plain-text
//! diagnostic. GET serves a small status page.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod sql;

pub use config::ServerConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use sql::{validate, ValidationOutcome};
