//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → handlers.rs (route by method)
//!     → request.rs (read body, extract Q)
//!     → sql validator / status_page.rs
//!     → response.rs (content type, content length)
//!     → Send to client
//! ```

pub mod error;
pub mod handlers;
pub mod request;
pub mod response;
pub mod server;
pub mod status_page;

pub use error::DispatchError;
pub use server::{build_router, AppState, HttpServer};
pub use status_page::{StatusPage, TemplateSource};
