//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming TCP connection
//!     → listener.rs (bind, kernel backlog)
//!     → axum serve loop (one task per connection)
//!     → connection.rs (per-request slot, released on every exit path)
//!     → Hand off to HTTP layer
//! ```

pub mod connection;
pub mod listener;

pub use connection::{ConnectionGuard, ConnectionTracker};
pub use listener::{bind, ListenerError};
