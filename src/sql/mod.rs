//! SQL statement handling.
//!
//! The validator is pure: no I/O, no shared state. The HTTP layer only sees
//! the [`StatementValidator`] trait, so the grammar can be swapped without
//! touching request handling.

pub mod validator;

pub use validator::{validate, ValidationOutcome};

/// Turns raw statement text into a [`ValidationOutcome`].
pub trait StatementValidator: Send + Sync {
    fn validate(&self, raw: &str) -> ValidationOutcome;
}

/// The `sqlparser` backed validator used by the server.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrammarValidator;

impl StatementValidator for GrammarValidator {
    fn validate(&self, raw: &str) -> ValidationOutcome {
        validator::validate(raw)
    }
}
