//! Request body handling.
//!
//! # Responsibilities
//! - Read the full POST body (bounded)
//! - Parse it as a JSON object
//! - Extract the `Q` query parameter
//!
//! A missing or empty `Q` is a client error and is reported as `Ok(None)`;
//! a body that is not a JSON object is an internal failure.

use axum::body::Body;
use serde_json::{Map, Value};

use crate::http::error::DispatchError;

/// Name of the JSON field carrying the statement.
pub const QUERY_FIELD: &str = "Q";

/// Largest POST body read into memory.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

/// Read the whole body as text. Invalid UTF-8 sequences are replaced.
pub async fn read_body(body: Body) -> Result<String, DispatchError> {
    let bytes = axum::body::to_bytes(body, MAX_BODY_BYTES)
        .await
        .map_err(DispatchError::BodyRead)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Parse `body` as a JSON object and pull out a non-empty `Q`.
pub fn extract_query(body: &str) -> Result<Option<String>, DispatchError> {
    let value: Value = serde_json::from_str(body)?;
    let object = value.as_object().ok_or(DispatchError::NotAnObject)?;
    Ok(query_field(object))
}

/// Strings are taken verbatim, `null` counts as absent, and any other JSON
/// value is used in its JSON text form.
fn query_field(object: &Map<String, Value>) -> Option<String> {
    let query = match object.get(QUERY_FIELD)? {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    (!query.is_empty()).then_some(query)
}
