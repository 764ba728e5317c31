//! Internal request failures.
//!
//! Anything that goes wrong while producing a response ends up here and is
//! answered with the generic 500 page. The detail is logged, never sent.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::http::response;
use crate::http::status_page::TemplateError;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    #[error("Malformed JSON body: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Request body is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Error handling request");
        response::internal_error()
    }
}
