//! Request dispatch.
//!
//! ```text
//! Received → method routed
//!     POST → body read → Q extracted | 400 → validated → 200
//!     GET  → 403 | status page → 200
//!     *    → 405
//! any failure on the way → DispatchError → 500
//! ```

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::http::error::DispatchError;
use crate::http::server::AppState;
use crate::http::{request, response};
use crate::observability::metrics;

pub const MISSING_QUERY: &str = "Error: Missing or empty 'Q' parameter.";
pub const GET_DISABLED: &str = "GET requests not allowed";
pub const METHOD_NOT_ALLOWED: &str = "Method Not Allowed";

/// Single entry point for every request, on every path.
///
/// The request slot is held for the whole call and released when this
/// function returns or unwinds.
pub async fn dispatch(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    request: Request<Body>,
) -> Response {
    let _slot = state.connections.track(peer);
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let result = match method {
        Method::POST => handle_post(&state, request.into_body()).await,
        Method::GET => handle_get(&state, peer, &path).await,
        _ => Ok(handle_unsupported(&method, peer)),
    };

    let response = result.unwrap_or_else(IntoResponse::into_response);
    metrics::record_request(method.as_str(), response.status().as_u16(), start);
    response
}

async fn handle_post(state: &AppState, body: Body) -> Result<Response, DispatchError> {
    let body = request::read_body(body).await?;
    tracing::info!(body = %body, "Received POST request");

    let Some(query) = request::extract_query(&body)? else {
        tracing::warn!("Missing or empty 'Q' parameter");
        return Ok(response::text(StatusCode::BAD_REQUEST, MISSING_QUERY));
    };
    tracing::info!(query = %query, "Extracted Q value");

    let outcome = state.validator.validate(&query);
    metrics::record_validation(outcome.kind());
    tracing::info!(outcome = outcome.kind(), "Statement validated");

    Ok(response::text(StatusCode::OK, outcome.into_message()))
}

async fn handle_get(
    state: &AppState,
    peer: SocketAddr,
    path: &str,
) -> Result<Response, DispatchError> {
    if !state.config.get_enabled {
        tracing::warn!(peer = %peer, path = %path, "GET request while GET is disabled");
        return Ok(response::text(StatusCode::FORBIDDEN, GET_DISABLED));
    }

    tracing::info!(peer = %peer, path = %path, "Received GET request");
    let page = state.status_page.render(&state.config).await?;
    Ok(response::html(StatusCode::OK, page))
}

fn handle_unsupported(method: &Method, peer: SocketAddr) -> Response {
    tracing::warn!(method = %method, peer = %peer, "Unsupported method");
    response::text(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}
