//! Response construction.
//!
//! Every response is fully buffered: the body is encoded to UTF-8 first and
//! `Content-Length` is set from the encoded bytes, together with an explicit
//! `Content-Type`.

use axum::body::Body;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;

pub const CONTENT_TYPE_TEXT: &str = "text/plain; charset=UTF-8";
pub const CONTENT_TYPE_HTML: &str = "text/html; charset=UTF-8";

/// Fixed body for internal errors. Never carries error detail.
pub const INTERNAL_ERROR_BODY: &str =
    "<html><body><h1>500 Internal Server Error</h1><p>Internal server error occurred.</p></body></html>";

/// Plain-text response.
pub fn text(status: StatusCode, body: impl Into<String>) -> Response {
    respond(status, CONTENT_TYPE_TEXT, body.into())
}

/// HTML response.
pub fn html(status: StatusCode, body: impl Into<String>) -> Response {
    respond(status, CONTENT_TYPE_HTML, body.into())
}

/// The generic 500 page.
pub fn internal_error() -> Response {
    html(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_BODY)
}

fn respond(status: StatusCode, content_type: &'static str, body: String) -> Response {
    let bytes = body.into_bytes();
    let length = bytes.len();

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(length));
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_length_counts_bytes_not_chars() {
        let response = text(StatusCode::OK, "SELECT 'héllo'");
        assert_eq!(response.headers()[header::CONTENT_LENGTH], "15");
        assert_eq!(response.headers()[header::CONTENT_TYPE], CONTENT_TYPE_TEXT);
    }

    #[test]
    fn internal_error_is_html() {
        let response = internal_error();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.headers()[header::CONTENT_TYPE], CONTENT_TYPE_HTML);
        assert_eq!(
            response.headers()[header::CONTENT_LENGTH],
            INTERNAL_ERROR_BODY.len().to_string().as_str()
        );
    }
}
