//! Response construction.
//!
//! # Responsibilities
//! - Build the fixed plain-text health and shutdown responses
//! - Build JSON responses with an explicit content type
//! - Build the relay fallback body
//!
//! # Design Decisions
//! - The fallback body is assembled by hand; the only sanitization is `"` → `'`
//!   in the reason, so the payload stays byte-compatible with existing callers
//! - A response that cannot be built degrades to a bare 500 instead of an error

use axum::{
    body::Body,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Content type of JSON produced by the services themselves.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Message carried by every fallback body.
pub const FALLBACK_MESSAGE: &str = "Service A unavailable";

/// Body of a simulated upstream failure.
pub const SIMULATED_FAILURE_BODY: &str = r#"{"error":"simulated failure"}"#;

/// Replace every double quote with a single quote.
pub fn sanitize_reason(reason: &str) -> String {
    reason.replace('"', "'")
}

/// `{"message":"Service A unavailable","reason":"<sanitized reason>"}`
pub fn fallback_body(reason: &str) -> String {
    format!(
        r#"{{"message":"{}","reason":"{}"}}"#,
        FALLBACK_MESSAGE,
        sanitize_reason(reason)
    )
}

/// Build a response, falling back to a bare 500 if construction fails.
pub fn build_response(status: StatusCode, content_type: &str, body: impl Into<Body>) -> Response {
    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, content_type)
        .body(body.into())
        .unwrap_or_else(|e| {
            tracing::warn!(status = %status, error = %e, "Failed to build response");
            terminal_error()
        })
}

pub fn json_response(status: StatusCode, body: impl Into<Body>) -> Response {
    build_response(status, JSON_UTF8, body)
}

pub fn text_response(status: StatusCode, body: impl Into<Body>) -> Response {
    build_response(status, "text/plain; charset=utf-8", body)
}

/// Last-resort response: status only, empty body.
pub fn terminal_error() -> Response {
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

/// `<name> healthy`
pub fn health_response(name: &str) -> Response {
    text_response(StatusCode::OK, format!("{} healthy", name))
}

/// `<name> shutting down`
pub fn shutdown_response(name: &str) -> Response {
    text_response(StatusCode::OK, format!("{} shutting down", name))
}
