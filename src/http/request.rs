//! Request identification.
//!
//! # Responsibilities
//! - Name the header that carries the request ID
//! - Read it back for logging
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing (outermost layer)
//! - A caller-supplied ID is kept rather than replaced

use axum::http::HeaderMap;

pub const X_REQUEST_ID: &str = "x-request-id";

/// The request ID set by the request-id layer, if present and valid UTF-8.
pub fn request_id(headers: &HeaderMap) -> Option<&str> {
    headers.get(X_REQUEST_ID).and_then(|v| v.to_str().ok())
}
