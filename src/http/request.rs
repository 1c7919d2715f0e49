//! Request identification.
//!
//! # Responsibilities
//! - Reuse the caller's `X-Request-ID` when it is present and printable
//! - Otherwise mint a UUID v4
//!
//! # Design Decisions
//! - The ID is never written into the inbound headers, so the captured
//!   envelope holds exactly what the client sent
//! - The ID is echoed on the response and attached to every log line

use axum::http::{HeaderMap, HeaderName};
use uuid::Uuid;

/// Header carrying the request ID.
pub static X_REQUEST_ID: HeaderName = HeaderName::from_static("x-request-id");

/// The caller's request ID, or a fresh one.
pub fn request_id(headers: &HeaderMap) -> String {
    headers
        .get(&X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}
