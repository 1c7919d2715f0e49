//! Capture of an inbound request into an [`Envelope`].
//!
//! # Responsibilities
//! - Drain the whole body into memory (no streaming)
//! - Copy method, request target and header multimap by value
//! - Never return a partial envelope
//!
//! # Design Decisions
//! - The body is read for every method, not only POST/PUT
//! - No size ceiling unless `limits.max_body_bytes` is configured

use axum::body::Body;
use axum::http::Request;

use super::headers::collect_headers;
use super::{Envelope, EnvelopeError, EnvelopeResult};

/// Build an envelope from a raw request.
///
/// Fails with [`EnvelopeError::Read`] if the body stream errors before it
/// is fully drained or grows past `max_body_bytes`.
pub async fn capture(request: Request<Body>, max_body_bytes: Option<usize>) -> EnvelopeResult<Envelope> {
    let (parts, body) = request.into_parts();

    let limit = max_body_bytes.unwrap_or(usize::MAX);
    let body = axum::body::to_bytes(body, limit)
        .await
        .map_err(|e| EnvelopeError::Read(e.to_string()))?;

    Ok(Envelope::from_parts(
        parts.method.to_string(),
        parts.uri.to_string(),
        collect_headers(&parts.headers),
        body,
    ))
}
