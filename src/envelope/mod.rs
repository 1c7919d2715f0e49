//! Envelope codec subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound Request<Body>
//!     → capture.rs (drain body, copy method / target / header multimap)
//!     → Envelope (immutable)
//!     → codec.rs serialize (field-tagged JSON bytes)
//!     → queue backend
//!
//! Downstream consumer:
//!     bytes → codec.rs deserialize → Envelope
//! ```
//!
//! # Design Decisions
//! - Body is kept as raw bytes; text bodies go on the wire verbatim,
//!   anything else is base64 with an explicit `body_encoding` tag
//! - Header names are canonicalised (`x-tag` → `X-Tag`), values keep
//!   arrival order per name
//! - Header values must be UTF-8 on the wire; an obs-text value fails
//!   serialization (and the request) instead of being base64 encoded
//! - No state: every function here is pure apart from draining the body

pub mod capture;
pub mod codec;
pub mod headers;

use std::collections::BTreeMap;

use bytes::Bytes;
use thiserror::Error;

pub use capture::capture;
pub use codec::{deserialize, serialize};
pub use headers::canonical_header_name;

/// Header multimap: canonical name to the ordered list of raw values.
pub type HeaderMultiMap = BTreeMap<String, Vec<Bytes>>;

/// Errors raised while building or (de)serializing an envelope.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    /// The request body could not be fully drained.
    #[error("failed to read request body: {0}")]
    Read(String),

    /// The envelope holds data the wire encoding cannot carry losslessly.
    #[error("failed to encode envelope: {0}")]
    Encode(String),

    /// The byte blob is not a valid envelope.
    #[error("failed to decode envelope: {0}")]
    Decode(String),
}

/// Result type for envelope operations.
pub type EnvelopeResult<T> = Result<T, EnvelopeError>;

/// The normalized, backend-agnostic form of one HTTP request.
///
/// Built once per request and never mutated afterwards. The consuming
/// `with_*` methods exist so tests and consumers can assemble one by hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    method: String,
    uri: String,
    headers: HeaderMultiMap,
    body: Bytes,
}

impl Envelope {
    /// Create an envelope with no headers and an empty body.
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
            headers: HeaderMultiMap::new(),
            body: Bytes::new(),
        }
    }

    pub(crate) fn from_parts(
        method: String,
        uri: String,
        headers: HeaderMultiMap,
        body: Bytes,
    ) -> Self {
        Self {
            method,
            uri,
            headers,
            body,
        }
    }

    /// Append one value under `name` (canonicalised).
    pub fn with_header(mut self, name: &str, value: impl Into<Bytes>) -> Self {
        self.headers
            .entry(canonical_header_name(name))
            .or_default()
            .push(value.into());
        self
    }

    /// Replace the body.
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    /// HTTP verb exactly as received.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Raw request target, query string included.
    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn headers(&self) -> &HeaderMultiMap {
        &self.headers
    }

    /// Values for one header as text, in arrival order.
    ///
    /// Returns `None` when the header is absent or any value is not UTF-8.
    pub fn header_values(&self, name: &str) -> Option<Vec<&str>> {
        self.headers
            .get(&canonical_header_name(name))?
            .iter()
            .map(|v| std::str::from_utf8(v).ok())
            .collect()
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Total number of header values across all names.
    pub fn header_count(&self) -> usize {
        self.headers.values().map(Vec::len).sum()
    }
}
