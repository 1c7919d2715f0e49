//! Wire encoding of an [`Envelope`].
//!
//! The format is one JSON object:
//!
//! ```text
//! {"method": "GET", "uri": "/foo?x=1", "headers": {"Accept": ["text/plain"]}, "body": ""}
//! ```
//!
//! Bodies that are not valid UTF-8 are written as standard base64 and the
//! object gains `"body_encoding": "base64"`. Objects without that field
//! decode as text, so blobs from text-only producers remain readable.

use std::borrow::Cow;
use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::{Envelope, EnvelopeError, EnvelopeResult, HeaderMultiMap};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum BodyEncoding {
    #[default]
    Text,
    Base64,
}

impl BodyEncoding {
    fn is_text(&self) -> bool {
        *self == BodyEncoding::Text
    }
}

#[derive(Serialize)]
struct WireRef<'a> {
    method: &'a str,
    uri: &'a str,
    headers: BTreeMap<&'a str, Vec<&'a str>>,
    body: Cow<'a, str>,
    #[serde(skip_serializing_if = "BodyEncoding::is_text")]
    body_encoding: BodyEncoding,
}

#[derive(Deserialize)]
struct Wire {
    method: String,
    uri: String,
    #[serde(default)]
    headers: Option<BTreeMap<String, Vec<String>>>,
    body: String,
    #[serde(default)]
    body_encoding: BodyEncoding,
}

/// Encode an envelope into its wire bytes.
///
/// Output is deterministic: header names are sorted and fields always
/// appear in the same order.
pub fn serialize(envelope: &Envelope) -> EnvelopeResult<Bytes> {
    let mut headers = BTreeMap::new();
    for (name, values) in envelope.headers() {
        let values = values
            .iter()
            .map(|v| {
                std::str::from_utf8(v).map_err(|_| {
                    EnvelopeError::Encode(format!("header {name} holds a value that is not valid UTF-8"))
                })
            })
            .collect::<EnvelopeResult<Vec<_>>>()?;
        headers.insert(name.as_str(), values);
    }

    let (body, body_encoding) = match std::str::from_utf8(envelope.body()) {
        Ok(text) => (Cow::Borrowed(text), BodyEncoding::Text),
        Err(_) => (Cow::Owned(STANDARD.encode(envelope.body())), BodyEncoding::Base64),
    };

    let wire = WireRef {
        method: envelope.method(),
        uri: envelope.uri(),
        headers,
        body,
        body_encoding,
    };

    serde_json::to_vec(&wire)
        .map(Bytes::from)
        .map_err(|e| EnvelopeError::Encode(e.to_string()))
}

/// Decode wire bytes back into an envelope.
pub fn deserialize(bytes: &[u8]) -> EnvelopeResult<Envelope> {
    let wire: Wire = serde_json::from_slice(bytes).map_err(|e| EnvelopeError::Decode(e.to_string()))?;

    let body = match wire.body_encoding {
        BodyEncoding::Text => Bytes::from(wire.body),
        BodyEncoding::Base64 => STANDARD
            .decode(wire.body.as_bytes())
            .map(Bytes::from)
            .map_err(|e| EnvelopeError::Decode(format!("invalid base64 body: {e}")))?,
    };

    let headers: HeaderMultiMap = wire
        .headers
        .unwrap_or_default()
        .into_iter()
        .map(|(name, values)| (name, values.into_iter().map(Bytes::from).collect()))
        .collect();

    Ok(Envelope::from_parts(wire.method, wire.uri, headers, body))
}
