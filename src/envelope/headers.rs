//! Header multimap construction.

use axum::http::HeaderMap;
use bytes::Bytes;

use super::HeaderMultiMap;

/// Canonical MIME form of a header name: first letter of every
/// hyphen-separated segment upper-cased, the rest lower-cased.
///
/// Names containing bytes outside the token alphabet are returned unchanged.
pub fn canonical_header_name(name: &str) -> String {
    if !name.bytes().all(is_token_byte) {
        return name.to_string();
    }

    let mut out = String::with_capacity(name.len());
    let mut upper = true;
    for c in name.chars() {
        if upper {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c.to_ascii_lowercase());
        }
        upper = c == '-';
    }
    out
}

fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// Copy every header value, grouped by canonical name.
pub fn collect_headers(headers: &HeaderMap) -> HeaderMultiMap {
    let mut map = HeaderMultiMap::new();
    for name in headers.keys() {
        let values = map.entry(canonical_header_name(name.as_str())).or_default();
        values.extend(
            headers
                .get_all(name)
                .iter()
                .map(|v| Bytes::copy_from_slice(v.as_bytes())),
        );
    }
    map
}
