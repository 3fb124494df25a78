//! Upstream header narrowing and response header filtering.
//!
//! The proxy forwards a single request header upstream: `content-type`,
//! defaulted to an empty value when absent. Everything else the caller sent
//! (cookies, authorization, custom headers) is dropped deliberately, not by
//! accident — widening the set would change observable proxy semantics.
//! Response headers pass through unmodified except for `transfer-encoding`,
//! which describes the upstream connection's framing and must not leak onto
//! the client connection; the server re-frames the relayed body itself.

use axum::http::header::{CONTENT_TYPE, TRANSFER_ENCODING};
use axum::http::{HeaderMap, HeaderValue};

/// Build the header set for the upstream request: `content-type` only.
#[must_use]
pub fn narrow_request_headers(original: &HeaderMap) -> HeaderMap {
    let content_type = original
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static(""));

    let mut headers = HeaderMap::with_capacity(1);
    headers.insert(CONTENT_TYPE, content_type);
    headers
}

/// Strip `transfer-encoding` from an upstream response header set.
pub fn filter_response_headers(headers: &mut HeaderMap) {
    headers.remove(TRANSFER_ENCODING);
}
