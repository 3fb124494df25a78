//! The single upstream round trip.
//!
//! [`forward`] resolves the inbound path and query against the fixed
//! upstream base URL, buffers the inbound body, issues exactly one upstream
//! request, and assembles the outbound response around a streaming relay of
//! the upstream body. Every failure mode comes back as a tagged
//! [`ForwardError`]; the caller decides how to surface it. No failure is
//! ever retried.

use axum::body::Body;
use axum::http::{HeaderMap, Method, Uri};
use axum::response::Response;
use http_body_util::{BodyExt, Full};

use crate::server::AppState;

use super::body::RelayBody;
use super::headers;

#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    #[error("invalid upstream url: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid upstream uri: {0}")]
    Uri(#[from] http::uri::InvalidUri),

    #[error("failed to assemble upstream request: {0}")]
    Request(#[from] http::Error),

    #[error("failed to read request body: {0}")]
    BodyRead(#[source] axum::Error),

    #[error("upstream request failed: {0}")]
    Upstream(#[source] hyper_util::client::legacy::Error),

    #[error("upstream timed out after {}ms", .0.as_millis())]
    Timeout(std::time::Duration),
}

pub async fn forward(
    state: &AppState,
    method: &Method,
    uri: &Uri,
    req_headers: &HeaderMap,
    req_body: Body,
) -> Result<Response, ForwardError> {
    let upstream_uri = resolve_upstream_uri(&state.config.target, uri)?;

    // Full capture before dispatch: per-request memory is bounded by the
    // inbound body size, which the request body limit layer caps.
    let body_bytes = req_body
        .collect()
        .await
        .map_err(ForwardError::BodyRead)?
        .to_bytes();

    let mut builder = hyper::Request::builder()
        .method(method.clone())
        .uri(upstream_uri);
    if let Some(upstream_headers) = builder.headers_mut() {
        *upstream_headers = headers::narrow_request_headers(req_headers);
    }
    let upstream_req = builder.body(Full::new(body_bytes))?;

    // Deadline covers connect and response headers; body streaming after
    // the headers is driven by the client and is not bounded here.
    let upstream = tokio::time::timeout(
        state.config.upstream_timeout,
        state.http_client.request(upstream_req),
    )
    .await
    .map_err(|_| ForwardError::Timeout(state.config.upstream_timeout))?
    .map_err(ForwardError::Upstream)?;

    let (parts, upstream_body) = upstream.into_parts();

    let mut out_headers = parts.headers;
    headers::filter_response_headers(&mut out_headers);

    let mut response = Response::new(Body::new(RelayBody::new(upstream_body)));
    *response.status_mut() = parts.status;
    *response.headers_mut() = out_headers;
    Ok(response)
}

/// Resolve the inbound path-and-query against the upstream base URL.
/// Standard URL-resolution semantics: the base's scheme, host, and port are
/// kept while path and query are replaced by the inbound request's.
fn resolve_upstream_uri(target: &url::Url, inbound: &Uri) -> Result<Uri, ForwardError> {
    let path_and_query = inbound.path_and_query().map_or("/", |pq| pq.as_str());
    let resolved = target.join(path_and_query)?;
    Ok(resolved.as_str().parse()?)
}
