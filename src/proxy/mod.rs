//! Core HTTP request forwarding.
//!
//! [`forward_handler`] is the Axum fallback that receives every request not
//! answered locally. It hands the request to the forwarder for the single
//! upstream round trip and inspects the result exactly once: a successful
//! relay is returned as-is, any [`ForwardError`](forward::ForwardError) is
//! mapped to a bounded `502` JSON error response. Submodules handle
//! upstream dispatch ([`forward`]), header narrowing and filtering
//! ([`headers`]), and the streaming body relay ([`body`]).

pub mod body;
pub mod forward;
pub mod headers;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::server::AppState;

/// Wire shape of the JSON error body: `{"error": "<message>"}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

pub async fn forward_handler(
    State(state): State<Arc<AppState>>,
    method: Method,
    uri: Uri,
    req_headers: HeaderMap,
    req_body: Body,
) -> Response {
    // Log-only correlation id. It is never forwarded upstream or echoed in
    // response headers; the request-header narrowing is deliberate.
    let request_id = uuid::Uuid::new_v4();

    match forward::forward(&state, &method, &uri, &req_headers, req_body).await {
        Ok(response) => {
            state.stats.forwarded.fetch_add(1, Ordering::Relaxed);
            tracing::info!(
                request_id = %request_id,
                method = %method,
                path = %uri.path(),
                status = response.status().as_u16(),
                "relayed upstream response"
            );
            response
        }
        Err(e) => {
            state.stats.failed.fetch_add(1, Ordering::Relaxed);
            tracing::error!(
                request_id = %request_id,
                method = %method,
                path = %uri.path(),
                error = %e,
                "forwarding failed"
            );
            bad_gateway(&e)
        }
    }
}

/// Map a forwarding failure to `502 Bad Gateway` with a JSON error body.
///
/// Only reachable before any response bytes have been written; a failure
/// after the status line is on the wire is handled by the body relay
/// ([`body::RelayBody`]) instead.
fn bad_gateway(err: &forward::ForwardError) -> Response {
    let payload = serde_json::to_string(&ErrorBody {
        error: err.to_string(),
    })
    .unwrap_or_else(|_| r#"{"error":"forwarding failed"}"#.to_string());

    (
        StatusCode::BAD_GATEWAY,
        [(CONTENT_TYPE, "application/json")],
        payload,
    )
        .into_response()
}
