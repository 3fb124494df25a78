//! `/healthz` liveness endpoint handler.
//!
//! Answered locally so orchestrator probes keep succeeding even when the
//! upstream is down; liveness of the proxy says nothing about the backend.
//! Responds to any method with `200 OK`, `content-type: text/plain`, and a
//! body of exactly `ok`.

use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;

pub async fn healthz_handler() -> impl IntoResponse {
    ([(CONTENT_TYPE, "text/plain")], "ok")
}
