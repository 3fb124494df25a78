//! Integration tests for the forwarding path: upstream URL resolution,
//! request header narrowing, response relay, and request independence.
//!
//! Each test drives a real proxy listener against an in-process stub
//! upstream, both bound to ephemeral loopback ports.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderMap, Uri};
use axum::routing::{get, post};
use axum::Json;
use bytes::Bytes;
use onehop::config::ProxyConfig;
use onehop::server::{self, AppState, Stats};

async fn echo_path(uri: Uri) -> String {
    uri.path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_default()
}

/// Reports what the upstream actually received: headers seen, body length.
async fn inspect(headers: HeaderMap, body: Bytes) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "has_content_length": headers.contains_key("content-length"),
        "has_transfer_encoding": headers.contains_key("transfer-encoding"),
        "saw_custom": headers.contains_key("x-custom"),
        "saw_authorization": headers.contains_key("authorization"),
        "content_type": headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
        "body_len": body.len(),
    }))
}

async fn echo_body(headers: HeaderMap, body: Bytes) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "content_type": headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default(),
        "saw_custom": headers.contains_key("x-custom"),
        "body": String::from_utf8_lossy(&body),
    }))
}

async fn start_upstream() -> SocketAddr {
    let router = axum::Router::new()
        .route(
            "/json",
            get(|| async { ([(CONTENT_TYPE, "application/json")], r#"{"x":1}"#) }),
        )
        .route(
            "/slow",
            get(|| async {
                tokio::time::sleep(Duration::from_millis(800)).await;
                "slow"
            }),
        )
        .route("/fast", get(|| async { "fast" }))
        .route("/inspect", get(inspect))
        .route("/echo", post(echo_body))
        .fallback(echo_path);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    addr
}

async fn start_proxy(upstream: SocketAddr) -> SocketAddr {
    let state = Arc::new(AppState {
        config: ProxyConfig {
            target: url::Url::parse(&format!("http://{upstream}")).unwrap(),
            upstream_timeout: Duration::from_secs(5),
        },
        http_client: server::build_http_client(),
        start_time: Instant::now(),
        stats: Stats::new(),
    });

    let router = server::build_router(state, 1_048_576);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    addr
}

async fn start_pair() -> SocketAddr {
    let upstream = start_upstream().await;
    start_proxy(upstream).await
}

#[tokio::test]
async fn forwards_path_and_query_byte_for_byte() {
    let proxy = start_pair().await;

    let resp = reqwest::get(format!(
        "http://{proxy}/some/deep/path?b=2&a=1&a=2&empty="
    ))
    .await
    .unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.text().await.unwrap(),
        "/some/deep/path?b=2&a=1&a=2&empty="
    );
}

#[tokio::test]
async fn relays_status_headers_and_body() {
    let proxy = start_pair().await;

    let resp = reqwest::get(format!("http://{proxy}/json")).await.unwrap();

    assert_eq!(resp.status(), 200);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert!(resp.headers().get("transfer-encoding").is_none());
    assert_eq!(resp.text().await.unwrap(), r#"{"x":1}"#);
}

#[tokio::test]
async fn relays_upstream_error_statuses_without_retry() {
    let proxy = start_pair().await;
    let client = reqwest::Client::new();

    // The stub's /json route only accepts GET; axum answers 405
    let resp = client
        .delete(format!("http://{proxy}/json"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 405);
}

#[tokio::test]
async fn header_filtering_is_stable_across_requests() {
    let proxy = start_pair().await;

    let mut header_sets = Vec::new();
    for _ in 0..2 {
        let resp = reqwest::get(format!("http://{proxy}/json")).await.unwrap();
        let mut names: Vec<String> = resp.headers().keys().map(ToString::to_string).collect();
        names.sort();
        header_sets.push(names);
    }

    assert_eq!(header_sets[0], header_sets[1]);
}

#[tokio::test]
async fn narrows_request_headers_to_content_type_only() {
    let proxy = start_pair().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("http://{proxy}/echo"))
        .header("content-type", "application/json")
        .header("x-custom", "nope")
        .header("authorization", "Bearer secret")
        .body(r#"{"rps":3}"#)
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let seen: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(seen["content_type"], "application/json");
    assert_eq!(seen["saw_custom"], false);
    assert_eq!(seen["body"], r#"{"rps":3}"#);
}

#[tokio::test]
async fn empty_get_body_is_absent_upstream() {
    let proxy = start_pair().await;

    let resp = reqwest::get(format!("http://{proxy}/inspect")).await.unwrap();
    assert_eq!(resp.status(), 200);

    let seen: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(seen["body_len"], 0);
    // No empty-but-present body marker on a bodyless GET
    assert_eq!(seen["has_content_length"], false);
    assert_eq!(seen["has_transfer_encoding"], false);
    assert_eq!(seen["saw_authorization"], false);
}

#[tokio::test]
async fn slow_upstream_does_not_delay_other_requests() {
    let proxy = start_pair().await;

    let slow = tokio::spawn(async move {
        reqwest::get(format!("http://{proxy}/slow"))
            .await
            .unwrap()
            .text()
            .await
            .unwrap()
    });

    // Let the slow request reach the upstream first
    tokio::time::sleep(Duration::from_millis(100)).await;

    let started = Instant::now();
    let fast = reqwest::get(format!("http://{proxy}/fast"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(fast, "fast");
    assert!(
        started.elapsed() < Duration::from_millis(400),
        "fast request was delayed by the slow one: {:?}",
        started.elapsed()
    );

    assert_eq!(slow.await.unwrap(), "slow");
}

#[tokio::test]
async fn concurrent_requests_complete_independently() {
    let proxy = start_pair().await;

    let mut handles = Vec::new();
    for i in 0..8 {
        handles.push(tokio::spawn(async move {
            let resp = reqwest::get(format!("http://{proxy}/distinct/{i}?n={i}"))
                .await
                .unwrap();
            (resp.status().as_u16(), resp.text().await.unwrap(), i)
        }));
    }

    for handle in handles {
        let (status, body, i) = handle.await.unwrap();
        assert_eq!(status, 200);
        assert_eq!(body, format!("/distinct/{i}?n={i}"));
    }
}
