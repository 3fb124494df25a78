//! `onehop health` — check the health of a running instance.
//!
//! Sends a `GET /healthz` request to the specified URL and reports the
//! result. Exits non-zero when the probe fails or returns a non-success
//! status.

use http_body_util::BodyExt;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::OnehopError;

pub async fn execute(args: HealthArgs) -> Result<(), OnehopError> {
    let url = format!("{}/healthz", args.url.trim_end_matches('/'));
    let uri: hyper::Uri =
        url.parse()
            .map_err(|e: hyper::http::uri::InvalidUri| OnehopError::UriParse {
                source: Box::new(e),
            })?;

    let connector = hyper_util::client::legacy::connect::HttpConnector::new();
    let client = Client::builder(TokioExecutor::new()).build(connector);

    let req = hyper::Request::builder()
        .uri(uri)
        .body(http_body_util::Full::new(bytes::Bytes::new()))
        .map_err(|e| OnehopError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(std::time::Duration::from_secs(10), client.request(req))
        .await
        .map_err(|_| OnehopError::HttpRequest {
            source: "health check timed out after 10s".into(),
        })?
        .map_err(|e| OnehopError::HttpRequest {
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| OnehopError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if !status.is_success() {
        return Err(OnehopError::HealthCheckFailed(status));
    }

    println!("\u{2713} onehop is healthy ({})", args.url);
    let body_str = String::from_utf8_lossy(&body);
    if body_str != "ok" {
        println!("  unexpected probe body: {body_str}");
    }

    Ok(())
}
