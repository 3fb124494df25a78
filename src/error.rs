//! Unified error types for Onehop.
//!
//! [`OnehopError`] covers startup and CLI failures: configuration problems,
//! socket binding, and the `health` subcommand's probe. Per-request
//! forwarding failures have their own tagged enum,
//! [`ForwardError`](crate::proxy::forward::ForwardError), so the request
//! path never funnels through the process-level error type.

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum OnehopError {
    #[error("Invalid upstream target '{url}': {reason}\n\n  Set TARGET to the upstream base URL, e.g. TARGET=http://backend:9000")]
    InvalidTarget { url: String, reason: String },

    #[error("Invalid address: {0}")]
    AddressParse(#[from] std::net::AddrParseError),

    #[error("Invalid URI: {source}")]
    UriParse {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("HTTP request failed: {source}")]
    HttpRequest {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Health check failed with status {0}")]
    HealthCheckFailed(hyper::StatusCode),
}
