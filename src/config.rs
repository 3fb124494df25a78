//! The immutable proxy configuration, built once at startup.
//!
//! [`ProxyConfig`] holds the upstream target URL and the upstream call
//! deadline, resolved from CLI flags and environment variables before the
//! listener binds. It is never mutated afterwards; request handlers see it
//! by reference through the shared [`AppState`](crate::server::AppState),
//! and the ambient environment is never consulted during request handling.

use std::time::Duration;

use url::Url;

use crate::cli::RunArgs;
use crate::error::OnehopError;

#[derive(Debug, Clone)]
pub struct ProxyConfig {
    /// Base URL of the upstream origin. Inbound path and query are resolved
    /// against it with standard URL-resolution semantics.
    pub target: Url,

    /// Deadline for the upstream call, up to response headers. Body
    /// streaming after the headers is not bounded by this.
    pub upstream_timeout: Duration,
}

impl ProxyConfig {
    pub fn from_args(args: &RunArgs) -> Result<Self, OnehopError> {
        Ok(Self {
            target: parse_target(&args.target)?,
            upstream_timeout: Duration::from_millis(args.timeout),
        })
    }
}

/// Parse and validate the upstream base URL. A missing or unusable target
/// is fatal: the process must not begin listening without one.
pub fn parse_target(raw: &str) -> Result<Url, OnehopError> {
    let url = Url::parse(raw).map_err(|e| OnehopError::InvalidTarget {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(OnehopError::InvalidTarget {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{scheme}' (expected http or https)"),
        });
    }

    if url.host_str().is_none() {
        return Err(OnehopError::InvalidTarget {
            url: raw.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(url)
}
