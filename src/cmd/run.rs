//! `onehop run` — start the proxy server.
//!
//! Builds the immutable proxy configuration from CLI flags and environment
//! variables, then serves the Axum router until a shutdown signal arrives.
//! A missing or invalid upstream target is fatal: the listener never binds.

use std::net::SocketAddr;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Instant;

use crate::cli::RunArgs;
use crate::config::ProxyConfig;
use crate::error::OnehopError;
use crate::logging;
use crate::server::{self, AppState, Stats};

pub async fn execute(args: RunArgs) -> Result<(), OnehopError> {
    let log_format = logging::resolve_format(args.pretty, args.json);
    logging::init(&args.log_level, log_format);

    let config = ProxyConfig::from_args(&args)?;
    let target = config.target.clone();

    let state = Arc::new(AppState {
        config,
        http_client: server::build_http_client(),
        start_time: Instant::now(),
        stats: Stats::new(),
    });

    let router = server::build_router(Arc::clone(&state), args.max_body);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(
        addr = %addr,
        target = %target,
        upstream_timeout_ms = args.timeout,
        "onehop started"
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown_signal())
        .await?;

    tracing::info!(
        uptime_seconds = state.start_time.elapsed().as_secs(),
        forwarded = state.stats.forwarded.load(Ordering::Relaxed),
        failed = state.stats.failed.load(Ordering::Relaxed),
        "onehop stopped"
    );
    Ok(())
}
