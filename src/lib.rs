//! Onehop is a single-target streaming HTTP reverse proxy.
//!
//! It accepts inbound HTTP requests, forwards each one to a fixed upstream
//! origin, and relays the upstream response back to the caller as chunks
//! arrive. CORS preflights and liveness probes are answered locally and
//! never touch the upstream.
//!
//! # Architecture
//!
//! - [`cli`] -- Command-line argument parsing with clap derive macros.
//! - [`cmd`] -- Subcommand dispatch and execution (run, health).
//! - [`config`] -- The immutable [`ProxyConfig`](config::ProxyConfig) built
//!   once at startup from flags and environment variables.
//! - [`error`] -- Unified error types using `thiserror`.
//! - [`health`] -- `/healthz` liveness endpoint handler.
//! - [`logging`] -- Structured tracing setup with JSON and pretty-print output.
//! - [`middleware`] -- CORS header injection and `OPTIONS` preflight
//!   short-circuit.
//! - [`proxy`] -- Core HTTP forwarding: upstream URL resolution, header
//!   narrowing, the streaming body relay, and error mapping.
//! - [`server`] -- Axum server setup, shared application state, HTTP client,
//!   and graceful shutdown.

// Binary crate — public functions are internal, not consumed by external users.
#![allow(clippy::missing_errors_doc)]

pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod health;
pub mod logging;
pub mod middleware;
pub mod proxy;
pub mod server;
