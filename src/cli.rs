//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser and the [`Commands`] enum for
//! subcommands (run, health), plus their argument structs. Every flag has
//! an environment variable equivalent for container deployments; the two
//! the proxy is normally driven by are `TARGET` (the upstream base URL,
//! required) and `PORT` (the listen port).

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "onehop",
    version,
    about = "Single-target streaming HTTP reverse proxy",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        TARGET=http://backend:9000 onehop run        Forward everything to one upstream\n  \
        onehop run -t http://backend:9000 -p 8080    Same, via flags\n  \
        onehop health                                Probe a running instance"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the proxy server
    Run(RunArgs),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        TARGET=http://34.173.97.171 onehop run                 Container deployment\n  \
        onehop run -t http://localhost:9000 --pretty           Local dev mode\n  \
        onehop run -t https://api.internal --timeout 5000      Short upstream deadline")]
pub struct RunArgs {
    /// Base URL of the upstream origin all requests are forwarded to
    #[arg(short, long, env = "TARGET")]
    pub target: String,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    // -- Logging --
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,

    // -- Tuning --
    /// Upstream call timeout in milliseconds (deadline up to response headers)
    #[arg(
        long,
        env = "UPSTREAM_TIMEOUT_MS",
        default_value_t = 30_000,
        help_heading = "Tuning"
    )]
    pub timeout: u64,

    /// Max request body size in bytes
    #[arg(
        long,
        env = "MAX_BODY_SIZE",
        default_value_t = 1_048_576,
        help_heading = "Tuning"
    )]
    pub max_body: usize,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:8080")]
    pub url: String,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    #[must_use]
    pub const fn to_tracing_level(&self) -> tracing::Level {
        match self {
            Self::Trace => tracing::Level::TRACE,
            Self::Debug => tracing::Level::DEBUG,
            Self::Info => tracing::Level::INFO,
            Self::Warn => tracing::Level::WARN,
            Self::Error => tracing::Level::ERROR,
        }
    }
}
