//! Command-line interface definitions using clap derive macros.
//!
//! Contains the top-level [`Cli`] parser, the [`Commands`] enum for
//! subcommands (origin, proxy, health), and their associated argument
//! structs. Every flag has an environment variable equivalent for
//! container deployments.

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "apirelay",
    version,
    about = "HTTP pass-through relay demo",
    propagate_version = true,
    after_help = "\x1b[1mQuick start:\x1b[0m\n  \
        apirelay origin                      Start the origin service on :3000\n  \
        apirelay proxy                       Start the forwarding proxy on :3001\n  \
        apirelay health                      Probe the proxy's /health endpoint"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the origin service
    Origin(OriginArgs),

    /// Start the forwarding proxy
    Proxy(ProxyArgs),

    /// Check health of a running instance
    Health(HealthArgs),
}

#[derive(Args)]
pub struct OriginArgs {
    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Max request body size in bytes
    #[arg(long, env = "MAX_BODY_SIZE", default_value_t = 1_048_576)]
    pub max_body: usize,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Args)]
#[command(after_help = "\x1b[1mExamples:\x1b[0m\n  \
        apirelay proxy                                     Relay to http://localhost:3000\n  \
        apirelay proxy -p 8081 --origin-url http://api:3000\n  \
        apirelay proxy --timeout 2000 --pretty             Local dev mode")]
pub struct ProxyArgs {
    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Listen address
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Base URL of the origin service
    #[arg(
        long,
        env = "ORIGIN_URL",
        default_value = "http://localhost:3000",
        value_name = "URL"
    )]
    pub origin_url: String,

    /// Outbound request timeout in milliseconds
    #[arg(long, env = "REQUEST_TIMEOUT_MS", default_value_t = 10_000)]
    pub timeout: u64,

    /// Max request body size in bytes
    #[arg(long, env = "MAX_BODY_SIZE", default_value_t = 1_048_576)]
    pub max_body: usize,

    #[command(flatten)]
    pub log: LogArgs,
}

#[derive(Args)]
pub struct HealthArgs {
    /// URL of the running instance
    #[arg(default_value = "http://localhost:3001")]
    pub url: String,

    /// Health endpoint path ("/health" for the proxy, "/api/health" for the origin)
    #[arg(long, default_value = "/health")]
    pub path: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct LogArgs {
    /// Log level
    #[arg(short, long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: LogLevel,

    /// Force pretty (human-readable) log output
    #[arg(long)]
    pub pretty: bool,

    /// Force JSON log output (overrides TTY detection)
    #[arg(long, conflicts_with = "pretty")]
    pub json: bool,
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
