use clap::Parser;
use std::time::Duration;

use super::parsers::{
    parse_bool_env, parse_duration_arg, parse_positive_u64, parse_positive_usize,
};
use super::types::{PositiveU64, PositiveUsize};

#[derive(Debug, Parser, Clone)]
#[clap(
    name = "apibench",
    version,
    about = "API benchmarking tool - fires GET requests from a fixed pool of concurrent workers and reports latency percentiles, throughput and status codes."
)]
pub struct BenchArgs {
    /// Target URL
    #[arg(long, short)]
    pub url: Option<String>,

    /// Total number of requests
    #[arg(long, short = 'r', default_value = "100", value_parser = parse_positive_u64)]
    pub requests: PositiveU64,

    /// Number of concurrent workers
    #[arg(long, short = 'c', default_value = "10", value_parser = parse_positive_usize)]
    pub concurrency: PositiveUsize,

    /// Per-request timeout (supports ms/s/m/h). No timeout when unset.
    #[arg(long = "timeout", value_parser = parse_duration_arg)]
    pub request_timeout: Option<Duration>,

    /// Connect timeout (supports ms/s/m/h). No timeout when unset.
    #[arg(long = "connect-timeout", value_parser = parse_duration_arg)]
    pub connect_timeout: Option<Duration>,

    /// Give the first `requests % concurrency` workers one extra request so every requested call is issued
    #[arg(long = "even-distribution")]
    pub even_distribution: bool,

    /// Write the final report as JSON to this path
    #[arg(long = "export-json")]
    pub export_json: Option<String>,

    /// Path to config file (TOML/JSON). Defaults to ./apibench.toml or ./apibench.json if present.
    #[arg(long)]
    pub config: Option<String>,

    /// Enable verbose logging (sets log level to debug unless overridden by APIBENCH_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Disable color output
    #[arg(long = "no-color", env = "NO_COLOR", value_parser = parse_bool_env)]
    pub no_color: bool,
}
