use std::sync::Arc;

use chrono::Utc;
use tokio::time::Instant;
use tracing::{info, warn};

use crate::args::BenchArgs;
use crate::error::{AppError, AppResult, ValidationError};
use crate::http::{Distribution, HttpTransport, RunConfig, build_client, dispatch};
use crate::metrics::summarize;

use super::export::export_json;
use super::summary::print_report;

/// Validates the arguments, runs the benchmark and prints the report.
///
/// Nothing touches the network until the URL and counts have been validated.
/// Per-request failures never fail the run.
pub(crate) async fn run_local(args: &BenchArgs) -> AppResult<()> {
    let config = build_run_config(args)?;

    let remainder = config
        .total_requests()
        .get()
        .checked_rem(u64::try_from(config.concurrency().get()).unwrap_or(u64::MAX))
        .unwrap_or(0);
    if config.distribution() == Distribution::Truncate && remainder > 0 {
        warn!(
            "{} request(s) do not divide evenly across {} workers and will not be sent; use --even-distribution to send them.",
            remainder,
            config.concurrency().get()
        );
    }

    let client = build_client(&config)?;
    let transport = Arc::new(HttpTransport::new(client));

    let started_at = Utc::now();
    let run_start = Instant::now();
    let outcomes = dispatch(&config, transport).await?;
    let wall_clock = run_start.elapsed();

    let report = summarize(&outcomes, &config, wall_clock);
    drop(outcomes);

    info!(
        success = report.success_count,
        errors = report.error_count,
        "Run finished in {:?}",
        wall_clock
    );

    print_report(&report, args.no_color)?;

    if let Some(path) = args.export_json.as_deref() {
        export_json(path, &report, started_at).await?;
        info!("Report written to {}", path);
    }

    Ok(())
}

pub(super) fn build_run_config(args: &BenchArgs) -> AppResult<RunConfig> {
    let Some(url) = args.url.as_deref() else {
        tracing::error!("Missing URL (set --url or provide in config).");
        return Err(AppError::validation(ValidationError::MissingUrl));
    };
    let distribution = if args.even_distribution {
        Distribution::Even
    } else {
        Distribution::Truncate
    };
    Ok(RunConfig::new(url, args.requests, args.concurrency)?
        .with_distribution(distribution)
        .with_request_timeout(args.request_timeout)
        .with_connect_timeout(args.connect_timeout))
}
