use std::collections::BTreeMap;
use std::time::Duration;

use crate::http::RunConfig;

use super::percentiles::{PERCENTILE_P95, PERCENTILE_P99, nearest_rank};
use super::{LatencyJudgment, RequestOutcome, RunReport};

const MICROS_PER_SEC: u128 = 1_000_000;
const RATE_SCALE: u128 = 100;

/// Builds the report for a finished run.
///
/// Pure over its inputs: the same outcomes, config and wall clock always give
/// the same report.
#[must_use]
pub fn summarize(
    outcomes: &[RequestOutcome],
    config: &RunConfig,
    wall_clock_duration: Duration,
) -> RunReport {
    let mut latencies: Vec<Duration> = Vec::with_capacity(outcomes.len());
    let mut status_histogram: BTreeMap<u16, u64> = BTreeMap::new();
    let mut failure_kinds = BTreeMap::new();
    let mut error_count: u64 = 0;

    for outcome in outcomes {
        match outcome.error() {
            None => {
                latencies.push(outcome.duration());
                let count = status_histogram.entry(outcome.status_code()).or_insert(0);
                *count = count.saturating_add(1);
            }
            Some(failure) => {
                error_count = error_count.saturating_add(1);
                let count = failure_kinds.entry(failure.kind).or_insert(0u64);
                *count = count.saturating_add(1);
            }
        }
    }

    latencies.sort_unstable();

    let success_count = u64::try_from(latencies.len()).unwrap_or(u64::MAX);
    let average_latency = average(&latencies);

    RunReport {
        total_requests: config.total_requests().get(),
        concurrency: config.concurrency().get(),
        executed_requests: u64::try_from(outcomes.len()).unwrap_or(u64::MAX),
        wall_clock_duration,
        success_count,
        error_count,
        min_latency: latencies.first().copied().unwrap_or_default(),
        max_latency: latencies.last().copied().unwrap_or_default(),
        average_latency,
        p95_latency: nearest_rank(&latencies, PERCENTILE_P95),
        p99_latency: nearest_rank(&latencies, PERCENTILE_P99),
        requests_per_second_x100: requests_per_second_x100(success_count, wall_clock_duration),
        status_histogram,
        failure_kinds,
        judgment: LatencyJudgment::classify(average_latency),
    }
}

fn average(latencies: &[Duration]) -> Duration {
    let total_nanos = latencies
        .iter()
        .fold(0u128, |acc, latency| acc.saturating_add(latency.as_nanos()));
    let count = u128::try_from(latencies.len()).unwrap_or(u128::MAX);
    let avg = total_nanos.checked_div(count).unwrap_or(0);
    Duration::from_nanos(u64::try_from(avg).unwrap_or(u64::MAX))
}

/// Successful requests per second, scaled by 100 and rounded half-up to the
/// nearest hundredth. A zero wall clock counts as one microsecond.
fn requests_per_second_x100(success_count: u64, wall_clock: Duration) -> u64 {
    let micros = wall_clock.as_micros().max(1);
    let scaled = u128::from(success_count)
        .saturating_mul(RATE_SCALE)
        .saturating_mul(MICROS_PER_SEC)
        .saturating_add(micros.checked_div(2).unwrap_or(0))
        .checked_div(micros)
        .unwrap_or(0);
    u64::try_from(scaled).unwrap_or(u64::MAX)
}
