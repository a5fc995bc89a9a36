use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::error::{AppError, AppResult, SinkError};
use crate::metrics::RunReport;

pub(super) fn report_json(report: &RunReport, started_at: DateTime<Utc>) -> serde_json::Value {
    let status_histogram: BTreeMap<String, u64> = report
        .status_histogram
        .iter()
        .map(|(code, count)| (code.to_string(), *count))
        .collect();
    let failure_kinds: BTreeMap<&'static str, u64> = report
        .failure_kinds
        .iter()
        .map(|(kind, count)| (kind.as_str(), *count))
        .collect();

    serde_json::json!({
        "started_at": started_at.to_rfc3339(),
        "total_requests": report.total_requests,
        "concurrency": report.concurrency,
        "executed_requests": report.executed_requests,
        "dropped_requests": report.dropped_requests(),
        "wall_clock_us": micros(report.wall_clock_duration),
        "success_count": report.success_count,
        "error_count": report.error_count,
        "min_latency_us": micros(report.min_latency),
        "max_latency_us": micros(report.max_latency),
        "average_latency_us": micros(report.average_latency),
        "p95_latency_us": micros(report.p95_latency),
        "p99_latency_us": micros(report.p99_latency),
        "requests_per_second_x100": report.requests_per_second_x100,
        "judgment": report.judgment.as_str(),
        "status_histogram": status_histogram,
        "failure_kinds": failure_kinds
    })
}

pub(super) async fn export_json(
    path: &str,
    report: &RunReport,
    started_at: DateTime<Utc>,
) -> AppResult<()> {
    let payload = report_json(report, started_at);
    let json = serde_json::to_vec_pretty(&payload)
        .map_err(|err| AppError::sink(SinkError::SerializeReport { source: err }))?;

    write_file(path, &json).await.map_err(|err| {
        AppError::sink(SinkError::WriteReport {
            path: PathBuf::from(path),
            source: err,
        })
    })
}

async fn write_file(path: &str, bytes: &[u8]) -> Result<(), std::io::Error> {
    let file = tokio::fs::File::create(path).await?;
    let mut writer = BufWriter::new(file);
    writer.write_all(bytes).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

fn micros(duration: Duration) -> u64 {
    u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
}
