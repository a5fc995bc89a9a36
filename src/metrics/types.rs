use std::collections::BTreeMap;
use std::time::Duration;

use thiserror::Error;

use super::LatencyJudgment;

/// Broad class of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FailureKind {
    Timeout,
    Connect,
    Request,
    Other,
}

impl FailureKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FailureKind::Timeout => "timeout",
            FailureKind::Connect => "connect",
            FailureKind::Request => "request",
            FailureKind::Other => "other",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} error: {message}")]
pub struct RequestFailure {
    pub kind: FailureKind,
    pub message: String,
}

impl RequestFailure {
    #[must_use]
    pub const fn new(kind: FailureKind, message: String) -> Self {
        Self { kind, message }
    }
}

/// Result of one attempted call. A status code and an error never coexist:
/// failed calls keep the `0` status sentinel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestOutcome {
    duration: Duration,
    status_code: u16,
    error: Option<RequestFailure>,
}

impl RequestOutcome {
    #[must_use]
    pub const fn success(duration: Duration, status_code: u16) -> Self {
        Self {
            duration,
            status_code,
            error: None,
        }
    }

    #[must_use]
    pub const fn failure(duration: Duration, failure: RequestFailure) -> Self {
        Self {
            duration,
            status_code: 0,
            error: Some(failure),
        }
    }

    #[must_use]
    pub const fn duration(&self) -> Duration {
        self.duration
    }

    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    #[must_use]
    pub const fn error(&self) -> Option<&RequestFailure> {
        self.error.as_ref()
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Aggregate view of a finished run. Latency fields cover successful
/// outcomes only and are zero when nothing succeeded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub total_requests: u64,
    pub concurrency: usize,
    pub executed_requests: u64,
    pub wall_clock_duration: Duration,
    pub success_count: u64,
    pub error_count: u64,
    pub min_latency: Duration,
    pub max_latency: Duration,
    pub average_latency: Duration,
    pub p95_latency: Duration,
    pub p99_latency: Duration,
    pub requests_per_second_x100: u64,
    pub status_histogram: BTreeMap<u16, u64>,
    pub failure_kinds: BTreeMap<FailureKind, u64>,
    pub judgment: LatencyJudgment,
}

impl RunReport {
    /// Requests issued but never executed because of truncating division.
    #[must_use]
    pub const fn dropped_requests(&self) -> u64 {
        self.total_requests.saturating_sub(self.executed_requests)
    }
}
