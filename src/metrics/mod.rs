//! Outcome types, report aggregation and percentile utilities.
mod judgment;
mod percentiles;
mod summary;
mod types;


pub use judgment::LatencyJudgment;
pub use percentiles::{PERCENTILE_P95, PERCENTILE_P99, nearest_rank};
pub use summary::summarize;
pub use types::{FailureKind, RequestFailure, RequestOutcome, RunReport};
