use std::time::Duration;

pub const PERCENTILE_P95: u64 = 95;
pub const PERCENTILE_P99: u64 = 99;
const PERCENT_DIVISOR: u64 = 100;

/// Nearest-rank percentile over an ascending slice.
///
/// Picks `sorted[floor(len * percentile / 100)]`, clamped to the last
/// element. No interpolation between neighbours. Returns zero for an empty
/// slice.
#[must_use]
pub fn nearest_rank(sorted: &[Duration], percentile: u64) -> Duration {
    let Some(last_index) = sorted.len().checked_sub(1) else {
        return Duration::ZERO;
    };
    let len = u64::try_from(sorted.len()).unwrap_or(u64::MAX);
    let index = len
        .saturating_mul(percentile)
        .checked_div(PERCENT_DIVISOR)
        .unwrap_or(0);
    let idx = usize::try_from(index).map_or(last_index, |value| value.min(last_index));
    sorted.get(idx).copied().unwrap_or_default()
}
