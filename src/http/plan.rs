use crate::args::{PositiveU64, PositiveUsize};

/// How the total request count is split across workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distribution {
    /// `total / concurrency` per worker; the remainder is never issued.
    #[default]
    Truncate,
    /// The first `total % concurrency` workers run one extra request.
    Even,
}

/// Iteration count for each worker, indexed by worker id.
///
/// Always returns exactly `concurrency` entries, some of which may be zero.
#[must_use]
pub fn plan_workers(
    total_requests: PositiveU64,
    concurrency: PositiveUsize,
    distribution: Distribution,
) -> Vec<u64> {
    let workers = concurrency.get();
    let workers_u64 = u64::try_from(workers).unwrap_or(u64::MAX);
    let total = total_requests.get();
    let per_worker = total.checked_div(workers_u64).unwrap_or(0);
    let remainder = total.checked_rem(workers_u64).unwrap_or(0);

    (0..workers)
        .map(|index| {
            let index = u64::try_from(index).unwrap_or(u64::MAX);
            let extra = u64::from(distribution == Distribution::Even && index < remainder);
            per_worker.saturating_add(extra)
        })
        .collect()
}
