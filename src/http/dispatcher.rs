use std::sync::Arc;

use futures_util::future::try_join_all;
use tokio::time::Instant;
use tracing::{debug, info, trace};
use url::Url;

use crate::error::AppResult;
use crate::metrics::RequestOutcome;

use super::{RunConfig, Transport, plan_workers};

/// Upper bound on outcome slots reserved before any request has run. Larger
/// runs grow their buffers as outcomes arrive.
pub(super) const MAX_RESERVED_OUTCOMES: u64 = 1 << 16;

/// Runs every planned request and returns the merged outcomes.
///
/// One task is spawned per concurrency slot. Each task fills a private buffer
/// and the buffers are concatenated after all tasks have been joined, so the
/// result is only produced once every iteration has finished.
///
/// # Errors
///
/// Returns an error if a worker task panics or is cancelled. Individual
/// request failures are recorded as outcomes and never returned here.
pub async fn dispatch<T>(config: &RunConfig, transport: Arc<T>) -> AppResult<Vec<RequestOutcome>>
where
    T: Transport + 'static,
{
    let plan = plan_workers(
        config.total_requests(),
        config.concurrency(),
        config.distribution(),
    );
    let planned = plan
        .iter()
        .fold(0u64, |acc, iterations| acc.saturating_add(*iterations));
    info!(
        url = %config.target_url(),
        workers = plan.len(),
        requests = planned,
        "Dispatching requests"
    );

    let mut handles = Vec::with_capacity(plan.len());
    for (worker_id, iterations) in plan.into_iter().enumerate() {
        let transport = Arc::clone(&transport);
        let url = config.target_url().clone();
        handles.push(tokio::spawn(run_worker(
            worker_id, iterations, url, transport,
        )));
    }

    let buffers = try_join_all(handles).await?;
    let mut outcomes = Vec::with_capacity(capacity_hint(planned));
    for buffer in buffers {
        outcomes.extend(buffer);
    }

    info!(outcomes = outcomes.len(), "All workers finished");
    Ok(outcomes)
}

async fn run_worker<T>(
    worker_id: usize,
    iterations: u64,
    url: Url,
    transport: Arc<T>,
) -> Vec<RequestOutcome>
where
    T: Transport,
{
    let mut outcomes = Vec::with_capacity(capacity_hint(iterations));
    for _ in 0..iterations {
        let start = Instant::now();
        let result = transport.get(&url).await;
        let elapsed = start.elapsed();
        match result {
            Ok(response) => {
                let status_code = T::status_code(&response);
                transport.drain(response).await;
                outcomes.push(RequestOutcome::success(elapsed, status_code));
            }
            Err(failure) => {
                trace!(worker_id, "Request failed: {}", failure);
                outcomes.push(RequestOutcome::failure(elapsed, failure));
            }
        }
    }
    debug!(worker_id, requests = outcomes.len(), "Worker finished");
    outcomes
}

pub(super) fn capacity_hint(requests: u64) -> usize {
    usize::try_from(requests.min(MAX_RESERVED_OUTCOMES)).unwrap_or(0)
}
