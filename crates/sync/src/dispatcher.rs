//! Bounded fan-out of force-sync calls.
//!
//! One task per unique order id is spawned onto a [`JoinSet`]; each task
//! waits for a semaphore permit before calling the target, so at most
//! `max_in_flight` requests run at once. [`SyncDispatcher::dispatch`] returns
//! only after every task has settled. A failed request never aborts the
//! others and is not retried.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::client::SyncTarget;
use crate::config::DEFAULT_MAX_IN_FLIGHT;

/// Outcome counts of one dispatch. Used for logging; callers do not report
/// individual results to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SyncSummary {
    pub requested: usize,
    pub succeeded: usize,
    pub failed: usize,
}

pub struct SyncDispatcher {
    target: Arc<dyn SyncTarget>,
    max_in_flight: usize,
}

impl SyncDispatcher {
    /// `max_in_flight` of zero is treated as one.
    pub fn new(target: Arc<dyn SyncTarget>, max_in_flight: usize) -> Self {
        Self {
            target,
            max_in_flight: max_in_flight.max(1),
        }
    }

    pub fn with_default_limit(target: Arc<dyn SyncTarget>) -> Self {
        Self::new(target, DEFAULT_MAX_IN_FLIGHT)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight
    }

    /// Force-sync every distinct id in `order_ids` and wait for all of them.
    pub async fn dispatch<I>(&self, order_ids: I) -> SyncSummary
    where
        I: IntoIterator<Item = String>,
    {
        let mut seen = HashSet::new();
        let ids: Vec<String> = order_ids
            .into_iter()
            .filter(|id| seen.insert(id.clone()))
            .collect();

        let mut summary = SyncSummary {
            requested: ids.len(),
            ..SyncSummary::default()
        };
        if ids.is_empty() {
            return summary;
        }

        tracing::info!(
            requested = summary.requested,
            max_in_flight = self.max_in_flight,
            "Force sync started"
        );

        let permits = Arc::new(Semaphore::new(self.max_in_flight));
        let mut tasks = JoinSet::new();

        for order_id in ids {
            let permits = Arc::clone(&permits);
            let target = Arc::clone(&self.target);
            tasks.spawn(async move {
                // The semaphore is never closed, so acquisition only fails
                // if that invariant is broken; report it as a failed call.
                let Ok(_permit) = permits.acquire_owned().await else {
                    tracing::error!(%order_id, "Force sync permit unavailable");
                    return false;
                };
                match target.force_sync(&order_id).await {
                    Ok(()) => {
                        tracing::debug!(%order_id, "Force sync accepted");
                        true
                    }
                    Err(e) => {
                        tracing::warn!(%order_id, error = %e, "Force sync failed");
                        false
                    }
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(true) => summary.succeeded += 1,
                Ok(false) => summary.failed += 1,
                Err(e) => {
                    tracing::error!(error = %e, "Force sync task panicked");
                    summary.failed += 1;
                }
            }
        }

        tracing::info!(
            requested = summary.requested,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Force sync finished"
        );
        summary
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
