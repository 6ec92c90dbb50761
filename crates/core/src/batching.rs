//! Time-proximity batching of orders.
//!
//! Orders created close together belong to the same pick-up wave. Batches are
//! derived on every load and are not stable identifiers across reloads.

use chrono::Duration;

use crate::types::{BatchNumber, Timestamp};

/// Default idle gap, in seconds, after which the next order opens a new batch.
pub const DEFAULT_BATCH_GAP_SECS: i64 = 3600;

/// [`DEFAULT_BATCH_GAP_SECS`] as a [`Duration`].
pub fn default_batch_gap() -> Duration {
    Duration::seconds(DEFAULT_BATCH_GAP_SECS)
}

/// Assign a batch number to each creation instant.
///
/// `created_at` must be in ascending order. A single left-to-right pass keeps
/// a counter starting at 1; an order whose gap to the immediately preceding
/// order exceeds `max_gap` increments the counter before taking it. Numbers
/// are never reused or merged.
///
/// The output has the same length as the input.
pub fn assign_batches(created_at: &[Timestamp], max_gap: Duration) -> Vec<BatchNumber> {
    let mut batches = Vec::with_capacity(created_at.len());
    let mut current: BatchNumber = 1;
    let mut previous: Option<Timestamp> = None;

    for &at in created_at {
        if let Some(prev) = previous {
            if at - prev > max_gap {
                current += 1;
            }
        }
        batches.push(current);
        previous = Some(at);
    }

    batches
}

/// Distinct batch numbers in ascending order.
pub fn distinct_batches(batches: &[BatchNumber]) -> Vec<BatchNumber> {
    let mut distinct: Vec<BatchNumber> = batches.to_vec();
    distinct.dedup();
    distinct
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
