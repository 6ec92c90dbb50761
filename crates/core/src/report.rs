//! Report projection: batching, logistics-code normalization, filtering and
//! summary counts for the orders table and its export.

use std::collections::HashSet;
use std::fmt::Display;

use chrono::{DateTime, Duration, FixedOffset};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::batching::{assign_batches, distinct_batches};
use crate::error::CoreError;
use crate::order::Order;
use crate::types::{BatchNumber, ClientId, Timestamp};

/// Prefix the partner platform uses when displaying logistics codes.
pub const LOGISTICS_CODE_PREFIX: &str = "LO-";

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One row of the orders table: an order, its batch, and display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub batch: BatchNumber,
    pub order_id: String,
    pub barcode: Option<String>,
    pub routing_order_number: Option<String>,
    pub market_order_id: Option<String>,
    pub request_id: Option<String>,
    pub claim_id: Option<String>,
    pub tariff: Option<String>,
    pub platform_status: Option<String>,
    pub claim_status: Option<String>,
    /// Creation time in the dashboard's zone.
    pub created_at: DateTime<FixedOffset>,
    /// Display form of the logistics code; `None` marks a missing code.
    pub logistics_code: Option<String>,
    pub client_id: ClientId,
}

impl ReportRow {
    pub fn is_missing_code(&self) -> bool {
        self.logistics_code.is_none()
    }
}

/// Counters shown above the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ReportSummary {
    /// Rows in the filtered subset.
    pub total: usize,
    /// Rows in the filtered subset without a logistics code.
    pub missing: usize,
    /// Distinct orders a force sync would target in the filtered subset.
    pub selected: usize,
}

/// Filters chosen by the user. An empty `batches` list selects every batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReportFilter {
    #[serde(default)]
    pub batches: Vec<BatchNumber>,
    #[serde(default)]
    pub missing_only: bool,
}

impl ReportFilter {
    /// Whether `row` passes both the batch and missing-only filters.
    pub fn matches(&self, row: &ReportRow) -> bool {
        let batch_ok = self.batches.is_empty() || self.batches.contains(&row.batch);
        let missing_ok = !self.missing_only || row.is_missing_code();
        batch_ok && missing_ok
    }

    pub fn apply(&self, rows: Vec<ReportRow>) -> Vec<ReportRow> {
        rows.into_iter().filter(|row| self.matches(row)).collect()
    }
}

/// The orders table as rendered and exported.
#[derive(Debug, Clone, Serialize)]
pub struct OrderReport {
    pub rows: Vec<ReportRow>,
    pub summary: ReportSummary,
    /// Batch numbers present in the full snapshot, for the batch selector.
    pub available_batches: Vec<BatchNumber>,
    /// Orders in the full snapshot before filtering.
    pub snapshot_total: usize,
}

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Display form of a raw logistics code.
///
/// Present codes get [`LOGISTICS_CODE_PREFIX`]; absent or blank codes stay
/// absent so that every downstream check can treat `None` as "missing".
pub fn normalize_logistics_code<T: Display>(raw: Option<T>) -> Option<String> {
    let text = raw?.to_string();
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(format!("{LOGISTICS_CODE_PREFIX}{trimmed}"))
}

/// Pair each order with its batch number and convert display fields.
///
/// `orders` and `batches` must have the same length.
pub fn project_rows(orders: &[Order], batches: &[BatchNumber], tz: Tz) -> Vec<ReportRow> {
    orders
        .iter()
        .zip(batches)
        .map(|(order, &batch)| ReportRow {
            batch,
            order_id: order.order_id.clone(),
            barcode: order.client_order_number.clone(),
            routing_order_number: order.routing_order_number.clone(),
            market_order_id: order.market_order_id.clone(),
            request_id: order.request_id.clone(),
            claim_id: order.claim_id.clone(),
            tariff: order.tariff.clone(),
            platform_status: order.logistic_status.clone(),
            claim_status: order.claim_status.clone(),
            created_at: order.created_at.with_timezone(&tz).fixed_offset(),
            logistics_code: normalize_logistics_code(order.logistics_code.as_deref()),
            client_id: order.client_id,
        })
        .collect()
}

/// Summary counts over exactly the rows given.
///
/// Call this with the filtered rows; the counters must describe what the
/// user is looking at, not the full snapshot.
pub fn summarize(rows: &[ReportRow]) -> ReportSummary {
    ReportSummary {
        total: rows.len(),
        missing: rows.iter().filter(|row| row.is_missing_code()).count(),
        selected: sync_targets(rows).len(),
    }
}

/// Distinct order ids of rows without a logistics code, in first-seen order.
pub fn sync_targets(rows: &[ReportRow]) -> Vec<String> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| row.is_missing_code())
        .filter(|row| seen.insert(row.order_id.as_str()))
        .map(|row| row.order_id.clone())
        .collect()
}

/// Build the report for a snapshot.
///
/// Batches are computed over the full, time-ordered snapshot before the
/// filter is applied, so filtering never changes batch membership.
pub fn build_report(
    orders: &[Order],
    tz: Tz,
    max_gap: Duration,
    filter: &ReportFilter,
) -> OrderReport {
    let created: Vec<Timestamp> = orders.iter().map(|o| o.created_at).collect();
    let batches = assign_batches(&created, max_gap);
    let available_batches = distinct_batches(&batches);

    let rows = filter.apply(project_rows(orders, &batches, tz));
    let summary = summarize(&rows);

    OrderReport {
        rows,
        summary,
        available_batches,
        snapshot_total: orders.len(),
    }
}

/// Parse a comma-separated batch list such as `"1,3"`.
///
/// Blank input selects every batch.
pub fn parse_batch_list(input: &str) -> Result<Vec<BatchNumber>, CoreError> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<BatchNumber>()
                .ok()
                .filter(|&n| n >= 1)
                .ok_or_else(|| CoreError::Validation(format!("Invalid batch number '{s}'")))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
