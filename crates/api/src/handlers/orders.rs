//! Handlers for the CE orders report, its export, and the force-sync action.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use ceo_core::report::{build_report, parse_batch_list, sync_targets, OrderReport, ReportFilter};
use ceo_core::window::{export_file_name, local_date, lookback_start};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::export::{orders_workbook, XLSX_CONTENT_TYPE};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query params shared by the report and export endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    /// Comma-separated batch numbers, e.g. `1,3`. Absent or blank means all.
    pub batches: Option<String>,
    #[serde(default)]
    pub missing_only: bool,
}

impl ReportQuery {
    pub fn to_filter(&self) -> AppResult<ReportFilter> {
        let batches = match self.batches.as_deref() {
            Some(list) => parse_batch_list(list)?,
            None => Vec::new(),
        };
        Ok(ReportFilter {
            batches,
            missing_only: self.missing_only,
        })
    }
}

/// Response of `POST /orders/force-sync`.
#[derive(Debug, Serialize)]
pub struct ForceSyncResponse {
    /// Number of distinct orders a sync was requested for.
    pub requested: usize,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load the current snapshot (cached) and build the filtered report.
async fn load_report(state: &AppState, filter: &ReportFilter) -> AppResult<OrderReport> {
    let dashboard = &state.config.dashboard;
    let since = lookback_start(Utc::now(), dashboard.timezone);
    let snapshot = state.orders.load(dashboard.client_id, since).await?;
    Ok(build_report(
        &snapshot,
        dashboard.timezone,
        dashboard.batch_gap(),
        filter,
    ))
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/orders
///
/// Returns the filtered report with summary counters.
pub async fn get_report(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = params.to_filter()?;
    let report = load_report(&state, &filter).await?;
    Ok(Json(DataResponse { data: report }))
}

/// POST /api/v1/orders/reload
///
/// Drops the cached snapshot and returns a freshly queried report.
pub async fn reload(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = params.to_filter()?;
    state.orders.invalidate().await;
    let report = load_report(&state, &filter).await?;
    Ok(Json(DataResponse { data: report }))
}

/// GET /api/v1/orders/export
///
/// Downloads the filtered table as `ce_orders_<date>.xlsx`.
pub async fn export(
    State(state): State<AppState>,
    Query(params): Query<ReportQuery>,
) -> AppResult<impl IntoResponse> {
    let filter = params.to_filter()?;
    let report = load_report(&state, &filter).await?;

    let bytes = orders_workbook(&report.rows)
        .map_err(|e| AppError::InternalError(format!("Failed to build workbook: {e}")))?;

    let today = local_date(Utc::now(), state.config.dashboard.timezone);
    let disposition = format!("attachment; filename=\"{}\"", export_file_name(today));

    tracing::info!(rows = report.rows.len(), bytes = bytes.len(), "Orders exported");

    Ok((
        StatusCode::OK,
        [
            (CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}

/// POST /api/v1/orders/force-sync
///
/// Requests a partner sync for every order without a logistics code in the
/// filtered subset, waits for all requests to settle, and drops the cached
/// snapshot. Refused unless `missing_only` is set.
///
/// Once started, the batch always runs to completion and invalidates the
/// cache, even if the request itself times out or is abandoned.
pub async fn force_sync(
    State(state): State<AppState>,
    Json(filter): Json<ReportFilter>,
) -> AppResult<impl IntoResponse> {
    if !filter.missing_only {
        return Err(AppError::BadRequest(
            "Force sync requires the missing-only filter".to_string(),
        ));
    }

    let report = load_report(&state, &filter).await?;
    let targets = sync_targets(&report.rows);
    let requested = targets.len();

    // Dropping the request drops only this handle; the batch runs to the end.
    let sync = Arc::clone(&state.sync);
    let orders = Arc::clone(&state.orders);
    let run = tokio::spawn(async move {
        let summary = sync.dispatch(targets).await;
        orders.invalidate().await;
        tracing::info!(
            requested = summary.requested,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Force sync batch complete"
        );
    });

    run.await
        .map_err(|e| AppError::InternalError(format!("Force sync task failed: {e}")))?;

    Ok(Json(DataResponse {
        data: ForceSyncResponse { requested },
    }))
}
