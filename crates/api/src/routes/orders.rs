//! Route definitions for the CE orders report.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Order routes mounted at `/orders`.
///
/// ```text
/// GET  /             -> get_report
/// POST /reload       -> reload
/// GET  /export       -> export
/// POST /force-sync   -> force_sync
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::get_report))
        .route("/reload", post(orders::reload))
        .route("/export", get(orders::export))
        .route("/force-sync", post(orders::force_sync))
}
