pub mod health;
pub mod orders;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /orders                 report (GET)
/// /orders/reload          invalidate cache and re-query (POST)
/// /orders/export          xlsx download (GET)
/// /orders/force-sync      partner sync for missing codes (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/orders", orders::router())
}

/// Root-level page routes.
pub fn page_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::web::dashboard_page))
}
