//! The dashboard page.

use axum::response::{Html, IntoResponse};

/// GET /
///
/// Static page; all data is fetched from `/api/v1/orders` by the page itself.
pub async fn dashboard_page() -> impl IntoResponse {
    Html(include_str!("../web/dashboard.html"))
}
