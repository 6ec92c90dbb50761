use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Whether the order store is reachable.
    pub db_healthy: bool,
    /// Order snapshots currently held in the query cache.
    pub cached_snapshots: usize,
}

/// GET /health
///
/// Pings the order store and reports the cache size. An unreachable store
/// gives `degraded` with status 200.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match state.orders.ping().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Order store ping failed");
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        cached_snapshots: state.orders.cached_snapshots().await,
    })
}

/// Mount health check routes (root level, not under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
