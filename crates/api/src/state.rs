use std::sync::Arc;

use ceo_db::store::OrderStore;
use ceo_sync::SyncDispatcher;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Cached order snapshots for the configured client.
    pub orders: Arc<OrderStore>,
    /// Partner force-sync fan-out.
    pub sync: Arc<SyncDispatcher>,
    pub config: Arc<ServerConfig>,
}
