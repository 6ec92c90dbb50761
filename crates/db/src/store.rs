//! Cached order snapshots.

use std::sync::Arc;
use std::time::Duration;

use ceo_core::order::Order;
use ceo_core::types::{ClientId, Timestamp};

use crate::cache::{CacheKey, QueryCache};
use crate::source::OrderSource;

/// Default lifetime of a cached snapshot (60 seconds).
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

/// An immutable, shared snapshot of orders, oldest first.
pub type OrderSnapshot = Arc<Vec<Order>>;

/// Loads order snapshots through an [`OrderSource`], memoizing successful
/// results for a short TTL.
///
/// Constructed once at startup and injected into handlers; there is no
/// process-wide cache.
pub struct OrderStore {
    source: Arc<dyn OrderSource>,
    cache: QueryCache<OrderSnapshot>,
}

impl OrderStore {
    pub fn new(source: Arc<dyn OrderSource>, ttl: Duration) -> Self {
        Self {
            source,
            cache: QueryCache::new(ttl),
        }
    }

    /// Orders of `client_id` since `since`, from cache when fresh.
    ///
    /// Errors are returned as-is and never cached; the next call queries
    /// again.
    pub async fn load(
        &self,
        client_id: ClientId,
        since: Timestamp,
    ) -> Result<OrderSnapshot, sqlx::Error> {
        let key = CacheKey::new(
            self.source.query_text(),
            vec![client_id.to_string(), since.to_rfc3339()],
        );

        if let Some(snapshot) = self.cache.get(&key).await {
            tracing::debug!(%client_id, %since, rows = snapshot.len(), "Order snapshot served from cache");
            return Ok(snapshot);
        }

        let orders = self.source.list_since(client_id, since).await?;
        tracing::info!(%client_id, %since, rows = orders.len(), "Order snapshot loaded");

        let snapshot: OrderSnapshot = Arc::new(orders);
        self.cache.insert(key, Arc::clone(&snapshot)).await;
        Ok(snapshot)
    }

    /// Whether the backing store answers.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        self.source.ping().await
    }

    /// Number of snapshots in the cache, expired ones included until pruned.
    pub async fn cached_snapshots(&self) -> usize {
        self.cache.len().await
    }

    /// Forget every cached snapshot so the next [`load`](Self::load) queries.
    pub async fn invalidate(&self) {
        self.cache.invalidate_all().await;
        tracing::info!("Order snapshot cache invalidated");
    }
}
