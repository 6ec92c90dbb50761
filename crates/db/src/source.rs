//! The seam [`crate::store::OrderStore`] reads orders through.

use async_trait::async_trait;
use ceo_core::order::Order;
use ceo_core::types::{ClientId, Timestamp};

use crate::repositories::OrderRepo;
use crate::DbPool;

/// Something that can list a client's orders since an instant.
#[async_trait]
pub trait OrderSource: Send + Sync {
    /// SQL text identifying the query, used as part of the cache key.
    fn query_text(&self) -> String;

    /// Orders of `client_id` created at or after `since`, oldest first.
    async fn list_since(
        &self,
        client_id: ClientId,
        since: Timestamp,
    ) -> Result<Vec<Order>, sqlx::Error>;

    /// Confirm the backing store is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// [`OrderSource`] backed by the Postgres order store.
pub struct PgOrderSource {
    pool: DbPool,
}

impl PgOrderSource {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl OrderSource for PgOrderSource {
    fn query_text(&self) -> String {
        OrderRepo::list_since_sql()
    }

    async fn list_since(
        &self,
        client_id: ClientId,
        since: Timestamp,
    ) -> Result<Vec<Order>, sqlx::Error> {
        OrderRepo::list_since(&self.pool, client_id, since).await
    }

    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
