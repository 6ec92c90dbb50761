//! Repository for the `orders` table (read-only).

use ceo_core::order::Order;
use ceo_core::types::{ClientId, Timestamp};
use sqlx::PgPool;

use crate::models::order::OrderRow;

/// Column list for order queries.
///
/// Ids are cast to text so the dashboard does not depend on the store's key
/// type, and the logistics code is cast so numeric codes read the same way.
const COLUMNS: &str = "id::text AS order_id, \
     client_order_number, \
     routing_order_number, \
     market_order_id, \
     request_id, \
     claim_id, \
     tariff, \
     logistic_status, \
     claim_status, \
     created_at, \
     logistics_code::text AS logistics_code, \
     client_id";

/// Reads CE orders for the dashboard.
pub struct OrderRepo;

impl OrderRepo {
    /// SQL text of [`OrderRepo::list_since`]. Also used as a cache key.
    pub fn list_since_sql() -> String {
        format!(
            "SELECT {COLUMNS} FROM orders \
             WHERE client_id = $1 AND created_at >= $2 \
             ORDER BY created_at ASC"
        )
    }

    /// All orders of `client_id` created at or after `since`, oldest first.
    pub async fn list_since(
        pool: &PgPool,
        client_id: ClientId,
        since: Timestamp,
    ) -> Result<Vec<Order>, sqlx::Error> {
        let query = Self::list_since_sql();
        let rows = sqlx::query_as::<_, OrderRow>(&query)
            .bind(client_id)
            .bind(since)
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(Order::from).collect())
    }
}
