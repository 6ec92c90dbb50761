//! Order row model.

use ceo_core::order::Order;
use ceo_core::types::{ClientId, Timestamp};
use sqlx::FromRow;

/// A row from the `orders` projection used by the dashboard.
#[derive(Debug, Clone, FromRow)]
pub struct OrderRow {
    pub order_id: String,
    pub client_order_number: Option<String>,
    pub routing_order_number: Option<String>,
    pub market_order_id: Option<String>,
    pub request_id: Option<String>,
    pub claim_id: Option<String>,
    pub tariff: Option<String>,
    pub logistic_status: Option<String>,
    pub claim_status: Option<String>,
    pub created_at: Timestamp,
    pub logistics_code: Option<String>,
    pub client_id: ClientId,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Order {
            order_id: row.order_id,
            client_order_number: row.client_order_number,
            routing_order_number: row.routing_order_number,
            market_order_id: row.market_order_id,
            request_id: row.request_id,
            claim_id: row.claim_id,
            tariff: row.tariff,
            logistic_status: row.logistic_status,
            claim_status: row.claim_status,
            created_at: row.created_at,
            logistics_code: row.logistics_code,
            client_id: row.client_id,
        }
    }
}
