//! The CE order record as read from the order store.

use serde::Serialize;

use crate::types::{ClientId, Timestamp};

/// A single CE order. Read-only: the dashboard never writes orders back.
///
/// Text columns other than `order_id` are nullable in the store, so they are
/// carried as `Option<String>` and rendered blank when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    /// Internal order id, sent as the body of force-sync calls.
    pub order_id: String,
    /// Client order number, printed as the parcel barcode.
    pub client_order_number: Option<String>,
    pub routing_order_number: Option<String>,
    pub market_order_id: Option<String>,
    pub request_id: Option<String>,
    pub claim_id: Option<String>,
    pub tariff: Option<String>,
    /// Status reported by the partner logistics platform.
    pub logistic_status: Option<String>,
    pub claim_status: Option<String>,
    pub created_at: Timestamp,
    /// Raw logistics code; absent until the partner platform assigns one.
    pub logistics_code: Option<String>,
    pub client_id: ClientId,
}
