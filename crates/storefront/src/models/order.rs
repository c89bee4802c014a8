//! Order domain type.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use sic_marketplace_core::{BuyerId, OrderId, OrderStatus};

/// A checked-out cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    pub id: OrderId,
    pub buyer_id: BuyerId,
    /// Amount charged, tax included.
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
