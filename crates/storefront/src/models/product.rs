//! Product domain type.

use chrono::{DateTime, Utc};
use serde::Serialize;

use sic_marketplace_core::{Category, LineItem, Price, ProductId, SellerId};

/// A catalog entry listed by a seller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub category: Category,
    pub seller_id: SellerId,
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Snapshot this product as a cart line item at its current price.
    #[must_use]
    pub fn to_line_item(&self) -> LineItem {
        LineItem {
            product_id: self.id,
            name: self.name.clone(),
            price: self.price,
        }
    }
}
