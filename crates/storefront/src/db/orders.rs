//! Order repository for database operations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::SqlitePool;

use sic_marketplace_core::{BuyerId, OrderId, OrderStatus};

use super::{RepositoryError, insert_error, parse_decimal};
use crate::models::Order;

const ORDER_COLUMNS: &str = "id, buyer_id, total_price, status, created_at";

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    buyer_id: BuyerId,
    total_price: String,
    status: OrderStatus,
    created_at: DateTime<Utc>,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            buyer_id: row.buyer_id,
            total_price: parse_decimal(&row.total_price, "total_price")?,
            status: row.status,
            created_at: row.created_at,
        })
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Record a paid order and return the new id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if `buyer_id` does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(&self, buyer_id: BuyerId, total: Decimal) -> Result<OrderId, RepositoryError> {
        let id = sqlx::query_scalar::<_, OrderId>(
            "INSERT INTO orders (buyer_id, total_price, status) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(buyer_id)
        .bind(format!("{total:.2}"))
        .bind(OrderStatus::Paid)
        .fetch_one(self.pool)
        .await
        .map_err(|e| insert_error(e, "order"))?;

        tracing::debug!(order_id = %id, buyer_id = %buyer_id, %total, "Order recorded");
        Ok(id)
    }

    /// A buyer's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored total is invalid.
    pub async fn list_by_buyer(&self, buyer_id: BuyerId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE buyer_id = ? ORDER BY id DESC"
        ))
        .bind(buyer_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Get an order by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored total is invalid.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }
}
