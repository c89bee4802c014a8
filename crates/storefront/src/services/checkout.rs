//! Checkout service.
//!
//! Prices a cart and records the result as a paid order. No payment is
//! taken and no stock is reserved.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::SqlitePool;
use thiserror::Error;

use sic_marketplace_core::{BuyerId, Cart, CartTotals};

use crate::db::{OrderRepository, RepositoryError};
use crate::models::Order;

/// Errors that can occur during checkout.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart is empty.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// The outcome of a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub order: Order,
    pub totals: CartTotals,
}

/// Checkout service.
pub struct CheckoutService<'a> {
    orders: OrderRepository<'a>,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            orders: OrderRepository::new(pool),
        }
    }

    /// Record `cart` as a paid order for `buyer_id`.
    ///
    /// The caller is responsible for clearing the cart afterwards.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::InvalidInput` if the cart is empty.
    /// Returns `CheckoutError::Repository` if the order cannot be stored.
    pub async fn checkout(
        &self,
        buyer_id: BuyerId,
        cart: &Cart,
        tax_rate: Decimal,
    ) -> Result<Receipt, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::InvalidInput("cart is empty".to_owned()));
        }

        let totals = cart.totals(tax_rate);
        let order_id = self.orders.create(buyer_id, totals.total).await?;
        tracing::info!(
            order_id = %order_id,
            buyer_id = %buyer_id,
            items = totals.item_count,
            total = %totals.total,
            "Order placed"
        );

        let order = self
            .orders
            .get_by_id(order_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;

        Ok(Receipt { order, totals })
    }

    /// A buyer's past orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::Repository` if the query fails.
    pub async fn order_history(&self, buyer_id: BuyerId) -> Result<Vec<Order>, CheckoutError> {
        Ok(self.orders.list_by_buyer(buyer_id).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::BuyerRepository;
    use crate::db::tests::test_pool;
    use sic_marketplace_core::{DEFAULT_TAX_RATE, Email, LineItem, OrderStatus, Price, ProductId};

    async fn buyer(pool: &SqlitePool) -> BuyerId {
        BuyerRepository::new(pool)
            .create(
                "Alice",
                "alice",
                &Email::parse("alice@example.com").unwrap(),
                "$argon2id$placeholder",
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let pool = test_pool().await;
        let buyer_id = buyer(&pool).await;
        let checkout = CheckoutService::new(&pool);

        assert!(matches!(
            checkout.checkout(buyer_id, &Cart::new(), DEFAULT_TAX_RATE).await,
            Err(CheckoutError::InvalidInput(_))
        ));
        assert!(checkout.order_history(buyer_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_records_rounded_total() {
        let pool = test_pool().await;
        let buyer_id = buyer(&pool).await;
        let checkout = CheckoutService::new(&pool);

        let mut cart = Cart::new();
        for (id, cents) in [(1, 1000), (2, 1999), (3, 500)] {
            cart.add(LineItem {
                product_id: ProductId::new(id),
                name: format!("item {id}"),
                price: Price::from_cents(cents).unwrap(),
            })
            .unwrap();
        }

        let receipt = checkout
            .checkout(buyer_id, &cart, DEFAULT_TAX_RATE)
            .await
            .unwrap();
        assert_eq!(receipt.totals.total, Decimal::new(3674, 2));
        assert_eq!(receipt.order.total_price, Decimal::new(3674, 2));
        assert_eq!(receipt.order.status, OrderStatus::Paid);

        let history = checkout.order_history(buyer_id).await.unwrap();
        assert_eq!(history, [receipt.order]);
    }
}
