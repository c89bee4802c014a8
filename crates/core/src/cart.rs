//! Shopping cart and totals calculator.
//!
//! A cart is a plain list of line items owned by a buyer's session. Each line
//! item snapshots the product's price at the moment it was added, so later
//! catalog reads never change what the buyer sees.
//!
//! # Rounding
//!
//! Subtotal, tax and total are each computed from exact decimal values and
//! rounded independently to cents, half away from zero. Prices are cent-exact
//! (see [`Price`]), so the exact subtotal already has two decimal places and
//! `total == round(subtotal + tax, 2)` holds for every cart.
//!
//! # Bounds
//!
//! A [`Cart`] holds at most [`Cart::MAX_ITEMS`] line items and every price is
//! at most [`Price::MAX`], so a full cart's subtotal stays below 10^9 and the
//! decimal arithmetic cannot overflow for any tax rate in `0..=1`.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Price, ProductId};

/// Decimal places of every monetary output.
const DECIMAL_PLACES: u32 = 2;

/// Tax rate applied at checkout unless configured otherwise (5%).
pub const DEFAULT_TAX_RATE: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// A single product instance in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    /// Price at the time the item was added.
    pub price: Price,
}

/// Totals for a list of line items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub total: Decimal,
    /// Number of line items; the same product added twice counts twice.
    pub item_count: usize,
}

/// Compute subtotal, tax, total and item count for `items`.
///
/// An empty slice yields all-zero totals.
///
/// ```
/// use rust_decimal::Decimal;
/// use sic_marketplace_core::{DEFAULT_TAX_RATE, LineItem, Price, ProductId, compute_totals};
///
/// let items: Vec<LineItem> = [1000, 1999, 500]
///     .into_iter()
///     .enumerate()
///     .map(|(i, cents)| LineItem {
///         product_id: ProductId::new(i as i64 + 1),
///         name: format!("item {i}"),
///         price: Price::from_cents(cents).unwrap(),
///     })
///     .collect();
///
/// let totals = compute_totals(&items, DEFAULT_TAX_RATE);
/// assert_eq!(totals.subtotal, Decimal::new(3499, 2));
/// assert_eq!(totals.tax, Decimal::new(175, 2));
/// assert_eq!(totals.total, Decimal::new(3674, 2));
/// assert_eq!(totals.item_count, 3);
/// ```
#[must_use]
pub fn compute_totals(items: &[LineItem], tax_rate: Decimal) -> CartTotals {
    let subtotal: Decimal = items.iter().map(|item| item.price.amount()).sum();
    let tax = subtotal * tax_rate;
    let total = subtotal + tax;

    CartTotals {
        subtotal: round_money(subtotal),
        tax: round_money(tax),
        total: round_money(total),
        item_count: items.len(),
    }
}

/// Round to cents, half away from zero.
fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Errors that can occur when changing a [`Cart`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CartError {
    /// The cart already holds [`Cart::MAX_ITEMS`] line items.
    #[error("cart is full ({max} items)", max = Cart::MAX_ITEMS)]
    Full,
}

/// A buyer's in-session cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Most line items a cart may hold.
    pub const MAX_ITEMS: usize = 100;

    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Append a line item.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Full` if the cart already holds
    /// [`Cart::MAX_ITEMS`] items; the cart is left unchanged.
    pub fn add(&mut self, item: LineItem) -> Result<(), CartError> {
        if self.items.len() >= Self::MAX_ITEMS {
            return Err(CartError::Full);
        }
        self.items.push(item);
        Ok(())
    }

    /// Remove every line item.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals for the current contents at `tax_rate`.
    #[must_use]
    pub fn totals(&self, tax_rate: Decimal) -> CartTotals {
        compute_totals(&self.items, tax_rate)
    }
}
