//! Type-safe product price using decimal arithmetic.

use core::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is zero or negative.
    #[error("price must be greater than zero (got {0})")]
    NotPositive(Decimal),
    /// The amount has sub-cent precision.
    #[error("price must have at most {max} decimal places (got {0})", max = Price::DECIMAL_PLACES)]
    TooPrecise(Decimal),
    /// The amount is above [`Price::MAX`].
    #[error("price must be at most {max} (got {0})", max = Price::MAX)]
    TooLarge(Decimal),
}

/// A product price in the store currency (USD).
///
/// Prices are strictly positive, cent-exact and at most [`Price::MAX`], so
/// sums of prices never need rounding and never overflow. Always carries two
/// decimal places and serializes as a decimal string (e.g. `"19.99"`, `"5.00"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// Maximum number of decimal places a price may carry.
    pub const DECIMAL_PLACES: u32 = 2;

    /// Highest accepted price (1,000,000.00).
    pub const MAX: Decimal = Decimal::from_parts(100_000_000, 0, 0, false, 2);

    /// Create a new price.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotPositive` for amounts `<= 0`,
    /// `PriceError::TooLarge` for amounts above [`Price::MAX`] and
    /// `PriceError::TooPrecise` for amounts with sub-cent digits.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount <= Decimal::ZERO {
            return Err(PriceError::NotPositive(amount));
        }
        if amount > Self::MAX {
            return Err(PriceError::TooLarge(amount));
        }
        let normalized = amount.normalize();
        if normalized.scale() > Self::DECIMAL_PLACES {
            return Err(PriceError::TooPrecise(amount));
        }
        let mut amount = normalized;
        amount.rescale(Self::DECIMAL_PLACES);
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::NotPositive` if `cents <= 0`.
    pub fn from_cents(cents: i64) -> Result<Self, PriceError> {
        Self::new(Decimal::new(cents, Self::DECIMAL_PLACES))
    }

    /// The amount in dollars.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_positive_cent_amounts() {
        assert_eq!(
            Price::new(Decimal::new(1999, 2)).unwrap().amount(),
            Decimal::new(1999, 2)
        );
        assert!(Price::new(Decimal::new(1, 2)).is_ok());
    }

    #[test]
    fn test_new_rejects_zero_and_negative() {
        assert!(matches!(
            Price::new(Decimal::ZERO),
            Err(PriceError::NotPositive(_))
        ));
        assert!(matches!(
            Price::new(Decimal::new(-500, 2)),
            Err(PriceError::NotPositive(_))
        ));
    }

    #[test]
    fn test_new_rejects_sub_cent_precision() {
        assert!(matches!(
            Price::new(Decimal::new(19_999, 3)),
            Err(PriceError::TooPrecise(_))
        ));
    }

    #[test]
    fn test_new_enforces_upper_bound() {
        let max = Price::new(Price::MAX).unwrap();
        assert_eq!(max.amount().to_string(), "1000000.00");

        assert!(matches!(
            Price::new(Price::MAX + Decimal::new(1, 2)),
            Err(PriceError::TooLarge(_))
        ));
        assert!(matches!(
            Price::new(Decimal::from_str_exact("50000000000000000000000000000").unwrap()),
            Err(PriceError::TooLarge(_))
        ));
    }

    #[test]
    fn test_trailing_zeros_are_not_extra_precision() {
        // 5.000 is five dollars, not a sub-cent amount
        let price = Price::new(Decimal::new(5000, 3)).unwrap();
        assert_eq!(price.amount(), Decimal::new(5, 0));
        assert_eq!(price.amount().to_string(), "5.00");
    }

    #[test]
    fn test_display_pads_to_cents() {
        assert_eq!(Price::from_cents(500).unwrap().to_string(), "$5.00");
        assert_eq!(Price::from_cents(1999).unwrap().to_string(), "$19.99");
    }

    #[test]
    fn test_deserialize_rejects_non_positive() {
        let ok: Result<Price, _> = serde_json::from_str("\"10.00\"");
        assert!(ok.is_ok());

        let bad: Result<Price, _> = serde_json::from_str("\"0\"");
        assert!(bad.is_err());
    }
}
