//! Enumerations stored as text: account roles, product categories and order
//! statuses.

use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The two kinds of marketplace account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Browses products and checks out carts.
    Buyer,
    /// Lists products under a store name.
    Seller,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buyer => write!(f, "buyer"),
            Self::Seller => write!(f, "seller"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "buyer" => Ok(Self::Buyer),
            "seller" => Ok(Self::Seller),
            _ => Err(format!("invalid role: {s}")),
        }
    }
}

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Electronics,
    ResearchTools,
    Books,
}

impl Category {
    /// All categories, in the order they are offered to sellers.
    pub const ALL: [Self; 3] = [Self::Electronics, Self::ResearchTools, Self::Books];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Electronics => "Electronics",
            Self::ResearchTools => "Research Tools",
            Self::Books => "Books",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = String;

    /// Accepts either the label (`Research Tools`) or the stored form
    /// (`research_tools`), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(' ', "_");
        match key.as_str() {
            "electronics" => Ok(Self::Electronics),
            "research_tools" => Ok(Self::ResearchTools),
            "books" => Ok(Self::Books),
            _ => Err(format!("invalid category: {s}")),
        }
    }
}

/// Order status.
///
/// Orders are only recorded once the cart has been paid for, so every order
/// starts (and stays) `Paid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "sqlite", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlite", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Paid,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Paid => write!(f, "paid"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse_is_case_insensitive() {
        assert_eq!("Buyer".parse::<Role>().unwrap(), Role::Buyer);
        assert_eq!("SELLER".parse::<Role>().unwrap(), Role::Seller);
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_category_parses_labels_and_keys() {
        assert_eq!(
            "Research Tools".parse::<Category>().unwrap(),
            Category::ResearchTools
        );
        assert_eq!(
            "research_tools".parse::<Category>().unwrap(),
            Category::ResearchTools
        );
        assert_eq!("books".parse::<Category>().unwrap(), Category::Books);
        assert!("Groceries".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_label_roundtrip() {
        for category in Category::ALL {
            assert_eq!(category.label().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_order_status_defaults_to_paid() {
        assert_eq!(OrderStatus::default(), OrderStatus::Paid);
        assert_eq!(
            serde_json::to_string(&OrderStatus::Paid).unwrap(),
            "\"paid\""
        );
    }
}
