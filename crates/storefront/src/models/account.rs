//! Account domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use sic_marketplace_core::{BuyerId, Email, Role, SellerId};

/// A registered buyer (domain type).
///
/// The password hash never leaves the repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buyer {
    pub id: BuyerId,
    /// Display name given at signup.
    pub name: String,
    /// Unique login name.
    pub username: String,
    /// Unique email address.
    pub email: Email,
    pub created_at: DateTime<Utc>,
}

/// A registered seller (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    pub id: SellerId,
    /// Unique store name, also used to log in.
    pub store_name: String,
    pub created_at: DateTime<Utc>,
}

/// An authenticated account.
///
/// The variant fixes both the role and the id type, so a seller id can never
/// be used where a buyer is expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "role", rename_all = "snake_case")]
pub enum Principal {
    Buyer { id: BuyerId, name: String },
    Seller { id: SellerId, store_name: String },
}

impl Principal {
    #[must_use]
    pub const fn role(&self) -> Role {
        match self {
            Self::Buyer { .. } => Role::Buyer,
            Self::Seller { .. } => Role::Seller,
        }
    }

    /// Buyer name or seller store name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self {
            Self::Buyer { name, .. } => name,
            Self::Seller { store_name, .. } => store_name,
        }
    }

    /// The underlying row id, for logging.
    #[must_use]
    pub const fn raw_id(&self) -> i64 {
        match self {
            Self::Buyer { id, .. } => id.as_i64(),
            Self::Seller { id, .. } => id.as_i64(),
        }
    }
}

impl From<Buyer> for Principal {
    fn from(buyer: Buyer) -> Self {
        Self::Buyer {
            id: buyer.id,
            name: buyer.name,
        }
    }
}

impl From<Seller> for Principal {
    fn from(seller: Seller) -> Self {
        Self::Seller {
            id: seller.id,
            store_name: seller.store_name,
        }
    }
}
