//! Session-related types.
//!
//! A browser session carries one explicit [`MarketSession`] value: who is
//! logged in and what is in their cart. Nothing else is stored per session.

use serde::{Deserialize, Serialize};

use sic_marketplace_core::{BuyerId, Cart, SellerId};

use super::Principal;

/// Per-session marketplace state.
///
/// Created at login and discarded at logout. Only buyers ever hold a
/// non-empty cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketSession {
    /// The logged-in account.
    pub principal: Principal,
    /// Line items added since login.
    #[serde(default)]
    pub cart: Cart,
}

impl MarketSession {
    /// Start a session for `principal` with an empty cart.
    #[must_use]
    pub const fn new(principal: Principal) -> Self {
        Self {
            principal,
            cart: Cart::new(),
        }
    }

    /// The buyer id, if a buyer is logged in.
    #[must_use]
    pub const fn buyer_id(&self) -> Option<BuyerId> {
        match self.principal {
            Principal::Buyer { id, .. } => Some(id),
            Principal::Seller { .. } => None,
        }
    }

    /// The seller id, if a seller is logged in.
    #[must_use]
    pub const fn seller_id(&self) -> Option<SellerId> {
        match self.principal {
            Principal::Seller { id, .. } => Some(id),
            Principal::Buyer { .. } => None,
        }
    }
}

/// Session keys.
pub mod session_keys {
    /// Key for the [`MarketSession`](super::MarketSession) value.
    pub const MARKET_SESSION: &str = "market_session";
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_has_empty_cart() {
        let session = MarketSession::new(Principal::Buyer {
            id: BuyerId::new(7),
            name: "Alice".to_owned(),
        });
        assert!(session.cart.is_empty());
        assert_eq!(session.buyer_id(), Some(BuyerId::new(7)));
        assert_eq!(session.seller_id(), None);
    }

    #[test]
    fn test_session_survives_json_roundtrip() {
        let session = MarketSession::new(Principal::Seller {
            id: SellerId::new(2),
            store_name: "Lab Supply".to_owned(),
        });
        let json = serde_json::to_string(&session).unwrap();
        let restored: MarketSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
        assert_eq!(restored.seller_id(), Some(SellerId::new(2)));
    }
}
