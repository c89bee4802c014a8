//! Authentication extractors and session lifecycle helpers.
//!
//! A logged-in session holds exactly one [`MarketSession`]. The extractors
//! below load it and check the account's role before a handler runs.
//!
//! # Example
//!
//! ```rust,ignore
//! async fn inventory(RequireSeller { seller_id, .. }: RequireSeller) -> impl IntoResponse {
//!     format!("seller {seller_id}")
//! }
//! ```

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tower_sessions::Session;

use sic_marketplace_core::{BuyerId, Role, SellerId};

use crate::models::{MarketSession, Principal, session_keys};

/// Extractor that requires any logged-in account.
pub struct RequireAuth(pub MarketSession);

/// Extractor that requires a logged-in buyer.
pub struct RequireBuyer {
    pub buyer_id: BuyerId,
    pub market: MarketSession,
}

/// Extractor that requires a logged-in seller.
pub struct RequireSeller {
    pub seller_id: SellerId,
    pub market: MarketSession,
}

/// Error returned when a route needs an account the request does not have.
#[derive(Debug, PartialEq, Eq)]
pub enum AuthRejection {
    /// Nobody is logged in.
    Unauthorized,
    /// Logged in, but with the wrong role.
    Forbidden(Role),
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::Unauthorized => (StatusCode::UNAUTHORIZED, "Login required".to_owned()),
            Self::Forbidden(role) => (StatusCode::FORBIDDEN, format!("Only {role}s can do this")),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Load the market session from the request, if any.
async fn load_market_session(parts: &Parts) -> Option<MarketSession> {
    // Get the session from extensions (set by SessionManagerLayer)
    let session = parts.extensions.get::<Session>()?;

    match session.get::<MarketSession>(session_keys::MARKET_SESSION).await {
        Ok(market) => market,
        Err(e) => {
            tracing::warn!(error = %e, "Unreadable market session, treating as logged out");
            None
        }
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        load_market_session(parts)
            .await
            .map(Self)
            .ok_or(AuthRejection::Unauthorized)
    }
}

impl<S> FromRequestParts<S> for RequireBuyer
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let market = load_market_session(parts)
            .await
            .ok_or(AuthRejection::Unauthorized)?;

        match market.principal {
            Principal::Buyer { id, .. } => Ok(Self {
                buyer_id: id,
                market,
            }),
            Principal::Seller { .. } => Err(AuthRejection::Forbidden(Role::Buyer)),
        }
    }
}

impl<S> FromRequestParts<S> for RequireSeller
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let market = load_market_session(parts)
            .await
            .ok_or(AuthRejection::Unauthorized)?;

        match market.principal {
            Principal::Seller { id, .. } => Ok(Self {
                seller_id: id,
                market,
            }),
            Principal::Buyer { .. } => Err(AuthRejection::Forbidden(Role::Seller)),
        }
    }
}

/// Begin a market session for `principal`.
///
/// The session ID is rotated first, so an ID issued before login is never
/// reused after it.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn start_market_session(
    session: &Session,
    principal: Principal,
) -> Result<MarketSession, tower_sessions::session::Error> {
    session.cycle_id().await?;
    let market = MarketSession::new(principal);
    session
        .insert(session_keys::MARKET_SESSION, &market)
        .await?;
    Ok(market)
}

/// Store an updated market session (e.g. after a cart change).
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn save_market_session(
    session: &Session,
    market: &MarketSession,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::MARKET_SESSION, market).await
}

/// Destroy the session entirely (logout).
///
/// # Errors
///
/// Returns an error if the session record cannot be deleted.
pub async fn end_market_session(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session.flush().await
}
