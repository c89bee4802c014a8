//! Authentication route handlers.
//!
//! Registration creates an account but does not log in; login starts a
//! fresh market session and logout destroys it.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use secrecy::SecretString;
use serde::Deserialize;
use serde_json::json;
use tower_sessions::Session;
use tracing::instrument;

use sic_marketplace_core::Role;

use crate::error::{AppError, Result, clear_sentry_user, set_sentry_user};
use crate::middleware::{RequireAuth, end_market_session, start_market_session};
use crate::services::AuthService;
use crate::state::AppState;

// =============================================================================
// Request Types
// =============================================================================
//
// Requests carrying passwords deliberately do not derive `Debug`.

/// Buyer registration request.
#[derive(Deserialize)]
pub struct RegisterBuyerRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Seller registration request.
#[derive(Deserialize)]
pub struct RegisterSellerRequest {
    pub store_name: String,
    pub password: String,
}

/// Login request.
///
/// `identifier` is the username for buyers and the store name for sellers.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub role: Role,
    pub identifier: String,
    pub password: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Register a buyer.
#[instrument(skip_all)]
pub async fn register_buyer(
    State(state): State<AppState>,
    Json(request): Json<RegisterBuyerRequest>,
) -> Result<impl IntoResponse> {
    let password = SecretString::from(request.password);
    let id = AuthService::new(state.pool())
        .register_buyer(&request.name, &request.username, &request.email, &password)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Register a seller.
#[instrument(skip_all)]
pub async fn register_seller(
    State(state): State<AppState>,
    Json(request): Json<RegisterSellerRequest>,
) -> Result<impl IntoResponse> {
    let password = SecretString::from(request.password);
    let id = AuthService::new(state.pool())
        .register_seller(&request.store_name, &password)
        .await?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Log in and start a market session.
#[instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let password = SecretString::from(request.password);
    let principal = AuthService::new(state.pool())
        .authenticate(request.role, &request.identifier, &password)
        .await?
        .ok_or_else(|| AppError::Unauthorized("Invalid credentials".to_owned()))?;

    set_sentry_user(&principal.raw_id(), principal.display_name());
    let market = start_market_session(&session, principal).await?;

    Ok(Json(market.principal))
}

/// Log out, discarding the session and its cart.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Result<StatusCode> {
    end_market_session(&session).await?;
    clear_sentry_user();

    Ok(StatusCode::NO_CONTENT)
}

/// The logged-in account, as currently stored, and its cart size.
///
/// A session whose account has since been removed is ended.
#[instrument(skip_all)]
pub async fn me(
    State(state): State<AppState>,
    session: Session,
    RequireAuth(market): RequireAuth,
) -> Result<impl IntoResponse> {
    let Some(principal) = AuthService::new(state.pool())
        .current_account(&market.principal)
        .await?
    else {
        tracing::warn!(role = %market.principal.role(), "Session account no longer exists");
        end_market_session(&session).await?;
        return Err(AppError::Unauthorized("Login required".to_owned()));
    };

    Ok(Json(json!({
        "principal": principal,
        "cart_items": market.cart.len(),
    })))
}
