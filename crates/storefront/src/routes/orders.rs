//! Order history handler.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::Result;
use crate::middleware::RequireBuyer;
use crate::models::Order;
use crate::services::CheckoutService;
use crate::state::AppState;

/// The logged-in buyer's orders, newest first.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireBuyer { buyer_id, .. }: RequireBuyer,
) -> Result<Json<Vec<Order>>> {
    let orders = CheckoutService::new(state.pool())
        .order_history(buyer_id)
        .await?;
    Ok(Json(orders))
}
