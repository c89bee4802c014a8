//! Product route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use sic_marketplace_core::Category;

use crate::error::Result;
use crate::middleware::RequireSeller;
use crate::models::Product;
use crate::services::CatalogService;
use crate::state::AppState;

/// New product listing.
#[derive(Debug, Deserialize)]
pub struct NewProductRequest {
    pub name: String,
    /// Decimal string or number, e.g. `"19.99"`.
    pub price: Decimal,
    pub category: Category,
}

/// Browse every product.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Product>>> {
    let products = CatalogService::new(state.pool()).browse_products().await?;
    Ok(Json(products))
}

/// List a new product under the logged-in seller.
#[instrument(skip_all, fields(seller_id = %seller.seller_id))]
pub async fn create(
    State(state): State<AppState>,
    seller: RequireSeller,
    Json(request): Json<NewProductRequest>,
) -> Result<impl IntoResponse> {
    let product = CatalogService::new(state.pool())
        .add_product(&request.name, request.price, request.category, seller.seller_id)
        .await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// The logged-in seller's inventory.
#[instrument(skip_all)]
pub async fn mine(
    State(state): State<AppState>,
    RequireSeller { seller_id, .. }: RequireSeller,
) -> Result<Json<Vec<Product>>> {
    let products = CatalogService::new(state.pool())
        .seller_inventory(seller_id)
        .await?;
    Ok(Json(products))
}
