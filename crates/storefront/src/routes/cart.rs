//! Cart and checkout route handlers.
//!
//! The cart lives in the buyer's [`MarketSession`](crate::models::MarketSession);
//! every change is written back to the session store before responding.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use sic_marketplace_core::{Cart, CartTotals, LineItem, ProductId};

use crate::error::{Result, add_breadcrumb};
use crate::middleware::{RequireBuyer, save_market_session};
use crate::services::{CatalogService, CheckoutService};
use crate::state::AppState;

/// Add-to-cart request.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
}

/// Cart contents with totals at the configured tax rate.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl CartView {
    fn new(cart: &Cart, state: &AppState) -> Self {
        Self {
            items: cart.items().to_vec(),
            totals: cart.totals(state.tax_rate()),
        }
    }
}

/// Show the cart.
pub async fn show(
    State(state): State<AppState>,
    RequireBuyer { market, .. }: RequireBuyer,
) -> Json<CartView> {
    Json(CartView::new(&market.cart, &state))
}

/// Add a product at its current price.
#[instrument(skip_all, fields(buyer_id = %buyer.buyer_id))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    buyer: RequireBuyer,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let item = CatalogService::new(state.pool())
        .line_item(request.product_id)
        .await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[("product_id", request.product_id.to_string())],
    );

    let mut market = buyer.market;
    market.cart.add(item)?;
    save_market_session(&session, &market).await?;

    Ok(Json(CartView::new(&market.cart, &state)))
}

/// Empty the cart.
#[instrument(skip_all)]
pub async fn clear(
    State(state): State<AppState>,
    session: Session,
    RequireBuyer { mut market, .. }: RequireBuyer,
) -> Result<Json<CartView>> {
    market.cart.clear();
    save_market_session(&session, &market).await?;

    Ok(Json(CartView::new(&market.cart, &state)))
}

/// Place an order for the cart and empty it.
#[instrument(skip_all, fields(buyer_id = %buyer.buyer_id))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    buyer: RequireBuyer,
) -> Result<impl IntoResponse> {
    let receipt = CheckoutService::new(state.pool())
        .checkout(buyer.buyer_id, &buyer.market.cart, state.tax_rate())
        .await?;

    add_breadcrumb(
        "checkout",
        "Order placed",
        &[("order_id", receipt.order.id.to_string())],
    );

    let mut market = buyer.market;
    market.cart.clear();
    save_market_session(&session, &market).await?;

    Ok((StatusCode::CREATED, Json(receipt)))
}
