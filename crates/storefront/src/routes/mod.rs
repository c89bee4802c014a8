//! HTTP route handlers for the marketplace JSON API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (database)
//!
//! # Auth
//! POST /auth/buyers            - Register a buyer
//! POST /auth/sellers           - Register a seller
//! POST /auth/login             - Log in as buyer or seller
//! POST /auth/logout            - Destroy the session
//! GET  /auth/me                - Current account
//!
//! # Products
//! GET  /products               - Browse every product
//! POST /products               - List a product (seller)
//! GET  /products/mine          - Seller inventory (seller)
//!
//! # Cart and orders (buyer)
//! GET  /cart                   - Line items and totals
//! POST /cart/add               - Add a product
//! POST /cart/clear             - Empty the cart
//! POST /checkout               - Place an order
//! GET  /orders                 - Order history
//! ```

pub mod auth;
pub mod cart;
pub mod health;
pub mod orders;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/buyers", post(auth::register_buyer))
        .route("/auth/sellers", post(auth::register_seller))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index).post(products::create))
        .route("/products/mine", get(products::mine))
}

/// Create the cart and order routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(cart::show))
        .route("/cart/add", post(cart::add))
        .route("/cart/clear", post(cart::clear))
        .route("/checkout", post(cart::checkout))
        .route("/orders", get(orders::index))
}

/// Create all routes for the marketplace.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(auth_routes())
        .merge(product_routes())
        .merge(cart_routes())
}
