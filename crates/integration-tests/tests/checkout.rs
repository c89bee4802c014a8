//! Cart totals and order persistence.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use sic_marketplace_core::{Cart, Category, DEFAULT_TAX_RATE, OrderStatus};
use sic_marketplace_integration_tests::TestContext;
use sic_marketplace_storefront::services::{CatalogService, CheckoutError, CheckoutService};

#[tokio::test]
async fn test_cart_of_catalog_products_checks_out() {
    let ctx = TestContext::new().await;
    let seller_id = ctx.seller("Lab Supply", "pw").await;
    let buyer_id = ctx.buyer("alice", "pw").await;
    let catalog = CatalogService::new(&ctx.pool);

    let mut cart = Cart::new();
    for (name, cents) in [("Manual", 1000), ("Probe", 1999), ("Cable", 500)] {
        let product = catalog
            .add_product(name, Decimal::new(cents, 2), Category::Electronics, seller_id)
            .await
            .unwrap();
        cart.add(catalog.line_item(product.id).await.unwrap()).unwrap();
    }

    let totals = cart.totals(DEFAULT_TAX_RATE);
    assert_eq!(totals.subtotal, Decimal::new(3499, 2));
    assert_eq!(totals.tax, Decimal::new(175, 2));
    assert_eq!(totals.total, Decimal::new(3674, 2));
    assert_eq!(totals.item_count, 3);

    let checkout = CheckoutService::new(&ctx.pool);
    let receipt = checkout
        .checkout(buyer_id, &cart, DEFAULT_TAX_RATE)
        .await
        .unwrap();
    assert_eq!(receipt.totals, totals);
    assert_eq!(receipt.order.total_price, Decimal::new(3674, 2));
    assert_eq!(receipt.order.status, OrderStatus::Paid);

    let stored: (String, String) =
        sqlx::query_as("SELECT total_price, status FROM orders WHERE buyer_id = ?")
            .bind(buyer_id)
            .fetch_one(&ctx.pool)
            .await
            .unwrap();
    assert_eq!(stored, ("36.74".to_owned(), "paid".to_owned()));
}

#[tokio::test]
async fn test_same_product_twice_counts_twice() {
    let ctx = TestContext::new().await;
    let seller_id = ctx.seller("Lab Supply", "pw").await;
    let catalog = CatalogService::new(&ctx.pool);
    let product = catalog
        .add_product("Probe", Decimal::new(250, 2), Category::Electronics, seller_id)
        .await
        .unwrap();

    let mut cart = Cart::new();
    cart.add(catalog.line_item(product.id).await.unwrap()).unwrap();
    cart.add(catalog.line_item(product.id).await.unwrap()).unwrap();

    let totals = cart.totals(DEFAULT_TAX_RATE);
    assert_eq!(totals.item_count, 2);
    assert_eq!(totals.subtotal, Decimal::new(500, 2));
}

#[tokio::test]
async fn test_empty_cart_cannot_check_out() {
    let ctx = TestContext::new().await;
    let buyer_id = ctx.buyer("alice", "pw").await;

    let result = CheckoutService::new(&ctx.pool)
        .checkout(buyer_id, &Cart::new(), DEFAULT_TAX_RATE)
        .await;
    assert!(matches!(result, Err(CheckoutError::InvalidInput(_))));
}

#[tokio::test]
async fn test_order_history_is_per_buyer() {
    let ctx = TestContext::new().await;
    let seller_id = ctx.seller("Lab Supply", "pw").await;
    let alice = ctx.buyer("alice", "pw").await;
    let bob = ctx.buyer("bob", "pw").await;
    let catalog = CatalogService::new(&ctx.pool);
    let product = catalog
        .add_product("Book", Decimal::new(1000, 2), Category::Books, seller_id)
        .await
        .unwrap();

    let mut cart = Cart::new();
    cart.add(catalog.line_item(product.id).await.unwrap()).unwrap();

    let checkout = CheckoutService::new(&ctx.pool);
    checkout.checkout(alice, &cart, DEFAULT_TAX_RATE).await.unwrap();
    checkout.checkout(alice, &cart, DEFAULT_TAX_RATE).await.unwrap();

    assert_eq!(checkout.order_history(alice).await.unwrap().len(), 2);
    assert!(checkout.order_history(bob).await.unwrap().is_empty());
}
