//! Product catalog commands.
//!
//! # Usage
//!
//! ```bash
//! sic-cli product add --seller-id 1 --name "Oscilloscope" --price 199.99 --category electronics
//! sic-cli product list
//! ```

use rust_decimal::Decimal;

use sic_marketplace_core::{Category, SellerId};
use sic_marketplace_storefront::models::Product;
use sic_marketplace_storefront::services::CatalogService;

use super::{CommandError, open_database};

/// List a product for a seller.
pub async fn add(
    seller_id: i64,
    name: &str,
    price: Decimal,
    category: Category,
) -> Result<Product, CommandError> {
    let pool = open_database().await?;

    let product = CatalogService::new(&pool)
        .add_product(name, price, category, SellerId::new(seller_id))
        .await?;

    tracing::info!(
        "Product listed! ID: {}, Name: {}, Price: {}, Category: {}",
        product.id,
        product.name,
        product.price,
        product.category
    );
    Ok(product)
}

/// Print every product as a table.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), CommandError> {
    let pool = open_database().await?;
    let products = CatalogService::new(&pool).browse_products().await?;

    if products.is_empty() {
        tracing::info!("No products listed yet");
        return Ok(());
    }

    println!("{:>5}  {:<32}  {:>10}  {:<15}  {:>6}", "ID", "NAME", "PRICE", "CATEGORY", "SELLER");
    for product in &products {
        println!(
            "{:>5}  {:<32}  {:>10}  {:<15}  {:>6}",
            product.id.to_string(),
            product.name,
            product.price.to_string(),
            product.category.label(),
            product.seller_id.to_string()
        );
    }
    Ok(())
}
