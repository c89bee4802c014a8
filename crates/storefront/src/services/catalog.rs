//! Catalog service.
//!
//! Validates new listings before they reach storage and reads products back
//! for browsing and for cart snapshots.

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use thiserror::Error;

use sic_marketplace_core::{Category, LineItem, Price, ProductId, SellerId};

use crate::db::{ProductRepository, RepositoryError};
use crate::models::Product;

/// Errors that can occur during catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The listing is invalid (blank name, bad price).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Product not found.
    #[error("product not found")]
    NotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Catalog service.
pub struct CatalogService<'a> {
    products: ProductRepository<'a>,
}

impl<'a> CatalogService<'a> {
    /// Create a new catalog service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            products: ProductRepository::new(pool),
        }
    }

    /// List a product for `seller_id`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidInput` if the name is blank or the price is
    /// not positive, above `Price::MAX` or has sub-cent digits. Nothing is
    /// written in that case.
    /// Returns `CatalogError::Repository` if the insert fails.
    pub async fn add_product(
        &self,
        name: &str,
        price: Decimal,
        category: Category,
        seller_id: SellerId,
    ) -> Result<Product, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::InvalidInput("product name is required".to_owned()));
        }
        let price = Price::new(price).map_err(|e| CatalogError::InvalidInput(e.to_string()))?;

        let id = self.products.create(name, price, category, seller_id).await?;
        tracing::info!(product_id = %id, seller_id = %seller_id, %price, %category, "Product listed");

        self.products
            .get_by_id(id)
            .await?
            .ok_or(CatalogError::Repository(RepositoryError::NotFound))
    }

    /// Every listed product.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the query fails.
    pub async fn browse_products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list().await?)
    }

    /// Products listed by one seller.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Repository` if the query fails.
    pub async fn seller_inventory(&self, seller_id: SellerId) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.list_by_seller(seller_id).await?)
    }

    /// Snapshot a product's current price as a cart line item.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product does not exist.
    pub async fn line_item(&self, product_id: ProductId) -> Result<LineItem, CatalogError> {
        self.products
            .get_by_id(product_id)
            .await?
            .map(|product| product.to_line_item())
            .ok_or(CatalogError::NotFound)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::SellerRepository;
    use crate::db::tests::test_pool;

    async fn seller(pool: &SqlitePool) -> SellerId {
        SellerRepository::new(pool)
            .create("Lab Supply", "$argon2id$placeholder")
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_product_returns_stored_product() {
        let pool = test_pool().await;
        let seller_id = seller(&pool).await;
        let catalog = CatalogService::new(&pool);

        let product = catalog
            .add_product("  Multimeter ", Decimal::new(4950, 2), Category::Electronics, seller_id)
            .await
            .unwrap();
        assert_eq!(product.name, "Multimeter");
        assert_eq!(product.price.amount(), Decimal::new(4950, 2));
        assert_eq!(product.seller_id, seller_id);
    }

    #[tokio::test]
    async fn test_invalid_listings_are_not_stored() {
        let pool = test_pool().await;
        let seller_id = seller(&pool).await;
        let catalog = CatalogService::new(&pool);

        for (name, price) in [
            ("Free", Decimal::ZERO),
            ("Negative", Decimal::new(-100, 2)),
            ("Sub-cent", Decimal::new(1001, 3)),
            ("Too dear", Price::MAX + Decimal::new(1, 2)),
            ("   ", Decimal::ONE),
        ] {
            let result = catalog
                .add_product(name, price, Category::Books, seller_id)
                .await;
            assert!(
                matches!(result, Err(CatalogError::InvalidInput(_))),
                "{name} at {price} should be rejected"
            );
        }

        assert!(catalog.browse_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_line_item_snapshots_price() {
        let pool = test_pool().await;
        let seller_id = seller(&pool).await;
        let catalog = CatalogService::new(&pool);
        let product = catalog
            .add_product("Manual", Decimal::new(500, 2), Category::Books, seller_id)
            .await
            .unwrap();

        let item = catalog.line_item(product.id).await.unwrap();
        assert_eq!(item.product_id, product.id);
        assert_eq!(item.price, product.price);

        assert!(matches!(
            catalog.line_item(ProductId::new(999)).await,
            Err(CatalogError::NotFound)
        ));
    }
}
