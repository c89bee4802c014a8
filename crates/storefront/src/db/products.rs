//! Product repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use sic_marketplace_core::{Category, Price, ProductId, SellerId};

use super::{RepositoryError, insert_error, parse_decimal};
use crate::models::Product;

const PRODUCT_COLUMNS: &str = "id, name, price, category, seller_id, created_at";

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    price: String,
    category: Category,
    seller_id: SellerId,
    created_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let amount = parse_decimal(&row.price, "price")?;
        let price = Price::new(amount).map_err(|e| {
            RepositoryError::DataCorruption(format!("product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            price,
            category: row.category,
            seller_id: row.seller_id,
            created_at: row.created_at,
        })
    }
}

fn into_products(rows: Vec<ProductRow>) -> Result<Vec<Product>, RepositoryError> {
    rows.into_iter().map(Product::try_from).collect()
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a product and return the new id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::MissingReference` if `seller_id` does not exist.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        price: Price,
        category: Category,
        seller_id: SellerId,
    ) -> Result<ProductId, RepositoryError> {
        let id = sqlx::query_scalar::<_, ProductId>(
            "INSERT INTO products (name, price, category, seller_id) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(format!("{:.2}", price.amount()))
        .bind(category)
        .bind(seller_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| insert_error(e, "product"))?;

        tracing::debug!(product_id = %id, seller_id = %seller_id, "Product created");
        Ok(id)
    }

    /// Every product, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY id"
        ))
        .fetch_all(self.pool)
        .await?;

        into_products(rows)
    }

    /// Products listed by one seller, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored price is invalid.
    pub async fn list_by_seller(&self, seller_id: SellerId) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE seller_id = ? ORDER BY id"
        ))
        .bind(seller_id)
        .fetch_all(self.pool)
        .await?;

        into_products(rows)
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored price is invalid.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }
}
