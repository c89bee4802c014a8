//! Seller repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use sic_marketplace_core::SellerId;

use super::{RepositoryError, insert_error};
use crate::models::Seller;
use crate::password;

#[derive(sqlx::FromRow)]
struct SellerRow {
    id: SellerId,
    store_name: String,
    created_at: DateTime<Utc>,
}

impl From<SellerRow> for Seller {
    fn from(row: SellerRow) -> Self {
        Self {
            id: row.id,
            store_name: row.store_name,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct SellerCredentialRow {
    #[sqlx(flatten)]
    seller: SellerRow,
    password_hash: String,
}

/// Repository for seller database operations.
pub struct SellerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> SellerRepository<'a> {
    /// Create a new seller repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a seller and return the new id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DuplicateKey` if the store name is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        store_name: &str,
        password_hash: &str,
    ) -> Result<SellerId, RepositoryError> {
        let id = sqlx::query_scalar::<_, SellerId>(
            "INSERT INTO sellers (store_name, password_hash) VALUES (?, ?) RETURNING id",
        )
        .bind(store_name)
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| insert_error(e, "seller"))?;

        tracing::debug!(seller_id = %id, "Seller created");
        Ok(id)
    }

    /// Get a seller by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: SellerId) -> Result<Option<Seller>, RepositoryError> {
        let row = sqlx::query_as::<_, SellerRow>(
            "SELECT id, store_name, created_at FROM sellers WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Seller::from))
    }

    /// Look up a seller by store name and check their password.
    ///
    /// Behaves like
    /// [`BuyerRepository::find_by_credentials`](super::BuyerRepository::find_by_credentials).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored hash is invalid.
    pub async fn find_by_credentials(
        &self,
        store_name: &str,
        password: &str,
    ) -> Result<Option<Seller>, RepositoryError> {
        let row = sqlx::query_as::<_, SellerCredentialRow>(
            "SELECT id, store_name, created_at, password_hash FROM sellers WHERE store_name = ?",
        )
        .bind(store_name)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            password::verify_against_dummy(password);
            return Ok(None);
        };

        let matches = password::verify_password(password, &row.password_hash).map_err(|e| {
            RepositoryError::DataCorruption(format!("seller {}: {e}", row.seller.id))
        })?;

        Ok(matches.then(|| Seller::from(row.seller)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::tests::test_pool;
    use crate::password::hash_password;

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = test_pool().await;
        let repo = SellerRepository::new(&pool);
        let hash = hash_password("s3cret-pass").unwrap();

        let id = repo.create("Lab Supply", &hash).await.unwrap();
        assert_eq!(
            repo.get_by_id(id).await.unwrap().unwrap().store_name,
            "Lab Supply"
        );

        let found = repo
            .find_by_credentials("Lab Supply", "s3cret-pass")
            .await
            .unwrap();
        assert_eq!(found.map(|s| s.id), Some(id));

        assert!(repo
            .find_by_credentials("Lab Supply", "nope")
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .find_by_credentials("Other Store", "s3cret-pass")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_store_name_rejected() {
        let pool = test_pool().await;
        let repo = SellerRepository::new(&pool);
        let hash = hash_password("s3cret-pass").unwrap();

        repo.create("Lab Supply", &hash).await.unwrap();
        assert!(matches!(
            repo.create("Lab Supply", &hash).await,
            Err(RepositoryError::DuplicateKey(_))
        ));
    }

    #[tokio::test]
    async fn test_corrupt_hash_is_reported() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO sellers (store_name, password_hash) VALUES ('Legacy', 'plaintext')")
            .execute(&pool)
            .await
            .unwrap();

        let result = SellerRepository::new(&pool)
            .find_by_credentials("Legacy", "plaintext")
            .await;
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}
