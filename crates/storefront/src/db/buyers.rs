//! Buyer repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use sic_marketplace_core::{BuyerId, Email};

use super::{RepositoryError, insert_error};
use crate::models::Buyer;
use crate::password;

const BUYER_COLUMNS: &str = "id, name, username, email, created_at";

#[derive(sqlx::FromRow)]
struct BuyerRow {
    id: BuyerId,
    name: String,
    username: String,
    email: String,
    created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct BuyerCredentialRow {
    #[sqlx(flatten)]
    buyer: BuyerRow,
    password_hash: String,
}

impl TryFrom<BuyerRow> for Buyer {
    type Error = RepositoryError;

    fn try_from(row: BuyerRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&row.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            username: row.username,
            email,
            created_at: row.created_at,
        })
    }
}

/// Repository for buyer database operations.
pub struct BuyerRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> BuyerRepository<'a> {
    /// Create a new buyer repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a buyer and return the new id.
    ///
    /// `password_hash` must already be hashed; it is stored as given.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DuplicateKey` if the username or email is taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        name: &str,
        username: &str,
        email: &Email,
        password_hash: &str,
    ) -> Result<BuyerId, RepositoryError> {
        let id = sqlx::query_scalar::<_, BuyerId>(
            "INSERT INTO buyers (name, username, email, password_hash) VALUES (?, ?, ?, ?) RETURNING id",
        )
        .bind(name)
        .bind(username)
        .bind(email.as_str())
        .bind(password_hash)
        .fetch_one(self.pool)
        .await
        .map_err(|e| insert_error(e, "buyer"))?;

        tracing::debug!(buyer_id = %id, "Buyer created");
        Ok(id)
    }

    /// Get a buyer by their ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored email is invalid.
    pub async fn get_by_id(&self, id: BuyerId) -> Result<Option<Buyer>, RepositoryError> {
        let row = sqlx::query_as::<_, BuyerRow>(&format!(
            "SELECT {BUYER_COLUMNS} FROM buyers WHERE id = ?"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Buyer::try_from).transpose()
    }

    /// Look up a buyer by username and check their password.
    ///
    /// Returns `None` for an unknown username or a wrong password, without
    /// saying which. An unknown username still costs one hash verification.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored hash or email is invalid.
    pub async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<Buyer>, RepositoryError> {
        let row = sqlx::query_as::<_, BuyerCredentialRow>(&format!(
            "SELECT {BUYER_COLUMNS}, password_hash FROM buyers WHERE username = ?"
        ))
        .bind(username)
        .fetch_optional(self.pool)
        .await?;

        let Some(row) = row else {
            password::verify_against_dummy(password);
            return Ok(None);
        };

        let matches = password::verify_password(password, &row.password_hash).map_err(|e| {
            RepositoryError::DataCorruption(format!("buyer {}: {e}", row.buyer.id))
        })?;

        if matches {
            Buyer::try_from(row.buyer).map(Some)
        } else {
            Ok(None)
        }
    }
}
