//! CLI command implementations.

pub mod migrate;
pub mod product;
pub mod seller;

use std::path::PathBuf;

use sqlx::SqlitePool;
use thiserror::Error;

use sic_marketplace_storefront::config::DEFAULT_DATABASE_PATH;
use sic_marketplace_storefront::db::{self, RepositoryError};
use sic_marketplace_storefront::services::{AuthError, CatalogError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Repository error.
    #[error("{0}")]
    Repository(#[from] RepositoryError),

    /// Account creation failed.
    #[error("{0}")]
    Auth(#[from] AuthError),

    /// Product listing failed.
    #[error("{0}")]
    Catalog(#[from] CatalogError),
}

/// Database file from `MARKETPLACE_DATABASE_PATH`, or the default.
fn database_path() -> PathBuf {
    dotenvy::dotenv().ok();

    std::env::var("MARKETPLACE_DATABASE_PATH")
        .ok()
        .filter(|path| !path.trim().is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH), PathBuf::from)
}

/// Open the database and make sure the schema exists.
async fn open_database() -> Result<SqlitePool, CommandError> {
    let path = database_path();
    tracing::info!("Opening database {}...", path.display());

    let pool = db::create_pool(&path).await?;
    db::init_schema(&pool).await?;
    Ok(pool)
}
