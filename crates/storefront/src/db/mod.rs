//! Persistence gateway over a single-file `SQLite` database.
//!
//! # Tables
//!
//! - `buyers` - Buyer accounts (unique username, unique email)
//! - `sellers` - Seller accounts (unique store name)
//! - `products` - Catalog entries, each owned by a seller
//! - `orders` - Paid orders, each owned by a buyer
//! - `tower_sessions` - Session records (created by the session store)
//!
//! The pool runs in WAL mode with a busy timeout, so concurrent sessions get
//! concurrent readers and serialized writers. Every write is a single-row
//! insert; there are no multi-table transactions.
//!
//! Money columns hold decimal text (e.g. `19.99`) and are parsed back into
//! `Decimal`, never floats.

pub mod buyers;
pub mod orders;
pub mod products;
pub mod sellers;

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use thiserror::Error;

pub use buyers::BuyerRepository;
pub use orders::OrderRepository;
pub use products::ProductRepository;
pub use sellers::SellerRepository;

/// How long a writer waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Schema statements, applied in order by [`init_schema`].
const SCHEMA: &[&str] = &[
    r"
    CREATE TABLE IF NOT EXISTS buyers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        username TEXT NOT NULL UNIQUE,
        email TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS sellers (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        store_name TEXT NOT NULL UNIQUE,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        price TEXT NOT NULL,
        category TEXT NOT NULL,
        seller_id INTEGER NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (seller_id) REFERENCES sellers(id)
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS orders (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        buyer_id INTEGER NOT NULL,
        total_price TEXT NOT NULL,
        status TEXT NOT NULL,
        created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
        FOREIGN KEY (buyer_id) REFERENCES buyers(id)
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_products_seller ON products(seller_id)",
    "CREATE INDEX IF NOT EXISTS idx_orders_buyer ON orders(buyer_id)",
];

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Uniqueness constraint violation (e.g., username already taken).
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// Foreign key violation (e.g., product for an unknown seller).
    #[error("missing reference: {0}")]
    MissingReference(String),
}

/// Open (or create) the marketplace database file.
///
/// # Errors
///
/// Returns `sqlx::Error` if the file cannot be opened.
pub async fn create_pool(path: impl AsRef<Path>) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::new()
        .filename(path)
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .foreign_keys(true)
        .busy_timeout(BUSY_TIMEOUT);

    SqlitePoolOptions::new()
        .max_connections(5)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Open a private in-memory database.
///
/// The pool holds exactly one connection that never expires, since each
/// `SQLite` in-memory connection is its own database.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_memory_pool() -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .min_connections(1)
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
}

/// Create all marketplace tables if they do not already exist.
///
/// Idempotent; called on every startup.
///
/// # Errors
///
/// Returns `RepositoryError::Database` if any statement fails.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), RepositoryError> {
    let mut tx = pool.begin().await?;
    for statement in SCHEMA {
        sqlx::query(*statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::debug!(tables = 4, "Schema ensured");
    Ok(())
}

/// Classify an insert failure, naming the record in constraint errors.
pub(crate) fn insert_error(err: sqlx::Error, record: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err {
        if db_err.is_unique_violation() {
            return RepositoryError::DuplicateKey(format!("{record} already exists"));
        }
        if db_err.is_foreign_key_violation() {
            return RepositoryError::MissingReference(format!("{record} references a missing row"));
        }
    }
    RepositoryError::Database(err)
}

/// Parse a stored decimal column.
pub(crate) fn parse_decimal(value: &str, column: &str) -> Result<Decimal, RepositoryError> {
    Decimal::from_str(value)
        .map_err(|e| RepositoryError::DataCorruption(format!("invalid {column} {value:?}: {e}")))
}
