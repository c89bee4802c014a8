//! Schema creation command.
//!
//! # Usage
//!
//! ```bash
//! sic-cli migrate
//! ```
//!
//! Creating the tables is idempotent, so this is safe to run on an existing
//! database. The server also does it on startup.

use super::{CommandError, open_database};

/// Create the marketplace tables.
pub async fn run() -> Result<(), CommandError> {
    let pool = open_database().await?;

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await?;

    tracing::info!("Schema ready: {}", tables.join(", "));
    Ok(())
}
