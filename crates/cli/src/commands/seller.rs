//! Seller account commands.
//!
//! # Usage
//!
//! ```bash
//! sic-cli seller create --store-name "Lab Supply" --password "..."
//! ```

use secrecy::SecretString;

use sic_marketplace_core::SellerId;
use sic_marketplace_storefront::services::AuthService;

use super::{CommandError, open_database};

/// Create a new seller account.
///
/// # Returns
///
/// The ID of the created seller.
pub async fn create(store_name: &str, password: String) -> Result<SellerId, CommandError> {
    let pool = open_database().await?;
    let password = SecretString::from(password);

    let seller_id = AuthService::new(&pool)
        .register_seller(store_name, &password)
        .await?;

    tracing::info!(
        "Seller created successfully! ID: {}, Store: {}",
        seller_id,
        store_name.trim()
    );
    Ok(seller_id)
}
