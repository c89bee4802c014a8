//! Authentication service.
//!
//! Registers buyers and sellers and checks their credentials. Passwords are
//! hashed with Argon2id before they reach the database and are never logged.

mod error;

pub use error::AuthError;

use secrecy::{ExposeSecret, SecretString};
use sqlx::SqlitePool;

use sic_marketplace_core::{BuyerId, Email, Role, SellerId};

use crate::db::{BuyerRepository, RepositoryError, SellerRepository};
use crate::models::Principal;
use crate::password::hash_password;

/// Maximum password length, in bytes.
const MAX_PASSWORD_LENGTH: usize = 128;

/// Authentication service.
///
/// Handles buyer and seller registration and login.
pub struct AuthService<'a> {
    buyers: BuyerRepository<'a>,
    sellers: SellerRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            buyers: BuyerRepository::new(pool),
            sellers: SellerRepository::new(pool),
        }
    }

    /// Register a new buyer.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` if a field is blank or the email is malformed.
    /// Returns `AuthError::DuplicateAccount` if the username or email is taken.
    pub async fn register_buyer(
        &self,
        name: &str,
        username: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<BuyerId, AuthError> {
        let name = required("name", name)?;
        let username = required("username", username)?;
        let email = Email::parse(email)?;
        validate_password(password)?;

        let password_hash = hash(password)?;

        let id = self
            .buyers
            .create(name, username, &email, &password_hash)
            .await
            .map_err(duplicate_account)?;

        tracing::info!(buyer_id = %id, username, "Buyer registered");
        Ok(id)
    }

    /// Register a new seller.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidInput` if the store name or password is blank.
    /// Returns `AuthError::DuplicateAccount` if the store name is taken.
    pub async fn register_seller(
        &self,
        store_name: &str,
        password: &SecretString,
    ) -> Result<SellerId, AuthError> {
        let store_name = required("store name", store_name)?;
        validate_password(password)?;

        let password_hash = hash(password)?;

        let id = self
            .sellers
            .create(store_name, &password_hash)
            .await
            .map_err(duplicate_account)?;

        tracing::info!(seller_id = %id, store_name, "Seller registered");
        Ok(id)
    }

    /// Check credentials for `role`.
    ///
    /// `identifier` is the username for buyers and the store name for
    /// sellers, matched exactly as stored. Returns `Ok(None)` when the
    /// identifier is unknown or the password is wrong; the two cases are
    /// indistinguishable.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn authenticate(
        &self,
        role: Role,
        identifier: &str,
        password: &SecretString,
    ) -> Result<Option<Principal>, AuthError> {
        let password = password.expose_secret();

        let principal = match role {
            Role::Buyer => self
                .buyers
                .find_by_credentials(identifier, password)
                .await?
                .map(Principal::from),
            Role::Seller => self
                .sellers
                .find_by_credentials(identifier, password)
                .await?
                .map(Principal::from),
        };

        match &principal {
            Some(p) => tracing::info!(%role, account_id = p.raw_id(), "Login succeeded"),
            None => tracing::warn!(%role, identifier, "Login failed"),
        }

        Ok(principal)
    }

    /// Re-read the account behind `principal`.
    ///
    /// Returns the principal as currently stored (so a renamed store shows
    /// its new name), or `Ok(None)` if the account no longer exists.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn current_account(
        &self,
        principal: &Principal,
    ) -> Result<Option<Principal>, AuthError> {
        let current = match principal {
            Principal::Buyer { id, .. } => self.buyers.get_by_id(*id).await?.map(Principal::from),
            Principal::Seller { id, .. } => {
                self.sellers.get_by_id(*id).await?.map(Principal::from)
            }
        };
        Ok(current)
    }
}

/// Trim `value`, rejecting it if nothing is left.
fn required<'v>(field: &str, value: &'v str) -> Result<&'v str, AuthError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AuthError::InvalidInput(format!("{field} is required")));
    }
    Ok(trimmed)
}

/// Validate password requirements.
fn validate_password(password: &SecretString) -> Result<(), AuthError> {
    let password = password.expose_secret();
    if password.is_empty() {
        return Err(AuthError::InvalidInput("password is required".to_owned()));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(AuthError::InvalidInput(format!(
            "password must be at most {MAX_PASSWORD_LENGTH} bytes"
        )));
    }
    Ok(())
}

fn hash(password: &SecretString) -> Result<String, AuthError> {
    hash_password(password.expose_secret()).map_err(|_| AuthError::PasswordHash)
}

fn duplicate_account(err: RepositoryError) -> AuthError {
    match err {
        RepositoryError::DuplicateKey(_) => AuthError::DuplicateAccount,
        other => AuthError::Repository(other),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::tests::test_pool;

    fn secret(s: &str) -> SecretString {
        SecretString::from(s.to_owned())
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("name", "  Alice ").unwrap(), "Alice");
        assert!(matches!(
            required("name", "   "),
            Err(AuthError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password(&secret("x")).is_ok());
        assert!(validate_password(&secret("")).is_err());
        assert!(validate_password(&secret(&"a".repeat(MAX_PASSWORD_LENGTH + 1))).is_err());
    }

    #[tokio::test]
    async fn test_register_and_authenticate_buyer() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        let id = auth
            .register_buyer("Alice", "alice", "alice@example.com", &secret("pw123"))
            .await
            .unwrap();

        let principal = auth
            .authenticate(Role::Buyer, "alice", &secret("pw123"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            principal,
            Principal::Buyer {
                id,
                name: "Alice".to_owned()
            }
        );
    }

    #[test]
    fn test_password_limit_counts_bytes() {
        // 64 two-byte characters fill the limit exactly
        assert!(validate_password(&secret(&"é".repeat(64))).is_ok());

        let err = validate_password(&secret(&"é".repeat(65))).unwrap_err();
        assert!(matches!(
            err,
            AuthError::InvalidInput(ref msg) if msg == "password must be at most 128 bytes"
        ));
    }

    #[tokio::test]
    async fn test_identifier_must_match_exactly() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);
        auth.register_buyer("Alice", "alice", "alice@example.com", &secret("pw123"))
            .await
            .unwrap();

        for identifier in [" alice", "alice ", "Alice"] {
            assert!(
                auth.authenticate(Role::Buyer, identifier, &secret("pw123"))
                    .await
                    .unwrap()
                    .is_none(),
                "{identifier:?} should not log in"
            );
        }
    }

    #[tokio::test]
    async fn test_current_account_rereads_storage() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);
        let id = auth.register_seller("Lab Supply", &secret("pw")).await.unwrap();
        let principal = Principal::Seller {
            id,
            store_name: "Lab Supply".to_owned(),
        };

        assert_eq!(
            auth.current_account(&principal).await.unwrap(),
            Some(principal.clone())
        );

        sqlx::query("UPDATE sellers SET store_name = 'Lab Supply Co' WHERE id = ?")
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();
        let renamed = auth.current_account(&principal).await.unwrap().unwrap();
        assert_eq!(renamed.display_name(), "Lab Supply Co");

        sqlx::query("DELETE FROM sellers WHERE id = ?")
            .bind(id)
            .execute(&pool)
            .await
            .unwrap();
        assert!(auth.current_account(&principal).await.unwrap().is_none());

        let ghost = Principal::Buyer {
            id: BuyerId::new(999),
            name: "Ghost".to_owned(),
        };
        assert!(auth.current_account(&ghost).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_roles_do_not_cross() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);
        auth.register_seller("alice", &secret("pw123")).await.unwrap();

        assert!(auth
            .authenticate(Role::Buyer, "alice", &secret("pw123"))
            .await
            .unwrap()
            .is_none());
        assert!(auth
            .authenticate(Role::Seller, "alice", &secret("pw123"))
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_duplicate_maps_to_duplicate_account() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);
        auth.register_seller("Lab Supply", &secret("pw")).await.unwrap();

        assert!(matches!(
            auth.register_seller("Lab Supply", &secret("other")).await,
            Err(AuthError::DuplicateAccount)
        ));
    }

    #[tokio::test]
    async fn test_invalid_email_rejected_before_storage() {
        let pool = test_pool().await;
        let auth = AuthService::new(&pool);

        assert!(matches!(
            auth.register_buyer("Alice", "alice", "not-an-email", &secret("pw"))
                .await,
            Err(AuthError::InvalidInput(_))
        ));

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM buyers")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
