//! Authentication error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    /// A registration field is missing or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The username, email or store name is already registered.
    ///
    /// Deliberately does not say which field collided.
    #[error("an account with these details already exists")]
    DuplicateAccount,

    /// Password hashing error.
    #[error("password hashing error")]
    PasswordHash,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

impl From<sic_marketplace_core::EmailError> for AuthError {
    fn from(err: sic_marketplace_core::EmailError) -> Self {
        Self::InvalidInput(format!("email: {err}"))
    }
}
