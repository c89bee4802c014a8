//! Marketplace configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `MARKETPLACE_DATABASE_PATH` - `SQLite` database file (default: ecommerce.db)
//! - `MARKETPLACE_HOST` - Bind address (default: 127.0.0.1)
//! - `MARKETPLACE_PORT` - Listen port (default: 3000)
//! - `MARKETPLACE_BASE_URL` - Public URL (default: <http://localhost:3000>)
//! - `MARKETPLACE_TAX_RATE` - Checkout tax rate as a decimal fraction (default: 0.05)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use sic_marketplace_core::DEFAULT_TAX_RATE;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "ecommerce.db";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Marketplace application configuration.
#[derive(Debug, Clone)]
pub struct MarketplaceConfig {
    /// `SQLite` database file
    pub database_path: PathBuf,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the marketplace
    pub base_url: String,
    /// Tax rate applied at checkout, in `[0, 1]`
    pub tax_rate: Decimal,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_owned(),
            tax_rate: DEFAULT_TAX_RATE,
            sentry_dsn: None,
        }
    }
}

impl MarketplaceConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_path = PathBuf::from(get_env_or_default(
            "MARKETPLACE_DATABASE_PATH",
            DEFAULT_DATABASE_PATH,
        ));
        let host = get_env_or_default("MARKETPLACE_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("MARKETPLACE_HOST".to_owned(), e.to_string()))?;
        let port = get_env_or_default("MARKETPLACE_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("MARKETPLACE_PORT".to_owned(), e.to_string()))?;
        let base_url = get_env_or_default("MARKETPLACE_BASE_URL", "http://localhost:3000");
        let tax_rate = match get_optional_env("MARKETPLACE_TAX_RATE") {
            Some(raw) => parse_tax_rate(&raw)?,
            None => DEFAULT_TAX_RATE,
        };
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_path,
            host,
            port,
            base_url,
            tax_rate,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether session cookies should carry the `Secure` flag.
    #[must_use]
    pub fn secure_cookies(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

/// Parse a tax rate, which must be a decimal fraction between 0 and 1.
fn parse_tax_rate(raw: &str) -> Result<Decimal, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar("MARKETPLACE_TAX_RATE".to_owned(), reason);

    let rate = Decimal::from_str(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if rate < Decimal::ZERO || rate > Decimal::ONE {
        return Err(invalid(format!("must be between 0 and 1 (got {rate})")));
    }
    Ok(rate)
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tax_rate() {
        assert_eq!(parse_tax_rate("0.05").unwrap(), Decimal::new(5, 2));
        assert_eq!(parse_tax_rate(" 0 ").unwrap(), Decimal::ZERO);
        assert_eq!(parse_tax_rate("1").unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_parse_tax_rate_rejects_out_of_range() {
        assert!(matches!(
            parse_tax_rate("1.5"),
            Err(ConfigError::InvalidEnvVar(_, _))
        ));
        assert!(parse_tax_rate("-0.01").is_err());
        assert!(parse_tax_rate("five percent").is_err());
    }

    #[test]
    fn test_default_matches_documented_values() {
        let config = MarketplaceConfig::default();
        assert_eq!(config.database_path, PathBuf::from("ecommerce.db"));
        assert_eq!(config.tax_rate, DEFAULT_TAX_RATE);
        assert!(!config.secure_cookies());
    }

    #[test]
    fn test_socket_addr() {
        let config = MarketplaceConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            ..MarketplaceConfig::default()
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_https_base_url_enables_secure_cookies() {
        let config = MarketplaceConfig {
            base_url: "https://market.example.com".to_owned(),
            ..MarketplaceConfig::default()
        };
        assert!(config.secure_cookies());
    }
}
