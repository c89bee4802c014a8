//! Business logic services for the marketplace.
//!
//! # Services
//!
//! - `auth` - Buyer and seller registration and login
//! - `catalog` - Product listing and browsing
//! - `checkout` - Turning a cart into a paid order

pub mod auth;
pub mod catalog;
pub mod checkout;

pub use auth::{AuthError, AuthService};
pub use catalog::{CatalogError, CatalogService};
pub use checkout::{CheckoutError, CheckoutService, Receipt};
