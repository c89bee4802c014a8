//! SIC Marketplace Core - Shared types library.
//!
//! This crate provides the types used across all marketplace components:
//! - `storefront` - Persistence gateway, services and the JSON API
//! - `cli` - Operator tooling (schema setup, seller and product management)
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no database
//! access. Enabling the `sqlite` feature adds sqlx encode/decode support so the
//! same types can be bound directly in queries.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, categories and statuses
//! - [`cart`] - In-session cart and the totals calculator

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::{Cart, CartError, CartTotals, DEFAULT_TAX_RATE, LineItem, compute_totals};
pub use types::*;
