//! Domain models for the marketplace.
//!
//! These types represent validated records read back from the persistence
//! gateway, separate from the row types the repositories decode.

pub mod account;
pub mod order;
pub mod product;
pub mod session;

pub use account::{Buyer, Principal, Seller};
pub use order::Order;
pub use product::Product;
pub use session::{MarketSession, session_keys};
