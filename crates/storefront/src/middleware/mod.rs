//! HTTP middleware stack for the marketplace.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added by the binary)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with `SQLite` store)

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::{
    AuthRejection, RequireAuth, RequireBuyer, RequireSeller, end_market_session,
    save_market_session, start_market_session,
};
pub use request_id::request_id_middleware;
pub use session::{create_session_layer, create_session_store};
