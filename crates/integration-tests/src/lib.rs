//! Integration tests for the SIC Marketplace.
//!
//! Every test gets its own in-memory `SQLite` database, so tests need no
//! running services and can run in parallel.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p sic-marketplace-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `identity` - Registration and login through the services
//! - `catalog` - Product listing rules
//! - `checkout` - Cart totals and order persistence
//! - `http` - End-to-end flows through the router and sessions

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use secrecy::SecretString;
use serde_json::Value;
use sqlx::SqlitePool;
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use sic_marketplace_core::{BuyerId, SellerId};
use sic_marketplace_storefront::config::MarketplaceConfig;
use sic_marketplace_storefront::db;
use sic_marketplace_storefront::services::AuthService;
use sic_marketplace_storefront::state::AppState;

/// A fresh database with the schema applied.
pub struct TestContext {
    pub pool: SqlitePool,
}

impl TestContext {
    pub async fn new() -> Self {
        let pool = db::create_memory_pool().await.unwrap();
        db::init_schema(&pool).await.unwrap();
        Self { pool }
    }

    #[must_use]
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(&self.pool)
    }

    /// Register a buyer named after `username`.
    pub async fn buyer(&self, username: &str, password: &str) -> BuyerId {
        self.auth()
            .register_buyer(
                username,
                username,
                &format!("{username}@example.com"),
                &secret(password),
            )
            .await
            .unwrap()
    }

    pub async fn seller(&self, store_name: &str, password: &str) -> SellerId {
        self.auth()
            .register_seller(store_name, &secret(password))
            .await
            .unwrap()
    }

    /// The full application router over this database.
    #[must_use]
    pub fn router(&self) -> Router {
        let state = AppState::new(MarketplaceConfig::default(), self.pool.clone());
        sic_marketplace_storefront::app(state, MemoryStore::default())
    }
}

#[must_use]
pub fn secret(value: &str) -> SecretString {
    SecretString::from(value.to_owned())
}

/// A single browser: one router plus the session cookie it was last given.
pub struct TestClient {
    router: Router,
    cookie: Option<String>,
}

impl TestClient {
    #[must_use]
    pub const fn new(router: Router) -> Self {
        Self {
            router,
            cookie: None,
        }
    }

    pub async fn get(&mut self, uri: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body)).await
    }

    /// Send a request, keeping any session cookie the response sets.
    ///
    /// Empty or non-JSON bodies come back as `Value::Null`.
    pub async fn send(
        &mut self,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap()
                .to_owned();
            self.cookie = Some(pair);
        }

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}
