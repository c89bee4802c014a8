//! Concurrent sessions against a file-backed database.
//!
//! These run on the production pool (WAL, busy timeout, several
//! connections), not the single-connection in-memory pool.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use sqlx::SqlitePool;
use tokio::task::JoinSet;

use sic_marketplace_core::Category;
use sic_marketplace_integration_tests::secret;
use sic_marketplace_storefront::db;
use sic_marketplace_storefront::services::{AuthError, AuthService, CatalogService};

const WRITERS: usize = 8;

async fn file_pool(dir: &tempfile::TempDir) -> SqlitePool {
    let pool = db::create_pool(dir.path().join("market.db")).await.unwrap();
    db::init_schema(&pool).await.unwrap();
    pool
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_same_username_registered_concurrently_once() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_pool(&dir).await;

    let mut tasks = JoinSet::new();
    for i in 0..WRITERS {
        let pool = pool.clone();
        tasks.spawn(async move {
            AuthService::new(&pool)
                .register_buyer(
                    "Alice",
                    "alice",
                    &format!("alice{i}@example.com"),
                    &secret("pw1"),
                )
                .await
        });
    }

    let mut created = 0;
    let mut duplicates = 0;
    while let Some(result) = tasks.join_next().await {
        match result.unwrap() {
            Ok(_) => created += 1,
            Err(AuthError::DuplicateAccount) => duplicates += 1,
            Err(other) => panic!("unexpected error: {other}"),
        }
    }
    assert_eq!(created, 1);
    assert_eq!(duplicates, WRITERS - 1);

    let stored: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM buyers WHERE username = 'alice'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_listings_and_reads_all_succeed() {
    let dir = tempfile::tempdir().unwrap();
    let pool = file_pool(&dir).await;
    let seller_id = AuthService::new(&pool)
        .register_seller("Lab Supply", &secret("pw"))
        .await
        .unwrap();

    let mut tasks = JoinSet::new();
    for i in 0..WRITERS {
        let pool = pool.clone();
        tasks.spawn(async move {
            let catalog = CatalogService::new(&pool);
            catalog
                .add_product(
                    &format!("Probe {i}"),
                    Decimal::new(500, 2),
                    Category::Electronics,
                    seller_id,
                )
                .await
                .unwrap();
            catalog.browse_products().await.unwrap().len()
        });
    }

    while let Some(result) = tasks.join_next().await {
        // Each reader sees at least its own listing
        assert!(result.unwrap() >= 1);
    }

    let products = CatalogService::new(&pool).browse_products().await.unwrap();
    assert_eq!(products.len(), WRITERS);
}
