//! Integration tests for PgCardStore.
//! Run with: PSQL_URI=... cargo test -p card-normaliser-storage -- --ignored pg_
//!
//! The tests share the real `cards` table, so every row they insert carries a
//! unique suffix and is deleted afterwards.

#![allow(clippy::unwrap_used, reason = "integration test code")]

use std::time::{SystemTime, UNIX_EPOCH};

use card_normaliser_storage::{CardStore, PgCardStore};
use sqlx::PgPool;

async fn create_pool() -> PgPool {
    let url = std::env::var("PSQL_URI").expect("PSQL_URI must be set for PgCardStore integration tests");
    let pool = PgPool::connect(&url).await.expect("Failed to connect to PostgreSQL");
    sqlx::query("CREATE TABLE IF NOT EXISTS cards (id BIGSERIAL PRIMARY KEY, name TEXT)")
        .execute(&pool)
        .await
        .unwrap();
    pool
}

fn unique(label: &str) -> String {
    let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
    format!("{label} {}-{nanos}", std::process::id())
}

async fn insert_rows(pool: &PgPool, name: &str, count: usize) {
    for _ in 0..count {
        sqlx::query("INSERT INTO cards (name) VALUES ($1)").bind(name).execute(pool).await.unwrap();
    }
}

async fn names_of(pool: &PgPool, normalised_name: &str) -> Vec<String> {
    sqlx::query_scalar::<_, String>("SELECT name FROM cards WHERE normalised_name = $1")
        .bind(normalised_name)
        .fetch_all(pool)
        .await
        .unwrap()
}

async fn cleanup(pool: &PgPool, names: &[&str]) {
    for name in names {
        sqlx::query("DELETE FROM cards WHERE name = $1 OR normalised_name = $1")
            .bind(name)
            .execute(pool)
            .await
            .unwrap();
    }
}

#[tokio::test]
#[ignore]
async fn pg_ensure_normalised_column_is_rerunnable() {
    let pool = create_pool().await;
    let store = PgCardStore::from_pool(pool);

    store.ensure_normalised_column().await.unwrap();
    let added_again = store.ensure_normalised_column().await.unwrap();
    assert!(!added_again, "second run must report the column as already present");
}

#[tokio::test]
#[ignore]
async fn pg_distinct_names_deduplicates() {
    let pool = create_pool().await;
    let store = PgCardStore::from_pool(pool.clone());
    let name = unique("Counterspell");
    insert_rows(&pool, &name, 3).await;

    let names = store.distinct_names().await.unwrap();
    assert_eq!(names.iter().filter(|n| **n == name).count(), 1);

    cleanup(&pool, &[&name]).await;
}

#[tokio::test]
#[ignore]
async fn pg_apply_canonical_name_renames_all_matching_rows() {
    let pool = create_pool().await;
    let store = PgCardStore::from_pool(pool.clone());
    store.ensure_normalised_column().await.unwrap();

    let original = unique("lightning bolt");
    let canonical = unique("Lightning Bolt");
    let bystander = unique("Giant Growth");
    insert_rows(&pool, &original, 2).await;
    insert_rows(&pool, &bystander, 1).await;

    let renamed = store.apply_canonical_name(&original, &canonical).await.unwrap();
    assert_eq!(renamed, 2);
    assert_eq!(names_of(&pool, &original).await, vec![canonical.clone(), canonical.clone()]);

    let untouched: Option<String> =
        sqlx::query_scalar("SELECT normalised_name FROM cards WHERE name = $1")
            .bind(&bystander)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(untouched.is_none(), "rows with other names must not be stamped");

    cleanup(&pool, &[&original, &canonical, &bystander]).await;
}

#[tokio::test]
#[ignore]
async fn pg_apply_canonical_name_unchanged_name_only_stamps() {
    let pool = create_pool().await;
    let store = PgCardStore::from_pool(pool.clone());
    store.ensure_normalised_column().await.unwrap();

    let name = unique("Black Lotus");
    insert_rows(&pool, &name, 1).await;

    let renamed = store.apply_canonical_name(&name, &name).await.unwrap();
    assert_eq!(renamed, 1);
    assert_eq!(names_of(&pool, &name).await, vec![name.clone()]);

    cleanup(&pool, &[&name]).await;
}

#[tokio::test]
#[ignore]
async fn pg_apply_canonical_name_rolls_back_stamp_when_rename_fails() {
    let pool = create_pool().await;
    let store = PgCardStore::from_pool(pool.clone());
    store.ensure_normalised_column().await.unwrap();

    let original = unique("opt");
    insert_rows(&pool, &original, 1).await;

    // Postgres rejects NUL in text, so the rename fails after the stamp ran.
    let result = store.apply_canonical_name(&original, "O\0pt").await;
    assert!(result.is_err());

    let stamped: Option<String> =
        sqlx::query_scalar("SELECT normalised_name FROM cards WHERE name = $1")
            .bind(&original)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(stamped.is_none(), "stamp must be rolled back with the failed rename");

    cleanup(&pool, &[&original]).await;
}

#[tokio::test]
#[ignore]
async fn pg_close_releases_pool() {
    let url = std::env::var("PSQL_URI").expect("PSQL_URI must be set");
    let store = PgCardStore::connect(&url).await.unwrap();
    store.close().await;
    assert!(store.distinct_names().await.is_err());
}
