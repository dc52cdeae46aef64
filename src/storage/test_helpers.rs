//! Shared test helpers for storage module tests.
//!
//! This module provides common utilities for database setup and test data
//! creation used across storage module tests.

#[cfg(test)]
use sqlx::{Row, SqlitePool};

#[cfg(test)]
use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database for fast test execution.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates a mix row and returns its id.
#[cfg(test)]
pub async fn seed_mix(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO mixes (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to insert test mix")
        .get::<i64, _>(0)
}

/// Creates an integration row with a representative production config and
/// returns its id.
#[cfg(test)]
pub async fn seed_integration(
    pool: &SqlitePool,
    mix_id: i64,
    name: &str,
    active: bool,
    position: i64,
) -> i64 {
    let environments = r#"[{
        "name": "production",
        "url": "https://vendor.example/offers",
        "method": "POST",
        "headers": {"content-type": "application/json"},
        "body_template": "{\"fingerprint\":\"{fingerprint}\",\"amount\":\"{payout}\"}"
    }]"#;
    let request_mapping = r#"{"fingerprint": {}, "payout": {"default_value": "0"}}"#;
    let response_parser = r#"{"offer_list_path": "data.items", "mapping": {"title": "t", "url": "u"}}"#;

    sqlx::query(
        "INSERT INTO integrations (mix_id, name, active, position, environments, request_mapping, response_parser)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         RETURNING id",
    )
    .bind(mix_id)
    .bind(name)
    .bind(active)
    .bind(position)
    .bind(environments)
    .bind(request_mapping)
    .bind(response_parser)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test integration")
    .get::<i64, _>(0)
}

/// Creates an integration row with explicit JSON config columns and returns
/// its id. Useful for tests pointing vendors at a mock server.
#[cfg(test)]
pub async fn seed_integration_with(
    pool: &SqlitePool,
    mix_id: i64,
    name: &str,
    position: i64,
    environments: &str,
    request_mapping: &str,
    response_parser: &str,
) -> i64 {
    sqlx::query(
        "INSERT INTO integrations (mix_id, name, active, position, environments, request_mapping, response_parser)
         VALUES (?, ?, 1, ?, ?, ?, ?)
         RETURNING id",
    )
    .bind(mix_id)
    .bind(name)
    .bind(position)
    .bind(environments)
    .bind(request_mapping)
    .bind(response_parser)
    .fetch_one(pool)
    .await
    .expect("Failed to insert test integration")
    .get::<i64, _>(0)
}

/// Creates a visitor profile row.
#[cfg(test)]
pub async fn seed_visitor(pool: &SqlitePool, fingerprint: &str, fields_json: &str) {
    sqlx::query("INSERT INTO visitor_profiles (fingerprint, fields) VALUES (?, ?)")
        .bind(fingerprint)
        .bind(fields_json)
        .execute(pool)
        .await
        .expect("Failed to insert test visitor profile");
}

/// Creates an execution log row for call-log tests and returns its id.
#[cfg(test)]
pub async fn create_test_execution(pool: &SqlitePool, fingerprint: &str, total: i64) -> i64 {
    use crate::storage::models::NewExecutionLog;

    crate::storage::create_execution_log(
        pool,
        &NewExecutionLog {
            mix_id: 1,
            fingerprint,
            origin: "test",
            total_integrations: total,
        },
    )
    .await
    .expect("Failed to insert test execution log")
}
