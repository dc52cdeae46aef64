// Shared test helpers for database setup and test data creation.
//
// This module provides common utilities used across multiple test files to
// reduce duplication.

use std::sync::Arc;
use std::time::Duration;

use sqlx::{Row, SqlitePool};
use tempfile::TempDir;
use tokio::net::TcpListener;

use offer_mix::{init_db_pool, run_migrations, AlertSink, DispatchStats, EngineContext};

/// Creates a file-backed test database pool with migrations applied.
/// The pool lives in the provided temp directory so each test is isolated.
#[allow(dead_code)] // Used by other test files
pub async fn create_test_pool(dir: &TempDir) -> Arc<SqlitePool> {
    let db_path = dir.path().join("offer_mix_test.db");
    let pool = init_db_pool(&db_path)
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Builds an engine context around a test pool with a short call timeout.
#[allow(dead_code)] // Used by other test files
pub fn create_test_context(pool: Arc<SqlitePool>, call_timeout: Duration) -> EngineContext {
    let client = Arc::new(reqwest::Client::new());
    EngineContext::new(
        pool,
        Arc::clone(&client),
        Arc::new(AlertSink::new(None, client)),
        Arc::new(DispatchStats::new()),
        call_timeout,
        "test".to_string(),
    )
}

/// Creates a mix row and returns its id.
#[allow(dead_code)] // Used by other test files
pub async fn seed_mix(pool: &SqlitePool, name: &str) -> i64 {
    sqlx::query("INSERT INTO mixes (name) VALUES (?) RETURNING id")
        .bind(name)
        .fetch_one(pool)
        .await
        .expect("Failed to insert test mix")
        .get::<i64, _>(0)
}

/// Creates a visitor profile row.
#[allow(dead_code)] // Used by other test files
pub async fn seed_visitor(pool: &SqlitePool, fingerprint: &str, fields_json: &str) {
    sqlx::query("INSERT INTO visitor_profiles (fingerprint, fields) VALUES (?, ?)")
        .bind(fingerprint)
        .bind(fields_json)
        .execute(pool)
        .await
        .expect("Failed to insert test visitor profile");
}

/// Creates an active integration row pointing at `url` and returns its id.
///
/// The integration uses the standard test shape: a JSON body template with
/// `{fingerprint}` and `{payout}` tokens (payout defaulting to "0") and a
/// `data.items` parser mapping `t`/`u` to `title`/`url`.
#[allow(dead_code)] // Used by other test files
pub async fn seed_integration(pool: &SqlitePool, mix_id: i64, name: &str, position: i64, url: &str) -> i64 {
    let environments = format!(
        r#"[{{
            "name": "production",
            "url": "{url}",
            "method": "POST",
            "headers": {{"content-type": "application/json"}},
            "body_template": "{{\"fingerprint\":\"{{fingerprint}}\",\"amount\":\"{{payout}}\"}}"
        }}]"#
    );
    let request_mapping = r#"{"fingerprint": {}, "payout": {"default_value": "0"}}"#;
    let response_parser = r#"{"offer_list_path": "data.items", "mapping": {"title": "t", "url": "u"}}"#;

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

/// Spawns a server that accepts connections and never responds, so calls
/// against it run into the per-call timeout.
#[allow(dead_code)] // Used by other test files
pub async fn black_hole_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        loop {
            let Ok((socket, _)) = listener.accept().await else {
                break;
            };
            tokio::spawn(async move {
                // Hold the socket open until the client gives up
                tokio::time::sleep(Duration::from_secs(60)).await;
                drop(socket);
            });
        }
    });
    format!("http://{addr}/")
}
