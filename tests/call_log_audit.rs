//! Audit trail tests: call log completeness and snapshots.
//!
//! The call log is the forensic record of a run: these tests verify one
//! row per attempted vendor call (failures included), faithful request and
//! response snapshots, and that every call row lands before the execution
//! log's final update.

mod helpers;

use std::time::Duration;

use httptest::{matchers::*, responders::*, Expectation, Server};
use serde_json::json;
use sqlx::Row;
use tempfile::TempDir;

use helpers::*;
use offer_mix::AggregationOutcome;

#[tokio::test]
async fn test_one_call_log_row_per_integration_including_timeouts() {
    // N=3 integrations, K=1 timeout: exactly N call rows, and offers from
    // at most N-K integrations.
    let dir = TempDir::new().unwrap();
    let pool = create_test_pool(&dir).await;
    let mix_id = seed_mix(&pool, "mix").await;
    seed_visitor(&pool, "fp-1", "{}").await;

    let vendor = Server::run();
    vendor.expect(
        Expectation::matching(request::method_path("POST", "/offers"))
            .times(2)
            .respond_with(status_code(200).body(r#"{"data":{"items":[{"t":"A","u":"x"}]}}"#)),
    );
    seed_integration(&pool, mix_id, "vendor-1", 0, &vendor.url("/offers").to_string()).await;
    seed_integration(&pool, mix_id, "vendor-2", 1, &vendor.url("/offers").to_string()).await;
    seed_integration(&pool, mix_id, "vendor-slow", 2, &black_hole_server().await).await;

    let ctx = create_test_context(pool.clone(), Duration::from_millis(400));
    let outcome = offer_mix::aggregate_offers(&ctx, mix_id, "fp-1").await;

    match outcome {
        AggregationOutcome::Aggregated { offers, meta } => {
            assert_eq!(meta.successful_integrations, 2);
            assert_eq!(meta.failed_integrations, 1);
            assert!(offers.len() <= 2);
        }
        other => panic!("expected aggregated outcome, got {other:?}"),
    }

    let rows = sqlx::query("SELECT status, created_at_ms FROM call_logs ORDER BY id")
        .fetch_all(pool.as_ref())
        .await
        .unwrap();
    assert_eq!(rows.len(), 3, "one call log row per attempted integration");

    let statuses: Vec<String> = rows.iter().map(|r| r.get::<String, _>("status")).collect();
    assert_eq!(statuses.iter().filter(|s| *s == "success").count(), 2);
    assert_eq!(statuses.iter().filter(|s| *s == "timeout").count(), 1);

    // Every call row must land before the execution log's final update
    let finished_at_ms: i64 =
        sqlx::query_scalar("SELECT finished_at_ms FROM execution_logs LIMIT 1")
            .fetch_one(pool.as_ref())
            .await
            .unwrap();
    for row in &rows {
        assert!(row.get::<i64, _>("created_at_ms") <= finished_at_ms);
    }
}

#[tokio::test]
async fn test_call_log_snapshots_request_and_response() {
    let dir = TempDir::new().unwrap();
    let pool = create_test_pool(&dir).await;
    let mix_id = seed_mix(&pool, "mix").await;
    seed_visitor(&pool, "fp-7", &json!({"fingerprint": "fp-7"}).to_string()).await;

    let vendor = Server::run();
    vendor.expect(
        Expectation::matching(request::method_path("POST", "/offers"))
            .respond_with(status_code(200).body(r#"{"data":{"items":[]}}"#)),
    );
    let url = vendor.url("/offers").to_string();
    seed_integration(&pool, mix_id, "vendor", 0, &url).await;

    let ctx = create_test_context(pool.clone(), Duration::from_secs(2));
    offer_mix::aggregate_offers(&ctx, mix_id, "fp-7").await;

    let row = sqlx::query("SELECT * FROM call_logs")
        .fetch_one(pool.as_ref())
        .await
        .unwrap();

    assert_eq!(row.get::<String, _>("request_method"), "POST");
    assert_eq!(row.get::<String, _>("request_url"), url);
    assert_eq!(
        row.get::<String, _>("request_body"),
        r#"{"fingerprint":"fp-7","amount":"0"}"#
    );
    assert_eq!(row.get::<Option<i64>, _>("http_status"), Some(200));
    assert_eq!(
        row.get::<Option<String>, _>("response_body").as_deref(),
        Some(r#"{"data":{"items":[]}}"#)
    );
    // Header snapshots are stored as JSON arrays of [name, value] pairs
    let request_headers: Vec<(String, String)> =
        serde_json::from_str(&row.get::<String, _>("request_headers")).unwrap();
    assert!(request_headers
        .iter()
        .any(|(name, value)| name == "content-type" && value == "application/json"));
    let response_headers: Vec<(String, String)> =
        serde_json::from_str(&row.get::<String, _>("response_headers")).unwrap();
    assert!(!response_headers.is_empty());
    assert!(row.get::<i64, _>("duration_ms") >= 0);
}

#[tokio::test]
async fn test_failed_call_records_error_detail() {
    let dir = TempDir::new().unwrap();
    let pool = create_test_pool(&dir).await;
    let mix_id = seed_mix(&pool, "mix").await;
    seed_visitor(&pool, "fp-1", "{}").await;

    let vendor = Server::run();
    vendor.expect(
        Expectation::matching(request::method_path("POST", "/offers"))
            .respond_with(status_code(429).body("slow down")),
    );
    seed_integration(&pool, mix_id, "vendor", 0, &vendor.url("/offers").to_string()).await;

    let ctx = create_test_context(pool.clone(), Duration::from_secs(2));
    let outcome = offer_mix::aggregate_offers(&ctx, mix_id, "fp-1").await;

    // One integration, zero offers: soft failure, not an internal error
    assert!(matches!(outcome, AggregationOutcome::NoOffersFound { .. }));

    let row = sqlx::query("SELECT status, http_status, response_body, error FROM call_logs")
        .fetch_one(pool.as_ref())
        .await
        .unwrap();
    assert_eq!(row.get::<String, _>("status"), "http_error");
    assert_eq!(row.get::<Option<i64>, _>("http_status"), Some(429));
    // Non-2xx bodies are still captured for diagnosis
    assert_eq!(
        row.get::<Option<String>, _>("response_body").as_deref(),
        Some("slow down")
    );
    assert!(row
        .get::<Option<String>, _>("error")
        .unwrap()
        .contains("429"));
}

#[tokio::test]
async fn test_execution_history_reflects_finalized_runs() {
    let dir = TempDir::new().unwrap();
    let pool = create_test_pool(&dir).await;
    let mix_id = seed_mix(&pool, "mix").await;
    seed_visitor(&pool, "fp-1", "{}").await;

    let vendor = Server::run();
    vendor.expect(
        Expectation::matching(request::method_path("POST", "/offers"))
            .times(2)
            .respond_with(status_code(200).body(r#"{"data":{"items":[{"t":"A","u":"x"}]}}"#)),
    );
    seed_integration(&pool, mix_id, "vendor", 0, &vendor.url("/offers").to_string()).await;

    let ctx = create_test_context(pool.clone(), Duration::from_secs(2));
    offer_mix::aggregate_offers(&ctx, mix_id, "fp-1").await;
    offer_mix::aggregate_offers(&ctx, mix_id, "fp-1").await;

    let history = offer_mix::query_execution_history(pool.as_ref(), Some(10))
        .await
        .unwrap();
    assert_eq!(history.len(), 2);
    for run in history {
        assert_eq!(run.mix_id, mix_id);
        assert_eq!(run.fingerprint, "fp-1");
        assert_eq!(run.origin, "test");
        assert_eq!(run.total_integrations, 1);
        assert_eq!(run.successful_integrations, 1);
        assert_eq!(run.total_offers, 1);
        assert!(run.finished_at_ms.is_some());
    }
}
