//! Aggregation orchestration.
//!
//! One run flows LOADING → DISPATCHING → EXTRACTING → FINALIZED: load the
//! visitor profile and the mix's integrations, fan out one vendor call per
//! integration, merge successful responses into the offer list, and
//! finalize the execution log. Failures below the orchestrator never
//! propagate past their owning step; anything unexpected is caught once at
//! the top, logged, best-effort alerted, and mapped to
//! [`AggregationOutcome::InternalError`].

mod context;
mod result;

pub use context::EngineContext;
pub use result::{AggregationOutcome, RunMeta};

use std::collections::HashMap;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, error, info, warn};

use crate::alert::AlertSeverity;
use crate::dispatch::{dispatch_all, prepare_request, CallOutcome, PreparedRequest};
use crate::extract::extract_offers;
use crate::models::{OfferRecord, ResponseParserConfig};
use crate::storage::{
    create_execution_log, finalize_execution_log, get_visitor_profile, load_active_integrations,
    record_call, ExecutionStats, NewCallLog, NewExecutionLog,
};
use crate::utils::serialize_headers;

/// Aggregates offers for one visitor across a mix's vendor integrations.
///
/// This is the engine's main entry point. The caller always receives one of
/// the four [`AggregationOutcome`] variants, never an error: unexpected
/// failures are logged, alerted best-effort, and surfaced as
/// `InternalError`. A partially-written execution log is left in its
/// last-known state rather than retried.
pub async fn aggregate_offers(
    ctx: &EngineContext,
    mix_id: i64,
    fingerprint: &str,
) -> AggregationOutcome {
    match run_aggregation(ctx, mix_id, fingerprint).await {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Aggregation failed for mix {mix_id}, fingerprint {fingerprint}: {e:#}");
            ctx.alerts
                .notify(
                    "Offer aggregation failed",
                    &format!("{e:#}"),
                    &[
                        ("mix_id", mix_id.to_string()),
                        ("fingerprint", fingerprint.to_string()),
                    ],
                    AlertSeverity::Critical,
                )
                .await;
            AggregationOutcome::InternalError
        }
    }
}

/// The fallible body of a run; errors here become `InternalError` above.
async fn run_aggregation(
    ctx: &EngineContext,
    mix_id: i64,
    fingerprint: &str,
) -> Result<AggregationOutcome> {
    let started = Instant::now();

    // LOADING
    let profile = get_visitor_profile(&ctx.pool, fingerprint)
        .await
        .context("Failed to load visitor profile")?;
    let Some(profile) = profile else {
        debug!("No profile for fingerprint {fingerprint}; nothing to aggregate");
        return Ok(AggregationOutcome::VisitorNotFound);
    };

    let integrations = load_active_integrations(&ctx.pool, mix_id)
        .await
        .context("Failed to load mix integrations")?;

    let mut requests: Vec<PreparedRequest> = Vec::with_capacity(integrations.len());
    let mut parsers: Vec<(i64, ResponseParserConfig)> = Vec::with_capacity(integrations.len());
    for integration in &integrations {
        if let Some(request) = prepare_request(integration, &profile) {
            parsers.push((integration.id, integration.response_parser.clone()));
            requests.push(request);
        }
    }
    let total_integrations = requests.len() as i64;

    // The execution log row exists before any vendor call is made
    let execution_id = create_execution_log(
        &ctx.pool,
        &NewExecutionLog {
            mix_id,
            fingerprint,
            origin: &ctx.origin,
            total_integrations,
        },
    )
    .await
    .context("Failed to create execution log")?;

    if requests.is_empty() {
        // Nothing dispatchable: a successful run with an empty offer list
        let meta = RunMeta {
            total_offers: 0,
            successful_integrations: 0,
            failed_integrations: 0,
            duration_ms: elapsed_ms(started),
        };
        finalize_execution_log(
            &ctx.pool,
            &ExecutionStats {
                execution_id,
                successful_integrations: 0,
                failed_integrations: 0,
                total_offers: 0,
                duration_ms: meta.duration_ms,
            },
        )
        .await
        .context("Failed to finalize execution log")?;
        info!("Execution {execution_id}: mix {mix_id} has no dispatchable integrations");
        return Ok(AggregationOutcome::Aggregated {
            offers: Vec::new(),
            meta,
        });
    }

    info!("Execution {execution_id}: dispatching {total_integrations} integrations for mix {mix_id}");

    // DISPATCHING through FINALIZED run on their own task: if the caller
    // abandons the response mid-flight, in-flight vendor calls still run to
    // their timeouts and the audit rows still land.
    let task_ctx = ctx.clone();
    let handle = tokio::spawn(async move {
        run_dispatch_phase(task_ctx, execution_id, requests, parsers, started).await
    });
    handle
        .await
        .context("Aggregation task terminated abnormally")?
}

/// DISPATCHING → EXTRACTING → FINALIZED.
///
/// Every call log row is written before the execution log's final update,
/// so the finalized row never reports counts higher than logged calls.
async fn run_dispatch_phase(
    ctx: EngineContext,
    execution_id: i64,
    requests: Vec<PreparedRequest>,
    parsers: Vec<(i64, ResponseParserConfig)>,
    started: Instant,
) -> Result<AggregationOutcome> {
    let total_integrations = requests.len() as i64;

    let outcomes = dispatch_all(&ctx.client, requests, ctx.call_timeout, &ctx.stats).await;

    for outcome in &outcomes {
        let request_headers = serialize_headers(&outcome.request.headers);
        let response_headers = serialize_headers(&outcome.response_headers);
        record_call(
            &ctx.pool,
            &NewCallLog {
                execution_id,
                integration_id: outcome.request.integration_id,
                status: outcome.status.as_str(),
                http_status: outcome.http_status.map(i64::from),
                duration_ms: outcome.duration.as_millis() as i64,
                request_method: &outcome.request.method,
                request_url: &outcome.request.url,
                request_headers: &request_headers,
                request_body: &outcome.request.body,
                response_headers: &response_headers,
                response_body: outcome.response_body.as_deref(),
                error: outcome.error.as_deref(),
            },
        )
        .await
        .context("Failed to record call log")?;
    }

    // EXTRACTING: merge offers preserving integration order, then
    // per-vendor element order
    let outcomes_by_id: HashMap<i64, &CallOutcome> = outcomes
        .iter()
        .map(|outcome| (outcome.request.integration_id, outcome))
        .collect();

    let mut offers: Vec<OfferRecord> = Vec::new();
    let mut successful = 0i64;
    let mut failed = 0i64;
    for (integration_id, parser) in &parsers {
        let Some(outcome) = outcomes_by_id.get(integration_id) else {
            continue;
        };
        if !outcome.is_success() {
            failed += 1;
            continue;
        }
        successful += 1;
        let raw = outcome.response_body.as_deref().unwrap_or("");
        match serde_json::from_str::<serde_json::Value>(raw) {
            Ok(body) => {
                let extracted = extract_offers(&body, parser);
                debug!(
                    "Integration {integration_id} yielded {} offers",
                    extracted.len()
                );
                offers.extend(extracted);
            }
            Err(e) => {
                warn!(
                    "Integration {integration_id} returned unparseable JSON; treating as zero offers: {e}"
                );
            }
        }
    }

    let duration_ms = elapsed_ms(started);
    let meta = RunMeta {
        total_offers: offers.len() as i64,
        successful_integrations: successful,
        failed_integrations: failed,
        duration_ms,
    };

    finalize_execution_log(
        &ctx.pool,
        &ExecutionStats {
            execution_id,
            successful_integrations: successful,
            failed_integrations: failed,
            total_offers: meta.total_offers,
            duration_ms,
        },
    )
    .await
    .context("Failed to finalize execution log")?;

    info!(
        "Execution {execution_id}: {} offers from {successful}/{total_integrations} integrations in {duration_ms}ms",
        meta.total_offers
    );

    if offers.is_empty() {
        // Integrations ran but nothing came back: soft failure, still a
        // successfully logged run
        return Ok(AggregationOutcome::NoOffersFound { meta });
    }
    Ok(AggregationOutcome::Aggregated { offers, meta })
}

fn elapsed_ms(started: Instant) -> i64 {
    started.elapsed().as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::alert::AlertSink;
    use crate::error_handling::DispatchStats;
    use crate::storage::test_helpers::{create_test_pool, seed_mix, seed_visitor};

    fn test_context(pool: sqlx::SqlitePool) -> EngineContext {
        let client = Arc::new(reqwest::Client::new());
        EngineContext::new(
            Arc::new(pool),
            Arc::clone(&client),
            Arc::new(AlertSink::new(None, client)),
            Arc::new(DispatchStats::new()),
            Duration::from_millis(500),
            "test".to_string(),
        )
    }

    #[tokio::test]
    async fn test_unknown_fingerprint_is_not_found_without_logging() {
        let pool = create_test_pool().await;
        let ctx = test_context(pool.clone());

        let outcome = aggregate_offers(&ctx, 1, "fp-unknown").await;

        assert!(matches!(outcome, AggregationOutcome::VisitorNotFound));
        // A "not found" outcome must leave no execution log behind
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM execution_logs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }

    #[tokio::test]
    async fn test_mix_with_no_integrations_is_an_empty_success() {
        let pool = create_test_pool().await;
        seed_visitor(&pool, "fp-1", r#"{"email":"v@example.com"}"#).await;
        let mix_id = seed_mix(&pool, "empty-mix").await;
        let ctx = test_context(pool.clone());

        let outcome = aggregate_offers(&ctx, mix_id, "fp-1").await;

        match outcome {
            AggregationOutcome::Aggregated { offers, meta } => {
                assert!(offers.is_empty());
                assert_eq!(meta.successful_integrations, 0);
                assert_eq!(meta.failed_integrations, 0);
                assert_eq!(meta.total_offers, 0);
            }
            other => panic!("expected empty success, got {other:?}"),
        }

        // The run is still logged, finalized, with zero counts
        let row = sqlx::query("SELECT total_integrations, finished_at_ms FROM execution_logs")
            .fetch_one(&pool)
            .await
            .unwrap();
        use sqlx::Row;
        assert_eq!(row.get::<i64, _>("total_integrations"), 0);
        assert!(row.get::<Option<i64>, _>("finished_at_ms").is_some());
    }

    #[tokio::test]
    async fn test_integration_without_production_env_is_skipped_silently() {
        let pool = create_test_pool().await;
        seed_visitor(&pool, "fp-1", r#"{}"#).await;
        let mix_id = seed_mix(&pool, "mix").await;
        crate::storage::test_helpers::seed_integration_with(
            &pool,
            mix_id,
            "staging-only",
            0,
            r#"[{"name": "staging", "url": "http://127.0.0.1:1/"}]"#,
            "{}",
            r#"{"offer_list_path": "offers"}"#,
        )
        .await;
        let ctx = test_context(pool.clone());

        let outcome = aggregate_offers(&ctx, mix_id, "fp-1").await;

        // Not an error: the unusable integration is simply not dispatched
        match outcome {
            AggregationOutcome::Aggregated { offers, meta } => {
                assert!(offers.is_empty());
                assert_eq!(meta.successful_integrations, 0);
                assert_eq!(meta.failed_integrations, 0);
            }
            other => panic!("expected empty success, got {other:?}"),
        }
        let calls: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM call_logs")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(calls, 0);
    }
}
