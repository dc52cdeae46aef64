//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `offer_mix` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use offer_mix::initialization::{init_client, init_logger_with};
use offer_mix::{
    aggregate_offers, init_db_pool, log_dispatch_statistics, query_execution_history,
    run_migrations, AggregationOutcome, AlertSink, Config, DispatchStats, EngineContext,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command-line arguments into Config
    let config = Config::parse();

    // Initialize logger based on config
    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let pool = init_db_pool(&config.db_path)
        .await
        .context("Failed to initialize database pool")?;
    run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    if config.history {
        let runs = query_execution_history(&pool, Some(config.history_limit))
            .await
            .context("Failed to query execution history")?;
        if runs.is_empty() {
            println!("No finalized runs recorded yet.");
            return Ok(());
        }
        for run in runs {
            println!(
                "Run {} (mix {}, fingerprint {}): {} offers from {}/{} integrations ({} failed) in {}ms [{}]",
                run.id,
                run.mix_id,
                run.fingerprint,
                run.total_offers,
                run.successful_integrations,
                run.total_integrations,
                run.failed_integrations,
                run.duration_ms.unwrap_or(0),
                run.origin,
            );
        }
        return Ok(());
    }

    let fingerprint = config
        .fingerprint
        .clone()
        .expect("clap enforces --fingerprint unless --history is set");

    let client = init_client(&config)
        .await
        .context("Failed to initialize HTTP client")?;
    let stats = Arc::new(DispatchStats::new());
    let alerts = Arc::new(AlertSink::new(
        config.alert_webhook.clone(),
        Arc::clone(&client),
    ));

    let ctx = EngineContext::new(
        pool,
        client,
        alerts,
        Arc::clone(&stats),
        Duration::from_secs(config.timeout_seconds),
        config.origin.clone(),
    );

    let outcome = aggregate_offers(&ctx, config.mix_id, &fingerprint).await;
    log_dispatch_statistics(&stats);

    match outcome {
        AggregationOutcome::Aggregated { offers, meta } => {
            println!(
                "✅ Aggregated {} offer{} from {}/{} integrations ({} failed) in {}ms",
                meta.total_offers,
                if meta.total_offers == 1 { "" } else { "s" },
                meta.successful_integrations,
                meta.successful_integrations + meta.failed_integrations,
                meta.failed_integrations,
                meta.duration_ms
            );
            println!(
                "{}",
                serde_json::to_string_pretty(&offers).unwrap_or_else(|_| "[]".to_string())
            );
            Ok(())
        }
        AggregationOutcome::NoOffersFound { meta } => {
            println!(
                "No offers found: {}/{} integrations succeeded ({} failed) in {}ms",
                meta.successful_integrations,
                meta.successful_integrations + meta.failed_integrations,
                meta.failed_integrations,
                meta.duration_ms
            );
            Ok(())
        }
        AggregationOutcome::VisitorNotFound => {
            println!("No visitor profile found for fingerprint {fingerprint}");
            Ok(())
        }
        AggregationOutcome::InternalError => {
            eprintln!("offer_mix error: aggregation failed, see logs for details");
            process::exit(1);
        }
    }
}
