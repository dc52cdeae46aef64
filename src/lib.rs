//! offer_mix library: config-driven offer aggregation
//!
//! This library aggregates monetizable offers for a visitor by calling a
//! mix's vendor integrations concurrently, transforming the stored visitor
//! profile into each vendor's request shape, parsing heterogeneous vendor
//! responses into flat offer records, and persisting a full audit trail
//! (one execution log per run, one call log per vendor call) in a SQLite
//! database. Individual vendor failures never fail the whole aggregation.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use offer_mix::initialization::init_client;
//! use offer_mix::{
//!     aggregate_offers, init_db_pool, run_migrations, AggregationOutcome, AlertSink, Config,
//!     DispatchStats, EngineContext,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//! let pool = init_db_pool(&config.db_path).await?;
//! run_migrations(&pool).await?;
//! let client = init_client(&config).await?;
//!
//! let ctx = EngineContext::new(
//!     pool,
//!     Arc::clone(&client),
//!     Arc::new(AlertSink::new(None, client)),
//!     Arc::new(DispatchStats::new()),
//!     Duration::from_secs(config.timeout_seconds),
//!     config.origin.clone(),
//! );
//!
//! match aggregate_offers(&ctx, 1, "fp-3f9a").await {
//!     AggregationOutcome::Aggregated { offers, meta } => {
//!         println!("{} offers in {}ms", meta.total_offers, meta.duration_ms);
//!         drop(offers);
//!     }
//!     other => println!("no offers: {:?}", other.status_code()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your
//! application or ensure you're calling library functions within an async
//! context.

#![warn(missing_docs)]

mod aggregate;
mod alert;
pub mod config;
mod dispatch;
mod error_handling;
mod extract;
pub mod initialization;
mod mapping;
mod models;
mod storage;
mod utils;

// Re-export public API
pub use aggregate::{aggregate_offers, AggregationOutcome, EngineContext, RunMeta};
pub use alert::{AlertSeverity, AlertSink};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{log_dispatch_statistics, DispatchStats};
pub use models::OfferRecord;
pub use storage::{init_db_pool, query_execution_history, run_migrations, ExecutionSummary};
