//! Shared run context for aggregation operations.
//!
//! Groups the resources every run needs, reducing function argument counts
//! and making the orchestration easier to test.

use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;

use crate::alert::AlertSink;
use crate::error_handling::DispatchStats;

/// Context containing all shared resources needed for aggregation runs.
///
/// Cheap to clone; concurrent runs for different fingerprints share one
/// context and require no cross-run coordination.
#[derive(Clone)]
pub struct EngineContext {
    /// Database connection pool
    pub pool: Arc<SqlitePool>,
    /// HTTP client for vendor calls
    pub client: Arc<reqwest::Client>,
    /// Best-effort alert sink for system failures
    pub alerts: Arc<AlertSink>,
    /// Vendor-call failure counters
    pub stats: Arc<DispatchStats>,
    /// Fixed per-vendor-call timeout
    pub call_timeout: Duration,
    /// Origin label recorded on execution logs
    pub origin: String,
}

impl EngineContext {
    /// Creates a new `EngineContext` with the given resources.
    pub fn new(
        pool: Arc<SqlitePool>,
        client: Arc<reqwest::Client>,
        alerts: Arc<AlertSink>,
        stats: Arc<DispatchStats>,
        call_timeout: Duration,
        origin: String,
    ) -> Self {
        Self {
            pool,
            client,
            alerts,
            stats,
            call_timeout,
            origin,
        }
    }
}
