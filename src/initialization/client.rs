//! HTTP client initialization.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the shared HTTP client for vendor calls.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from configuration
/// - Global request timeout from configuration
/// - A shorter TCP connect timeout so unreachable vendors fail during
///   connect instead of consuming the whole call budget
///
/// The per-call timeout enforced by the dispatcher is layered on top of
/// these; the global client timeout is a backstop.
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub async fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let client = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
