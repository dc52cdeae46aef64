//! Best-effort failure alerting.
//!
//! [`AlertSink`] posts a JSON payload to a configured webhook URL when the
//! aggregator hits a system failure. Delivery is strictly best-effort: every
//! failure to alert is swallowed and logged at WARN, never escalated to the
//! caller.

use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};

/// Severity attached to an alert payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertSeverity {
    /// Informational notice.
    Info,
    /// Degraded but operating.
    Warning,
    /// A run failed outright.
    Critical,
}

impl AlertSeverity {
    /// String form sent in the webhook payload.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Info => "info",
            AlertSeverity::Warning => "warning",
            AlertSeverity::Critical => "critical",
        }
    }
}

/// HTTP request timeout for a single alert delivery attempt.
const ALERT_TIMEOUT: Duration = Duration::from_secs(5);

/// Webhook alert sink. With no webhook URL configured, `notify` is a no-op.
pub struct AlertSink {
    webhook_url: Option<String>,
    client: Arc<reqwest::Client>,
}

impl AlertSink {
    /// Creates a sink posting to `webhook_url` via the shared client, or a
    /// disabled sink when no URL is configured.
    pub fn new(webhook_url: Option<String>, client: Arc<reqwest::Client>) -> Self {
        Self {
            webhook_url,
            client,
        }
    }

    /// Delivers one alert, best-effort.
    ///
    /// Never returns an error: delivery problems (no route, non-2xx,
    /// timeout) are logged and swallowed so alerting can never worsen the
    /// failure being reported.
    pub async fn notify(
        &self,
        title: &str,
        message: &str,
        fields: &[(&str, String)],
        severity: AlertSeverity,
    ) {
        let Some(url) = self.webhook_url.as_deref() else {
            debug!("Alert webhook not configured; dropping alert: {title}");
            return;
        };

        let fields_object: serde_json::Map<String, serde_json::Value> = fields
            .iter()
            .map(|(name, value)| ((*name).to_string(), serde_json::Value::String(value.clone())))
            .collect();
        let payload = serde_json::json!({
            "title": title,
            "message": message,
            "severity": severity.as_str(),
            "fields": fields_object,
            "timestamp_ms": chrono::Utc::now().timestamp_millis(),
        });

        let result = self
            .client
            .post(url)
            .timeout(ALERT_TIMEOUT)
            .json(&payload)
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!("Alert delivered: {title}");
            }
            Ok(response) => {
                warn!(
                    "Alert webhook returned HTTP {} for alert: {title}",
                    response.status().as_u16()
                );
            }
            Err(e) => {
                warn!("Failed to deliver alert '{title}': {e}");
            }
        }
    }
}
