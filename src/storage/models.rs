//! Row parameter and summary structs for the audit tables.

/// Parameters for creating an execution log at run start.
pub struct NewExecutionLog<'a> {
    /// Mix being aggregated.
    pub mix_id: i64,
    /// Visitor fingerprint for the run.
    pub fingerprint: &'a str,
    /// Origin label of the caller (e.g., "cli", "api").
    pub origin: &'a str,
    /// Number of integrations that will be dispatched.
    pub total_integrations: i64,
}

/// Final statistics for a completed run, recorded exactly once.
pub struct ExecutionStats {
    /// Execution log row to finalize.
    pub execution_id: i64,
    /// Integrations whose call returned 2xx.
    pub successful_integrations: i64,
    /// Integrations whose call failed (timeout, transport, non-2xx).
    pub failed_integrations: i64,
    /// Offers aggregated across all successful integrations.
    pub total_offers: i64,
    /// Wall-clock duration of the whole run in milliseconds.
    pub duration_ms: i64,
}

/// Parameters for recording one vendor call.
///
/// Header snapshots are pre-serialized JSON text; body snapshots are
/// truncated by the insert before storage.
pub struct NewCallLog<'a> {
    /// Parent execution log id.
    pub execution_id: i64,
    /// Integration that was called.
    pub integration_id: i64,
    /// Outcome status ("success", "http_error", "timeout",
    /// "transport_error").
    pub status: &'a str,
    /// HTTP status code when a response was received.
    pub http_status: Option<i64>,
    /// Call duration in milliseconds, dispatch to final byte.
    pub duration_ms: i64,
    /// Request method snapshot.
    pub request_method: &'a str,
    /// Request URL snapshot.
    pub request_url: &'a str,
    /// Request headers as JSON text.
    pub request_headers: &'a str,
    /// Rendered request body.
    pub request_body: &'a str,
    /// Response headers as JSON text.
    pub response_headers: &'a str,
    /// Response body, when one was received.
    pub response_body: Option<&'a str>,
    /// Failure detail for unsuccessful calls.
    pub error: Option<&'a str>,
}

/// Summary of a run, suitable for displaying execution history.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Execution log row id.
    pub id: i64,
    /// Mix that was aggregated.
    pub mix_id: i64,
    /// Visitor fingerprint for the run.
    pub fingerprint: String,
    /// Origin label of the caller.
    pub origin: String,
    /// Number of integrations dispatched.
    pub total_integrations: i64,
    /// Integrations whose call returned 2xx.
    pub successful_integrations: i64,
    /// Integrations whose call failed.
    pub failed_integrations: i64,
    /// Offers aggregated across all successful integrations.
    pub total_offers: i64,
    /// Run duration in milliseconds (None if the run never finalized).
    pub duration_ms: Option<i64>,
    /// Start time as milliseconds since Unix epoch.
    pub started_at_ms: i64,
    /// Finalize time as milliseconds since Unix epoch (None if the run is
    /// still pending or died mid-flight).
    pub finished_at_ms: Option<i64>,
}
