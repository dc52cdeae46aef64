//! Call log insertion.
//!
//! One row per attempted vendor call, written after the call resolves and
//! never mutated. Body snapshots are truncated here so no caller can bloat
//! the audit tables with an oversized vendor response.

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;
use crate::storage::models::NewCallLog;
use crate::utils::truncate_snapshot;

/// Inserts one call log row.
pub async fn record_call(pool: &SqlitePool, call: &NewCallLog<'_>) -> Result<(), DatabaseError> {
    let created_at_ms = chrono::Utc::now().timestamp_millis();
    let request_body = truncate_snapshot(call.request_body);
    let response_body = call.response_body.map(truncate_snapshot);

    sqlx::query(
        "INSERT INTO call_logs (execution_id, integration_id, status, http_status, duration_ms,
                                request_method, request_url, request_headers, request_body,
                                response_headers, response_body, error, created_at_ms)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(call.execution_id)
    .bind(call.integration_id)
    .bind(call.status)
    .bind(call.http_status)
    .bind(call.duration_ms)
    .bind(call.request_method)
    .bind(call.request_url)
    .bind(call.request_headers)
    .bind(request_body)
    .bind(call.response_headers)
    .bind(response_body)
    .bind(call.error)
    .bind(created_at_ms)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(())
}
