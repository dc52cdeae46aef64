//! Execution log insertion and finalization.
//!
//! This module handles the run-level audit row: created before any vendor
//! call is made, finalized exactly once after all calls complete. The two
//! writes are independent short statements: no transaction spans the
//! fan-out between them, and a NULL `finished_at_ms` marks a pending or
//! abandoned run.

use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::storage::models::{ExecutionStats, ExecutionSummary, NewExecutionLog};

/// Creates the execution log row at run start and returns its id.
///
/// Counts start at zero; `finished_at_ms` stays NULL until
/// [`finalize_execution_log`] runs.
pub async fn create_execution_log(
    pool: &SqlitePool,
    log: &NewExecutionLog<'_>,
) -> Result<i64, DatabaseError> {
    let started_at_ms = chrono::Utc::now().timestamp_millis();

    let row = sqlx::query(
        "INSERT INTO execution_logs (mix_id, fingerprint, origin, total_integrations, started_at_ms)
         VALUES (?, ?, ?, ?, ?)
         RETURNING id",
    )
    .bind(log.mix_id)
    .bind(log.fingerprint)
    .bind(log.origin)
    .bind(log.total_integrations)
    .bind(started_at_ms)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(row.get::<i64, _>("id"))
}

/// Updates the execution log with final counts when a run completes.
///
/// Called exactly once per run, after every call log row has been written.
pub async fn finalize_execution_log(
    pool: &SqlitePool,
    stats: &ExecutionStats,
) -> Result<(), DatabaseError> {
    let finished_at_ms = chrono::Utc::now().timestamp_millis();

    sqlx::query(
        "UPDATE execution_logs
         SET successful_integrations = ?, failed_integrations = ?, total_offers = ?,
             duration_ms = ?, finished_at_ms = ?
         WHERE id = ?",
    )
    .bind(stats.successful_integrations)
    .bind(stats.failed_integrations)
    .bind(stats.total_offers)
    .bind(stats.duration_ms)
    .bind(finished_at_ms)
    .bind(stats.execution_id)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(())
}

/// Query execution history from the database.
///
/// Returns finalized runs sorted by `started_at_ms` (most recent first).
/// Pending rows (NULL `finished_at_ms`) are excluded: they are either
/// in-flight or died mid-run.
pub async fn query_execution_history(
    pool: &SqlitePool,
    limit: Option<usize>,
) -> Result<Vec<ExecutionSummary>, DatabaseError> {
    let query = if let Some(limit) = limit {
        format!(
            "SELECT id, mix_id, fingerprint, origin, total_integrations, successful_integrations,
                    failed_integrations, total_offers, duration_ms, started_at_ms, finished_at_ms
             FROM execution_logs
             WHERE finished_at_ms IS NOT NULL
             ORDER BY started_at_ms DESC
             LIMIT {}",
            limit
        )
    } else {
        "SELECT id, mix_id, fingerprint, origin, total_integrations, successful_integrations,
                failed_integrations, total_offers, duration_ms, started_at_ms, finished_at_ms
         FROM execution_logs
         WHERE finished_at_ms IS NOT NULL
         ORDER BY started_at_ms DESC"
            .to_string()
    };

    let rows = sqlx::query(&query)
        .fetch_all(pool)
        .await
        .map_err(DatabaseError::SqlError)?;

    let summaries: Vec<ExecutionSummary> = rows
        .into_iter()
        .map(|row| ExecutionSummary {
            id: row.get("id"),
            mix_id: row.get("mix_id"),
            fingerprint: row.get("fingerprint"),
            origin: row.get("origin"),
            total_integrations: row.get("total_integrations"),
            successful_integrations: row.get("successful_integrations"),
            failed_integrations: row.get("failed_integrations"),
            total_offers: row.get("total_offers"),
            duration_ms: row.get("duration_ms"),
            started_at_ms: row.get("started_at_ms"),
            finished_at_ms: row.get("finished_at_ms"),
        })
        .collect();

    Ok(summaries)
}
