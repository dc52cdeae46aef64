//! Mix/integration configuration loading.
//!
//! Integrations are stored as rows with JSON config columns and interpreted
//! uniformly by the engine: vendor behavior is configuration, not code.
//! The loaded snapshot is read-only for the duration of a run.

use log::warn;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::models::{Environment, Integration, RequestMappingConfig, ResponseParserConfig};

/// Loads the active integrations of a mix, in mix order.
///
/// Rows whose JSON config columns fail to parse are skipped with a warning
/// rather than failing the run: one misconfigured vendor must not take
/// down the whole mix.
pub async fn load_active_integrations(
    pool: &SqlitePool,
    mix_id: i64,
) -> Result<Vec<Integration>, DatabaseError> {
    let rows = sqlx::query(
        "SELECT id, name, active, environments, request_mapping, response_parser
         FROM integrations
         WHERE mix_id = ? AND active = 1
         ORDER BY position, id",
    )
    .bind(mix_id)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    let mut integrations = Vec::with_capacity(rows.len());
    for row in rows {
        let id: i64 = row.get("id");
        let name: String = row.get("name");

        let environments: Vec<Environment> =
            match serde_json::from_str(row.get::<String, _>("environments").as_str()) {
                Ok(environments) => environments,
                Err(e) => {
                    warn!("Skipping integration {id} ({name}): invalid environments config: {e}");
                    continue;
                }
            };
        let request_mapping: RequestMappingConfig =
            match serde_json::from_str(row.get::<String, _>("request_mapping").as_str()) {
                Ok(mapping) => mapping,
                Err(e) => {
                    warn!("Skipping integration {id} ({name}): invalid request mapping: {e}");
                    continue;
                }
            };
        let response_parser: ResponseParserConfig =
            match serde_json::from_str(row.get::<String, _>("response_parser").as_str()) {
                Ok(parser) => parser,
                Err(e) => {
                    warn!("Skipping integration {id} ({name}): invalid response parser: {e}");
                    continue;
                }
            };

        integrations.push(Integration {
            id,
            name,
            active: row.get::<i64, _>("active") != 0,
            environments,
            request_mapping,
            response_parser,
        });
    }

    Ok(integrations)
}
