//! Visitor profile lookup.

use log::warn;
use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::models::VisitorProfile;

/// Fetches the visitor profile for a fingerprint.
///
/// Returns `Ok(None)` when no profile exists: the aggregator surfaces that
/// as a "not found" outcome, not a failure. A stored `fields` column that
/// isn't a JSON object is treated the same way (the profile is unusable)
/// with a warning.
pub async fn get_visitor_profile(
    pool: &SqlitePool,
    fingerprint: &str,
) -> Result<Option<VisitorProfile>, DatabaseError> {
    let row = sqlx::query("SELECT fields FROM visitor_profiles WHERE fingerprint = ?")
        .bind(fingerprint)
        .fetch_optional(pool)
        .await
        .map_err(DatabaseError::SqlError)?;

    let Some(row) = row else {
        return Ok(None);
    };

    let fields_raw: String = row.get("fields");
    match serde_json::from_str::<serde_json::Value>(&fields_raw) {
        Ok(serde_json::Value::Object(fields)) => Ok(Some(VisitorProfile {
            fingerprint: fingerprint.to_string(),
            fields,
        })),
        Ok(_) | Err(_) => {
            warn!("Profile for fingerprint {fingerprint} has non-object fields; treating as not found");
            Ok(None)
        }
    }
}
