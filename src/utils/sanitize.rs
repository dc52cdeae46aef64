//! Utilities for sanitizing and truncating audit snapshots.
//!
//! Removes control characters from error messages and bounds the size of
//! body/header snapshots before they are stored in the call log.

use crate::config::{MAX_BODY_SNAPSHOT_BYTES, MAX_ERROR_MESSAGE_LENGTH, MAX_HEADER_VALUE_LENGTH};

/// Sanitizes an error message by removing control characters.
///
/// Control characters (0x00-0x1F, except newline/tab/carriage return) can
/// cause issues when stored in databases or displayed in logs.
fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| {
            let code = *c as u32;
            code >= 0x20 // Printable ASCII starts at 0x20 (space)
                || code == 0x09 // Tab
                || code == 0x0A // Newline
                || code == 0x0D // Carriage return
        })
        .collect()
}

/// Sanitizes and truncates an error message to `MAX_ERROR_MESSAGE_LENGTH`,
/// appending a truncation indicator when the message was cut.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);

    if sanitized.len() > MAX_ERROR_MESSAGE_LENGTH {
        let truncate_len = MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
        let truncate_len = floor_char_boundary(&sanitized, truncate_len);
        format!(
            "{}... (truncated, original length: {} chars)",
            &sanitized[..truncate_len],
            sanitized.len()
        )
    } else {
        sanitized
    }
}

/// Truncates a request/response body snapshot to
/// `MAX_BODY_SNAPSHOT_BYTES`, appending a note with the original length.
pub fn truncate_snapshot(body: &str) -> String {
    if body.len() <= MAX_BODY_SNAPSHOT_BYTES {
        return body.to_string();
    }
    let truncate_len = floor_char_boundary(body, MAX_BODY_SNAPSHOT_BYTES);
    format!(
        "{}... (truncated, original length: {} bytes)",
        &body[..truncate_len],
        body.len()
    )
}

/// Serializes a header list to JSON text for storage, truncating oversized
/// values to `MAX_HEADER_VALUE_LENGTH`.
pub fn serialize_headers(headers: &[(String, String)]) -> String {
    let bounded: Vec<(&str, &str)> = headers
        .iter()
        .map(|(name, value)| {
            let cut = floor_char_boundary(value, MAX_HEADER_VALUE_LENGTH);
            (name.as_str(), &value[..cut])
        })
        .collect();
    serde_json::to_string(&bounded).unwrap_or_else(|_| "[]".to_string())
}

/// Largest index `<= max` that falls on a UTF-8 character boundary.
fn floor_char_boundary(s: &str, max: usize) -> usize {
    if max >= s.len() {
        return s.len();
    }
    let mut index = max;
    while index > 0 && !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
