//! Shared utilities.

mod sanitize;

pub use sanitize::{sanitize_and_truncate_error_message, serialize_headers, truncate_snapshot};
