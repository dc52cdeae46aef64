//! Configuration constants.
//!
//! This module defines the operational parameters used throughout the
//! engine: timeouts, audit snapshot limits, and defaults.

use std::time::Duration;

/// Default SQLite database path.
pub const DB_PATH: &str = "./offer_mix.db";

/// Fixed per-vendor-call timeout.
/// A single bound for every vendor in this core (not configurable per
/// vendor); calls exceeding it are abandoned and recorded as timeouts while
/// sibling calls continue.
pub const VENDOR_CALL_TIMEOUT: Duration = Duration::from_secs(10);

/// TCP connection timeout in seconds.
/// Kept well below the per-call timeout so unreachable vendors fail fast
/// during connect instead of consuming the full call budget.
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Default User-Agent string for outbound vendor calls.
pub const DEFAULT_USER_AGENT: &str = concat!("offer_mix/", env!("CARGO_PKG_VERSION"));

/// Default origin label recorded on execution logs.
pub const DEFAULT_ORIGIN: &str = "cli";

// Audit snapshot size limits
/// Maximum request/response body snapshot size in bytes (64KB).
/// Bodies larger than this are truncated before the call log insert with a
/// note about the original length, bounding database growth.
pub const MAX_BODY_SNAPSHOT_BYTES: usize = 64 * 1024;
/// Maximum HTTP header value length in characters (1000 chars).
/// Header values longer than this are truncated before serialization.
pub const MAX_HEADER_VALUE_LENGTH: usize = 1000;
/// Maximum error message length in characters (2000 chars).
/// Prevents database bloat from unbounded error messages.
pub const MAX_ERROR_MESSAGE_LENGTH: usize = 2000;

/// Default number of runs shown by the history listing.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;
