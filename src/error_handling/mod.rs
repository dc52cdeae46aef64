//! Error types, vendor failure categorization, and dispatch statistics.

mod categorization;
mod stats;
mod types;

pub use categorization::{categorize_reqwest_error, categorize_status};
pub use stats::{log_dispatch_statistics, DispatchStats};
pub use types::{DatabaseError, InitializationError, VendorErrorType};
