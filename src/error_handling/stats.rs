//! Dispatch statistics tracking.
//!
//! Thread-safe counters for vendor-call failure categories, accumulated at
//! the fan-out join of each run and printed by the CLI after completion.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use log::info;
use strum::IntoEnumIterator;

use super::types::VendorErrorType;

/// Thread-safe vendor-call failure counters.
///
/// All categories are initialized to zero on creation, so incrementing
/// never allocates. Share across tasks with `Arc`.
pub struct DispatchStats {
    errors: HashMap<VendorErrorType, AtomicUsize>,
}

impl DispatchStats {
    /// Creates a tracker with every category zeroed.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in VendorErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }
        DispatchStats { errors }
    }

    /// Increment a failure category counter.
    pub fn increment(&self, error: VendorErrorType) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment counter for {:?} which is not in the map. \
                 This indicates a bug in DispatchStats initialization.",
                error
            );
        }
    }

    /// Returns the count for one category.
    pub fn count(&self, error: VendorErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|counter| counter.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Returns all categories with a nonzero count.
    pub fn snapshot(&self) -> Vec<(VendorErrorType, usize)> {
        VendorErrorType::iter()
            .filter_map(|error| {
                let count = self.count(error);
                (count > 0).then_some((error, count))
            })
            .collect()
    }
}

impl Default for DispatchStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Logs a summary of vendor-call failures accumulated during a run.
pub fn log_dispatch_statistics(stats: &DispatchStats) {
    let snapshot = stats.snapshot();
    if snapshot.is_empty() {
        info!("Vendor dispatch statistics: no failures");
        return;
    }
    info!("Vendor dispatch statistics:");
    for (error, count) in snapshot {
        info!("  {}: {}", error.as_str(), count);
    }
}
