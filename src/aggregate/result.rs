//! Aggregation outcome types.

use serde::Serialize;

use crate::models::OfferRecord;

/// Summary counters for one aggregation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunMeta {
    /// Offers aggregated across all successful integrations.
    pub total_offers: i64,
    /// Integrations whose vendor call returned 2xx.
    pub successful_integrations: i64,
    /// Integrations whose vendor call failed.
    pub failed_integrations: i64,
    /// Wall-clock run duration in milliseconds.
    pub duration_ms: i64,
}

/// The result of one aggregation run.
///
/// Callers always receive one of these four outcomes, never a raw error;
/// the taxonomy is the engine's public error contract.
#[derive(Debug)]
pub enum AggregationOutcome {
    /// The run completed; offers may be empty only when the mix had zero
    /// dispatchable integrations.
    Aggregated {
        /// Merged offer list, in integration order then vendor order.
        offers: Vec<OfferRecord>,
        /// Run counters.
        meta: RunMeta,
    },
    /// Integrations ran but produced zero offers: a soft failure, logged
    /// as a normal run.
    NoOffersFound {
        /// Run counters.
        meta: RunMeta,
    },
    /// No visitor profile exists for the fingerprint. No execution log is
    /// written for this outcome.
    VisitorNotFound,
    /// An unexpected failure in orchestration, templating, or persistence.
    /// Already logged and alerted; details are not exposed to the caller.
    InternalError,
}

impl AggregationOutcome {
    /// The HTTP-style status code a thin API layer would map this outcome
    /// to.
    pub fn status_code(&self) -> u16 {
        match self {
            AggregationOutcome::Aggregated { .. } => 200,
            AggregationOutcome::NoOffersFound { .. } => 404,
            AggregationOutcome::VisitorNotFound => 404,
            AggregationOutcome::InternalError => 500,
        }
    }

    /// True when the run failed with an internal error.
    pub fn is_internal_error(&self) -> bool {
        matches!(self, AggregationOutcome::InternalError)
    }
}
