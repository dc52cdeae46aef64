//! Vendor call preparation and concurrent dispatch.
//!
//! [`prepare_request`] turns an integration's production environment plus a
//! visitor profile into a concrete HTTP request; [`dispatch_all`] issues
//! every prepared request concurrently with a fixed per-call timeout and
//! returns one classified outcome per request. A single call's failure
//! never aborts its siblings.

mod executor;
mod request;

pub use executor::{dispatch_all, CallOutcome, CallStatus};
pub use request::{prepare_request, PreparedRequest};
