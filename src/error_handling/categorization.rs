//! Vendor-call error categorization.

use super::types::VendorErrorType;

/// Categorizes a `reqwest::Error` into a [`VendorErrorType`].
///
/// Used by the call executor to classify transport-level failures for the
/// call log and dispatch statistics.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> VendorErrorType {
    // A status carried on the error takes precedence over the error kind
    if let Some(status) = error.status() {
        return categorize_status(status.as_u16());
    }

    if error.is_timeout() {
        VendorErrorType::CallTimeout
    } else if error.is_connect() {
        VendorErrorType::ConnectError
    } else if error.is_builder() || error.is_request() {
        VendorErrorType::RequestBuildError
    } else if error.is_body() || error.is_decode() {
        VendorErrorType::BodyReadError
    } else {
        VendorErrorType::TransportError
    }
}

/// Categorizes a non-2xx HTTP status code into a [`VendorErrorType`].
pub fn categorize_status(status: u16) -> VendorErrorType {
    match status {
        400..=499 => VendorErrorType::ClientStatusError,
        500..=599 => VendorErrorType::ServerStatusError,
        _ => VendorErrorType::OtherStatusError,
    }
}
