//! Error type definitions.
//!
//! Typed errors for initialization and persistence, plus the categorization
//! enum for individual vendor-call failures.

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Categories of individual vendor-call failures.
///
/// One vendor call failing never aborts the run; its category feeds the
/// call log's status/error columns and the run-level dispatch statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum VendorErrorType {
    /// The call exceeded the fixed per-call timeout.
    CallTimeout,
    /// TCP/TLS connection to the vendor failed.
    ConnectError,
    /// The outbound request could not be built (bad URL, bad method,
    /// malformed header from config).
    RequestBuildError,
    /// Vendor returned a 4xx status.
    ClientStatusError,
    /// Vendor returned a 5xx status.
    ServerStatusError,
    /// Vendor returned a non-2xx status outside the 4xx/5xx classes.
    OtherStatusError,
    /// The response body could not be read or decoded.
    BodyReadError,
    /// Any other transport-level failure.
    TransportError,
}

impl std::fmt::Display for VendorErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl VendorErrorType {
    /// Returns a human-readable string representation of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            VendorErrorType::CallTimeout => "Vendor call timeout",
            VendorErrorType::ConnectError => "Vendor connect error",
            VendorErrorType::RequestBuildError => "Request build error",
            VendorErrorType::ClientStatusError => "Vendor client error (4xx)",
            VendorErrorType::ServerStatusError => "Vendor server error (5xx)",
            VendorErrorType::OtherStatusError => "Vendor non-2xx status",
            VendorErrorType::BodyReadError => "Response body read error",
            VendorErrorType::TransportError => "Vendor transport error",
        }
    }
}
