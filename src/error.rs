//! Error types for the query layer.
//!
//! Two layers of errors exist:
//!
//! - [`Error`]: internal failures (repository reads, join lookups, configuration).
//!   These carry full detail and are only ever logged.
//! - [`DataFetchError`]: the only error a caller of [`DashboardService`](crate::DashboardService)
//!   sees. It names the failed operation and nothing else.

use crate::operation::Operation;
use std::fmt;

/// Result type for internal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Result type for boundary operations.
pub type FetchResult<T> = std::result::Result<T, DataFetchError>;

/// Internal error variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The data source failed to produce records.
    ///
    /// Common causes:
    /// - Backing store unavailable
    /// - Snapshot could not be read
    RepositoryError(String),

    /// An invoice references a customer that is not in the dataset.
    ///
    /// Every invoice must resolve to exactly one customer. A miss aborts the
    /// whole operation rather than yielding a partial row.
    MissingCustomer {
        /// Invoice whose join failed
        invoice_id: String,
        /// Customer id that did not resolve
        customer_id: String,
    },

    /// Invalid service configuration.
    ConfigError(String),

    /// A dataset or config snapshot could not be decoded.
    DeserializationError(String),

    /// Generic error with custom message.
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::RepositoryError(msg) => write!(f, "Repository error: {}", msg),
            Error::MissingCustomer {
                invoice_id,
                customer_id,
            } => write!(
                f,
                "Invoice {} references unknown customer {}",
                invoice_id, customer_id
            ),
            Error::ConfigError(msg) => write!(f, "Config error: {}", msg),
            Error::DeserializationError(msg) => write!(f, "Deserialization error: {}", msg),
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

/// Opaque failure returned at the operation boundary.
///
/// Displays as the operation's fixed message, e.g. `"Failed to fetch card data."`.
/// The underlying cause is logged at the boundary and not retained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DataFetchError {
    operation: Operation,
}

impl DataFetchError {
    pub fn new(operation: Operation) -> Self {
        DataFetchError { operation }
    }

    /// The operation that failed.
    pub fn operation(&self) -> Operation {
        self.operation
    }
}

impl fmt::Display for DataFetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.operation.failure_message())
    }
}

impl std::error::Error for DataFetchError {}

// ============================================================================
// Conversions from other error types
// ============================================================================

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        if e.is_io() {
            Error::RepositoryError(e.to_string())
        } else {
            Error::DeserializationError(e.to_string())
        }
    }
}

impl From<String> for Error {
    fn from(e: String) -> Self {
        Error::Other(e)
    }
}

impl From<&str> for Error {
    fn from(e: &str) -> Self {
        Error::Other(e.to_string())
    }
}
