//! Error types for chancay.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for chancay operations.
pub type Result<T> = std::result::Result<T, ChancayError>;

/// Errors that can occur during ingestion and merge.
#[derive(Error, Debug)]
pub enum ChancayError {
    /// Source archive could not be opened or enumerated.
    #[error("Archive error: {0}")]
    Archive(String),

    /// Data quality gate rejected a bar set in strict mode.
    #[error("Quality error: {0}")]
    Quality(String),

    /// Store operation failed.
    #[error("Store error: {0}")]
    Store(String),

    /// Upstream fetch failed after all retries.
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Invalid stored range metadata.
    #[error(transparent)]
    Range(#[from] RangeError),

    /// Invalid quarter identifier.
    #[error(transparent)]
    Quarter(#[from] QuarterError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error for invalid stored range metadata.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    /// The store reported a minimum date after the maximum date.
    #[error("Inverted date range: {min_date} > {max_date}")]
    Inverted {
        /// The reported minimum date.
        min_date: NaiveDate,
        /// The reported maximum date.
        max_date: NaiveDate,
    },
}

/// Error for invalid quarter identifiers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuarterError {
    /// Quarter outside 1..=4.
    #[error("Invalid quarter: {0} (expected 1..=4)")]
    InvalidQuarter(u8),
}
