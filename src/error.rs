// model = "claude-opus-4-5"
// created = "2026-10-17"
// modified = "2026-10-17"
// driver = "Isaac Clayton"

//! Error types for the index, the store and snapshot ingest.

use chrono::NaiveDate;
use thiserror::Error;

use crate::metric::MetricKind;

/// Everything that can go wrong while building or querying an index.
///
/// Structural violations (`DuplicateKey`, `TypeMismatch`, `CountryMismatch`,
/// `UnsupportedOperation`) are programming or data errors and are never
/// retried. `UnknownCountry` and `InsufficientHistory` describe absent data
/// and are expected to be mapped to an empty or not-found response.
#[derive(Debug, Error)]
pub enum Error {
    #[error("duplicate key: {date} is already present in the tree")]
    DuplicateKey { date: NaiveDate },

    #[error(
        "the node being inserted is a {found} node, while the root node is a {expected} node; \
         all the nodes in a tree must share the same metric"
    )]
    TypeMismatch { expected: MetricKind, found: MetricKind },

    #[error(
        "the node being inserted is from {found}, while the root node is from {expected}; \
         all the nodes in a tree must share the same country"
    )]
    CountryMismatch { expected: String, found: String },

    #[error("{0} is not supported on a stats tree")]
    UnsupportedOperation(&'static str),

    #[error("unknown country: {0}")]
    UnknownCountry(String),

    #[error("a forecast needs at least {required} observations, got {found}")]
    InsufficientHistory { required: usize, found: usize },

    #[error("the forecast from a last reading of {last} does not fit in an i64")]
    ForecastOutOfRange { last: i64 },

    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    #[error("malformed snapshot row {line}: {reason}")]
    MalformedRow { line: u64, reason: String },

    #[error("invalid date {value:?} on snapshot row {line}")]
    InvalidDate { line: u64, value: String },

    #[error("invalid value {value:?} in column {column} on snapshot row {line}")]
    InvalidValue { line: u64, column: usize, value: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl Error {
    /// True for conditions that mean "no such data" rather than a bug.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::UnknownCountry(_) | Error::InsufficientHistory { .. })
    }
}

/// Result type for index operations.
pub type Result<T> = std::result::Result<T, Error>;
