//! Data-layer error types.

use thiserror::Error;

/// Errors that can occur while normalizing, validating or fusing feeds.
#[derive(Debug, Error)]
pub enum DataError {
    /// No rows were available.
    #[error("Empty data")]
    EmptyData,

    /// A feed date could not be coerced to a calendar date.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// A row violated a data contract rule.
    #[error("Corrupt data: {0}")]
    CorruptData(String),

    /// A chip table could not be aligned onto the price index.
    #[error("Alignment failure: {0}")]
    AlignmentFailure(String),
}

/// Failure reported by an external feed collaborator.
///
/// Chip-feed failures are absorbed by the normalizer; price-feed failures
/// surface as "no data" for the symbol.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedError {
    /// The provider could not be reached or raised an error.
    #[error("feed unavailable: {0}")]
    Unavailable(String),

    /// The provider answered with no records.
    #[error("feed returned no records")]
    Empty,
}
