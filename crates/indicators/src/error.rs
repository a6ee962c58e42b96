//! Indicator error types.

use thiserror::Error;

/// Errors that can occur during indicator computation.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// Invalid parameters for the indicator
    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    /// Input series of different lengths
    #[error("length mismatch in {context}: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Which inputs disagreed.
        context: &'static str,
        /// Length of the base series.
        expected: usize,
        /// Length of the offending series.
        actual: usize,
    },
}

impl IndicatorError {
    /// Creates an `InvalidParams` error with a message.
    #[must_use]
    pub fn invalid_params(msg: impl Into<String>) -> Self {
        IndicatorError::InvalidParams(msg.into())
    }
}
