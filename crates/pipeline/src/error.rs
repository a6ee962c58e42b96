//! Pipeline error types.

use chipfuse_types::{CoreError, SymbolOutcome};
use thiserror::Error;

/// Errors that can occur while running the pipeline for a symbol or batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// JSON config parse error
    #[error("config parse error: {0}")]
    ConfigParse(String),

    /// Config validation error
    #[error("config validation error: {0}")]
    ConfigValidation(String),

    /// Price feed unavailable or empty after cleaning
    #[error("no price data for {symbol}")]
    NoData {
        /// Resolved symbol
        symbol: String,
    },

    /// Normalization or fusion error
    #[error("data error: {0}")]
    Data(#[from] chipfuse_data::DataError),

    /// Indicator computation error
    #[error("indicator error: {0}")]
    Indicator(#[from] chipfuse_indicators::IndicatorError),

    /// Result serialization error
    #[error("result serialization error: {0}")]
    ResultSerialize(String),
}

impl From<CoreError> for PipelineError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Json(e) => PipelineError::ConfigParse(e.to_string()),
            other => PipelineError::ConfigValidation(other.to_string()),
        }
    }
}

impl PipelineError {
    /// Returns true if this is a config parse/validation error.
    #[must_use]
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            PipelineError::ConfigParse(_) | PipelineError::ConfigValidation(_)
        )
    }

    /// Returns the error category for the output contract.
    /// Categories: `config`, `market_data`, `runtime`
    #[must_use]
    pub fn error_category(&self) -> &'static str {
        match self {
            PipelineError::ConfigParse(_) | PipelineError::ConfigValidation(_) => "config",
            PipelineError::NoData { .. } | PipelineError::Data(_) => "market_data",
            PipelineError::Indicator(_) | PipelineError::ResultSerialize(_) => "runtime",
        }
    }

    /// Batch outcome for a symbol that ended with this error.
    #[must_use]
    pub fn into_outcome(self, symbol: String) -> SymbolOutcome {
        match self {
            PipelineError::NoData { .. } => SymbolOutcome::NoData { symbol },
            other => SymbolOutcome::Failed {
                symbol,
                category: other.error_category().to_string(),
                message: other.to_string(),
            },
        }
    }
}
