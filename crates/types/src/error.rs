use thiserror::Error;

/// Core error types shared across the pipeline crates
#[derive(Debug, Error)]
pub enum CoreError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data error
    #[error("Data error: {0}")]
    Data(String),

    /// Indicator error
    #[error("Indicator error: {0}")]
    Indicator(String),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
