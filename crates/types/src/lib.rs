//! Chipfuse Types
//!
//! Core data structures for the chip-fusion pipeline.
//! This crate provides the price bar, chip column and fill-policy model,
//! indicator column names, the unified output row, and configuration.

#![deny(clippy::all)]

pub mod bar;
pub mod chip;
pub mod config;
pub mod error;
pub mod indicator;
pub mod interval;
pub mod result;

// Re-export main types for convenience
pub use bar::DailyBar;
pub use chip::{ChipColumn, ChipFeed, FillPolicy, FillPolicyTable};
pub use config::{BracketConfig, IndicatorConfig, LoggingConfig, PipelineConfig};
pub use error::CoreError;
pub use indicator::IndicatorColumn;
pub use interval::{Interval, LookbackPeriod, ParseIntervalError};
pub use result::{BatchReport, SymbolOutcome, UNIFIED_COLUMNS, UnifiedRow, UnifiedTable};
