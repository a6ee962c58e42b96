//! Chipfuse Data
//!
//! Feed normalization, price-bar validation, weekly resampling and the series
//! fusion engine.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

/// Data-layer error types.
pub mod error;
/// Chip tables onto the price index.
pub mod fusion;
/// Raw feeds into date-indexed tables.
pub mod normalizer;
/// Raw collaborator record shapes.
pub mod raw;
/// Weekly aggregation.
pub mod resample;
/// Normalized chip tables.
pub mod table;
/// Price-bar validation helpers.
pub mod validation;

/// Re-export: data-layer error type.
pub use error::DataError;
/// Re-export: collaborator feed failure.
pub use error::FeedError;
/// Re-export: per-feed fusion status.
pub use fusion::FeedStatus;
/// Re-export: fused price/chip table.
pub use fusion::FusedTable;
/// Re-export: per-feed fusion outcome.
pub use fusion::FusionReport;
/// Re-export: fusion engine.
pub use fusion::fuse;
/// Re-export: fusion engine with report.
pub use fusion::fuse_with_report;
/// Re-export: price bar normalizer.
pub use normalizer::normalize_bars;
/// Re-export: institutional feed normalizer.
pub use normalizer::normalize_institutional;
/// Re-export: margin/short feed normalizer.
pub use normalizer::normalize_margin;
/// Re-export: shareholding feed normalizer.
pub use normalizer::normalize_shareholding;
/// Re-export: provider date coercion.
pub use normalizer::parse_feed_date;
/// Re-export: raw institutional record.
pub use raw::RawInstitutionalRecord;
/// Re-export: raw margin record.
pub use raw::RawMarginRecord;
/// Re-export: raw shareholding record.
pub use raw::RawShareholdingRecord;
/// Re-export: weekly bar aggregation.
pub use resample::resample_bars_weekly;
/// Re-export: weekly chip feed aggregation.
pub use resample::resample_feeds_weekly;
/// Re-export: chip tables available for one symbol.
pub use table::ChipFeeds;
/// Re-export: normalized chip table.
pub use table::ChipTable;
/// Re-export: OHLC range repair.
pub use validation::clamp_range;
/// Re-export: single bar validation.
pub use validation::validate_bar;
/// Re-export: value checks that drop a bar.
pub use validation::validate_bar_values;
/// Re-export: bar series validation.
pub use validation::validate_bars;
