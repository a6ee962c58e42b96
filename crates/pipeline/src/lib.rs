//! Chipfuse Pipeline
//!
//! Orchestrates symbol resolution, feed collection, normalization, fusion,
//! indicator computation and finalization, one symbol at a time.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(missing_docs)]

pub mod error;
pub mod logging;
pub mod runner;
pub mod sources;
pub mod symbol;

pub use error::PipelineError;
pub use logging::init_logging;
pub use runner::{run_batch, run_batch_from_json, run_symbol};
pub use sources::{ChipSource, PriceSource, Sources};
pub use symbol::{resolve_symbol, stock_id};
