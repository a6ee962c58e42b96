//! Chipfuse Indicators
//!
//! Technical and money-flow indicators over a fused price/chip series.
//!
//! # Features
//! - Indicator traits with vectorized computation
//! - Multi-output indicators (MACD, KD, Bollinger Bands)
//! - Rolling-window and exponentially weighted primitives
//! - Indicator table with per-column defined-from markers
//!
//! # Available Indicators
//! - SMA: Simple Moving Average (close or volume)
//! - EMA: Exponential Moving Average
//! - ATR: Average True Range (rolling mean) and ATR stop
//! - Bollinger Bands: sample standard deviation
//! - MACD: line, signal, histogram
//! - KD: stochastic oscillator
//! - Concentration: main-force share of volume
//! - EFI: smoothed force index

pub mod engine;
pub mod error;
pub mod ewm;
pub mod impl_;
pub mod rolling;
pub mod traits;

// Re-export main types
pub use engine::{IndicatorTable, Series, compute_indicators};
pub use error::IndicatorError;
pub use ewm::Ewm;
pub use traits::{Indicator, MultiOutputIndicator, PriceField};

// Re-export indicator implementations
pub use impl_::{
    atr::{ATR, atr_stop, true_range_series},
    bollinger::{BollingerBands, BollingerResult},
    concentration::{Concentration, round2},
    ema::EMA,
    force_index::{ForceIndex, raw_force},
    macd::{MACD, MacdResult},
    sma::SMA,
    stochastic::{KdResult, StochasticKD},
};
