//! Indicator implementations

pub mod atr;
pub mod bollinger;
pub mod concentration;
pub mod ema;
pub mod force_index;
pub mod macd;
pub mod sma;
pub mod stochastic;
