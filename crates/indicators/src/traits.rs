//! Indicator traits.

use chipfuse_types::DailyBar;

/// Bar field an indicator reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PriceField {
    /// Close price
    #[default]
    Close,
    /// Traded volume
    Volume,
}

impl PriceField {
    /// Extracts the field from every bar.
    #[must_use]
    pub fn extract(self, bars: &[DailyBar]) -> Vec<f64> {
        match self {
            PriceField::Close => bars.iter().map(|b| b.close).collect(),
            PriceField::Volume => bars.iter().map(|b| b.volume).collect(),
        }
    }
}

/// Trait for single-output indicators.
///
/// All indicators compute over the full bar series and return a Vec<f64>
/// of the same length. Values that are not yet computable are NaN.
pub trait Indicator: Send + Sync {
    /// Computes the indicator for all bars.
    fn compute(&self, bars: &[DailyBar]) -> Vec<f64>;
}

/// Trait for indicators producing several series from one pass (MACD, KD, Bollinger).
pub trait MultiOutputIndicator: Send + Sync {
    /// Result struct holding every output series
    type Output;

    /// Computes all outputs at once.
    fn compute_all(&self, bars: &[DailyBar]) -> Self::Output;
}
