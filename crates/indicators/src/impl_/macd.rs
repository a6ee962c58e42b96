//! MACD (Moving Average Convergence/Divergence)

use crate::impl_::ema::EMA;
use crate::traits::MultiOutputIndicator;
use chipfuse_types::DailyBar;

/// MACD line, signal line and histogram.
#[derive(Debug, Clone)]
pub struct MacdResult {
    /// EMA(fast) - EMA(slow)
    pub macd: Vec<f64>,
    /// EMA(signal) of the MACD line
    pub signal: Vec<f64>,
    /// macd - signal
    pub hist: Vec<f64>,
}

/// MACD over close with span-form, non-adjusted EMAs.
#[derive(Debug, Clone)]
pub struct MACD {
    /// Fast EMA span
    pub fast: usize,
    /// Slow EMA span
    pub slow: usize,
    /// Signal EMA span
    pub signal: usize,
}

impl MACD {
    /// Creates a MACD from its three spans.
    pub fn new(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }
}

impl Default for MACD {
    fn default() -> Self {
        Self::new(12, 26, 9)
    }
}

impl MultiOutputIndicator for MACD {
    type Output = MacdResult;

    fn compute_all(&self, bars: &[DailyBar]) -> Self::Output {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = EMA::new(self.fast).over(&closes);
        let slow = EMA::new(self.slow).over(&closes);

        let macd: Vec<f64> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = EMA::new(self.signal).over(&macd);
        let hist = macd.iter().zip(&signal).map(|(m, s)| m - s).collect();

        MacdResult { macd, signal, hist }
    }
}
