//! Exponential Moving Average (EMA) indicator

use crate::ewm::Ewm;
use crate::traits::Indicator;
use chipfuse_types::DailyBar;

/// Exponential Moving Average of close.
///
/// Span form, non-adjusted: multiplier = 2 / (span + 1), seeded with the
/// first close.
#[derive(Debug, Clone)]
pub struct EMA {
    /// EMA span
    pub period: usize,
}

impl EMA {
    /// Creates a new EMA indicator with the given span.
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// EMA over an arbitrary series; all NaN for span 0.
    pub fn over(&self, values: &[f64]) -> Vec<f64> {
        match Ewm::from_span(self.period, false) {
            Ok(ewm) => ewm.mean(values),
            Err(_) => vec![f64::NAN; values.len()],
        }
    }
}

impl Indicator for EMA {
    fn compute(&self, bars: &[DailyBar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        self.over(&closes)
    }
}
