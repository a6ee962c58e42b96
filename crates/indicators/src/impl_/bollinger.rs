//! Bollinger Bands indicator

use crate::rolling::{rolling_mean, rolling_std};
use crate::traits::MultiOutputIndicator;
use chipfuse_types::DailyBar;

/// Bollinger Bands result containing upper, middle, and lower bands.
#[derive(Debug, Clone)]
pub struct BollingerResult {
    /// Upper band = SMA + std_factor * std
    pub upper: Vec<f64>,
    /// Middle band = SMA
    pub middle: Vec<f64>,
    /// Lower band = SMA - std_factor * std
    pub lower: Vec<f64>,
}

/// Bollinger Bands over close.
///
/// Uses the sample standard deviation (n - 1).
#[derive(Debug, Clone)]
pub struct BollingerBands {
    /// Period for the SMA and standard deviation
    pub period: usize,
    /// Multiplier for standard deviation (typically 2.0)
    pub std_factor: f64,
}

impl BollingerBands {
    /// Creates new Bollinger Bands with the given parameters.
    pub fn new(period: usize, std_factor: f64) -> Self {
        Self { period, std_factor }
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Output = BollingerResult;

    fn compute_all(&self, bars: &[DailyBar]) -> Self::Output {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let middle = rolling_mean(&closes, self.period);
        let std = rolling_std(&closes, self.period, 1);

        let upper = middle
            .iter()
            .zip(&std)
            .map(|(m, s)| m + self.std_factor * s)
            .collect();
        let lower = middle
            .iter()
            .zip(&std)
            .map(|(m, s)| m - self.std_factor * s)
            .collect();

        BollingerResult {
            upper,
            middle,
            lower,
        }
    }
}
