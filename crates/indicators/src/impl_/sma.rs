//! Simple Moving Average (SMA) indicator

use crate::rolling::rolling_mean;
use crate::traits::{Indicator, PriceField};
use chipfuse_types::DailyBar;

/// Simple Moving Average
///
/// Arithmetic mean of the last N values of a bar field (close by default).
#[derive(Debug, Clone)]
pub struct SMA {
    /// Number of periods for the moving average
    pub period: usize,
    /// Field averaged
    pub source: PriceField,
}

impl SMA {
    /// Creates a new SMA of close prices.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            source: PriceField::Close,
        }
    }

    /// Creates a new SMA of volume.
    pub fn of_volume(period: usize) -> Self {
        Self {
            period,
            source: PriceField::Volume,
        }
    }
}

impl Indicator for SMA {
    fn compute(&self, bars: &[DailyBar]) -> Vec<f64> {
        rolling_mean(&self.source.extract(bars), self.period)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bar(close: f64) -> DailyBar {
        DailyBar::new(NaiveDate::MIN, close, close, close, close, close * 10.0)
    }

    #[test]
    fn test_sma_basic() {
        let bars: Vec<DailyBar> = vec![1.0, 2.0, 3.0, 4.0, 5.0]
            .into_iter()
            .map(make_bar)
            .collect();

        let result = SMA::new(3).compute(&bars);

        assert!(result[0].is_nan());
        assert!(result[1].is_nan());
        assert!((result[2] - 2.0).abs() < 1e-10); // (1+2+3)/3 = 2.0
        assert!((result[3] - 3.0).abs() < 1e-10);
        assert!((result[4] - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_sma_of_volume() {
        let bars: Vec<DailyBar> = vec![1.0, 2.0, 3.0].into_iter().map(make_bar).collect();
        let result = SMA::of_volume(2).compute(&bars);
        assert!(result[0].is_nan());
        assert!((result[1] - 15.0).abs() < 1e-10);
        assert!((result[2] - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_sma_twenty_boundary() {
        let bars: Vec<DailyBar> = (1..=25).map(|v| make_bar(f64::from(v))).collect();
        let result = SMA::new(20).compute(&bars);

        assert!(result[..19].iter().all(|v| v.is_nan()));
        // mean(1..=20) = 10.5
        assert!((result[19] - 10.5).abs() < 1e-10);
    }

    #[test]
    fn test_sma_insufficient_data() {
        let bars: Vec<DailyBar> = vec![1.0, 2.0].into_iter().map(make_bar).collect();
        assert!(SMA::new(5).compute(&bars).iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_sma_period_zero_returns_nan() {
        let bars: Vec<DailyBar> = vec![1.0, 2.0, 3.0].into_iter().map(make_bar).collect();
        assert!(SMA::new(0).compute(&bars).iter().all(|v| v.is_nan()));
    }
}
