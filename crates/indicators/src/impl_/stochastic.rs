//! Stochastic oscillator (KD)

use crate::ewm::Ewm;
use crate::rolling::{rolling_max, rolling_min};
use crate::traits::MultiOutputIndicator;
use chipfuse_types::DailyBar;

/// Raw stochastic value and its two smoothings.
#[derive(Debug, Clone)]
pub struct KdResult {
    /// RSV in percent; NaN while the window is filling or its range is zero
    pub rsv: Vec<f64>,
    /// %K = EWM of RSV
    pub k: Vec<f64>,
    /// %D = EWM of %K
    pub d: Vec<f64>,
}

/// Stochastic KD with adjusted center-of-mass smoothing.
#[derive(Debug, Clone)]
pub struct StochasticKD {
    /// Look-back for the high/low range
    pub rsv_period: usize,
    /// EWM center of mass for K and D
    pub com: f64,
}

impl StochasticKD {
    /// Creates a KD indicator.
    pub fn new(rsv_period: usize, com: f64) -> Self {
        Self { rsv_period, com }
    }

    /// `(close - lowest low) / (highest high - lowest low) * 100`.
    pub fn rsv(&self, bars: &[DailyBar]) -> Vec<f64> {
        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let hh = rolling_max(&highs, self.rsv_period);
        let ll = rolling_min(&lows, self.rsv_period);

        bars.iter()
            .zip(hh.iter().zip(&ll))
            .map(|(bar, (h, l))| {
                let range = h - l;
                if range > 0.0 {
                    (bar.close - l) / range * 100.0
                } else {
                    f64::NAN
                }
            })
            .collect()
    }
}

impl Default for StochasticKD {
    fn default() -> Self {
        Self::new(9, 2.0)
    }
}

impl MultiOutputIndicator for StochasticKD {
    type Output = KdResult;

    fn compute_all(&self, bars: &[DailyBar]) -> Self::Output {
        let rsv = self.rsv(bars);
        let (k, d) = match Ewm::from_com(self.com, true) {
            Ok(ewm) => {
                let k = ewm.mean(&rsv);
                let d = ewm.mean(&k);
                (k, d)
            }
            Err(_) => (vec![f64::NAN; bars.len()], vec![f64::NAN; bars.len()]),
        };
        KdResult { rsv, k, d }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_bar(high: f64, low: f64, close: f64) -> DailyBar {
        DailyBar::new(NaiveDate::MIN, close, high, low, close, 0.0)
    }

    #[test]
    fn test_rsv_window() {
        let bars = vec![
            make_bar(12.0, 8.0, 10.0),
            make_bar(14.0, 9.0, 13.0),
            make_bar(13.0, 10.0, 11.0),
        ];
        let rsv = StochasticKD::new(2, 2.0).rsv(&bars);
        assert!(rsv[0].is_nan());
        // window [0, 1]: high 14, low 8
        assert_relative_eq!(rsv[1], 5.0 / 6.0 * 100.0, epsilon = 1e-12);
        // window [1, 2]: high 14, low 9
        assert_relative_eq!(rsv[2], 40.0, epsilon = 1e-12);
    }

    #[test]
    fn test_flat_window_is_undefined() {
        let bars = vec![make_bar(10.0, 10.0, 10.0); 4];
        let result = StochasticKD::new(2, 2.0).compute_all(&bars);
        assert!(result.rsv.iter().all(|v| v.is_nan()));
        assert!(result.k.iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_k_starts_at_first_rsv_and_d_follows() {
        let bars = vec![
            make_bar(12.0, 8.0, 10.0),
            make_bar(14.0, 9.0, 13.0),
            make_bar(13.0, 10.0, 11.0),
        ];
        let result = StochasticKD::new(2, 2.0).compute_all(&bars);
        assert!(result.k[0].is_nan());
        assert_relative_eq!(result.k[1], result.rsv[1]);
        assert_relative_eq!(result.d[1], result.k[1]);

        // Adjusted weights 2/3 and 1 with alpha = 1/3.
        let expected_k = (result.rsv[1] * 2.0 / 3.0 + result.rsv[2]) / (5.0 / 3.0);
        assert_relative_eq!(result.k[2], expected_k, epsilon = 1e-12);
    }

    #[test]
    fn test_bounded_between_zero_and_hundred() {
        let bars: Vec<DailyBar> = (0..60)
            .map(|i| {
                let c = 50.0 + (f64::from(i) * 0.4).sin() * 10.0;
                make_bar(c + 1.0, c - 1.0, c)
            })
            .collect();
        let result = StochasticKD::default().compute_all(&bars);
        for v in result.k.iter().chain(&result.d).filter(|v| v.is_finite()) {
            assert!((0.0..=100.0).contains(v));
        }
    }
}
