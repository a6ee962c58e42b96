//! Main-force concentration ratio

use crate::error::IndicatorError;
use crate::rolling::rolling_sum;

/// Share of traded volume absorbed by the main force over a window, in percent:
/// `round2(sum(main_force_net, N) / (sum(volume, N) + epsilon) * 100)`.
#[derive(Debug, Clone)]
pub struct Concentration {
    /// Window length
    pub period: usize,
    /// Guard added to the volume sum
    pub epsilon: f64,
}

impl Concentration {
    /// Creates a concentration indicator with the default `1e-9` guard.
    pub fn new(period: usize) -> Self {
        Self {
            period,
            epsilon: 1e-9,
        }
    }

    /// Overrides the division guard.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Computes the ratio from aligned net-flow and volume series.
    ///
    /// # Errors
    /// Returns [`IndicatorError::LengthMismatch`] when the series differ in length.
    pub fn compute_flow(
        &self,
        main_force_net: &[f64],
        volume: &[f64],
    ) -> Result<Vec<f64>, IndicatorError> {
        if main_force_net.len() != volume.len() {
            return Err(IndicatorError::LengthMismatch {
                context: "concentration",
                expected: volume.len(),
                actual: main_force_net.len(),
            });
        }

        let flow = rolling_sum(main_force_net, self.period);
        let vol = rolling_sum(volume, self.period);
        Ok(flow
            .iter()
            .zip(&vol)
            .map(|(f, v)| round2(f / (v + self.epsilon) * 100.0))
            .collect())
    }
}

/// Rounds to two decimals, ties to even.
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_two_percent_example() {
        // 5 days of 200 net each against 10_000 volume each
        let net = [200.0; 5];
        let volume = [10_000.0; 5];
        let result = Concentration::new(5).compute_flow(&net, &volume).unwrap();
        assert!(result[..4].iter().all(|v| v.is_nan()));
        assert_relative_eq!(result[4], 2.0);
    }

    #[test]
    fn test_zero_volume_is_finite() {
        let result = Concentration::new(2)
            .compute_flow(&[0.0, 0.0, 0.0], &[0.0, 0.0, 0.0])
            .unwrap();
        assert_relative_eq!(result[1], 0.0);
        assert_relative_eq!(result[2], 0.0);
    }

    #[test]
    fn test_negative_flow_and_rounding() {
        let result = Concentration::new(1)
            .compute_flow(&[-1.0, 1.0], &[3.0, 3.0])
            .unwrap();
        assert_relative_eq!(result[0], -33.33);
        assert_relative_eq!(result[1], 33.33);
    }

    #[test]
    fn test_length_mismatch() {
        let err = Concentration::new(5)
            .compute_flow(&[1.0, 2.0], &[1.0])
            .unwrap_err();
        assert!(matches!(err, IndicatorError::LengthMismatch { .. }));
    }

    #[test]
    fn test_round2() {
        assert_relative_eq!(round2(1.234_56), 1.23);
        assert_relative_eq!(round2(-7.891), -7.89);
        assert!(round2(f64::NAN).is_nan());
    }
}
