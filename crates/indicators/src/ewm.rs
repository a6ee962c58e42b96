//! Exponentially weighted moving mean.

use crate::error::IndicatorError;

/// Exponentially weighted mean with smoothing factor `alpha`.
///
/// `adjust = true` weights observation `t - i` by `(1 - alpha)^i` and divides by
/// the weight sum; `adjust = false` is the recursive form
/// `y_t = (1 - alpha) * y_{t-1} + alpha * x_t`.
///
/// Output is NaN until the first finite input. A NaN input after that carries
/// the previous mean forward while the weight of the history keeps decaying.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ewm {
    /// Smoothing factor in `(0, 1]`
    pub alpha: f64,
    /// Normalised (adjusted) weighting
    pub adjust: bool,
}

impl Ewm {
    /// `alpha = 2 / (span + 1)`.
    ///
    /// # Errors
    /// Returns [`IndicatorError::InvalidParams`] when `span` is 0.
    pub fn from_span(span: usize, adjust: bool) -> Result<Self, IndicatorError> {
        if span == 0 {
            return Err(IndicatorError::invalid_params("ewm span must be >= 1"));
        }
        Ok(Self {
            alpha: 2.0 / (span as f64 + 1.0),
            adjust,
        })
    }

    /// `alpha = 1 / (1 + com)`.
    ///
    /// # Errors
    /// Returns [`IndicatorError::InvalidParams`] when `com` is negative or not finite.
    pub fn from_com(com: f64, adjust: bool) -> Result<Self, IndicatorError> {
        if !com.is_finite() || com < 0.0 {
            return Err(IndicatorError::invalid_params(format!(
                "ewm center of mass must be >= 0, got {com}"
            )));
        }
        Ok(Self {
            alpha: 1.0 / (1.0 + com),
            adjust,
        })
    }

    /// Computes the mean over the whole series.
    #[must_use]
    pub fn mean(&self, values: &[f64]) -> Vec<f64> {
        let decay = 1.0 - self.alpha;
        let new_wt = if self.adjust { 1.0 } else { self.alpha };
        let mut old_wt = 1.0;
        let mut weighted = f64::NAN;
        let mut result = Vec::with_capacity(values.len());

        for &cur in values {
            let observed = cur.is_finite();
            if weighted.is_finite() {
                old_wt *= decay;
                if observed {
                    if weighted != cur {
                        weighted = (old_wt * weighted + new_wt * cur) / (old_wt + new_wt);
                    }
                    if self.adjust {
                        old_wt += new_wt;
                    } else {
                        old_wt = 1.0;
                    }
                }
            } else if observed {
                weighted = cur;
            }
            result.push(weighted);
        }

        result
    }
}
