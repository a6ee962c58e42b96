//! Fixed-window primitives.
//!
//! A window yields a value only when it holds `window` defined inputs;
//! otherwise the output is NaN. The first `window - 1` outputs are always NaN.

/// Applies `f` to every full window whose inputs are all finite.
fn rolling_apply(values: &[f64], window: usize, f: impl Fn(&[f64]) -> f64) -> Vec<f64> {
    let len = values.len();
    let mut result = vec![f64::NAN; len];
    if window == 0 || len < window {
        return result;
    }

    for i in (window - 1)..len {
        let slice = &values[i + 1 - window..=i];
        if slice.iter().all(|v| v.is_finite()) {
            result[i] = f(slice);
        }
    }
    result
}

/// Rolling sum.
#[must_use]
pub fn rolling_sum(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| w.iter().sum())
}

/// Rolling arithmetic mean.
#[must_use]
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| w.iter().sum::<f64>() / w.len() as f64)
}

/// Rolling standard deviation with `ddof` delta degrees of freedom
/// (`ddof = 1` is the sample deviation). NaN when `window <= ddof`.
#[must_use]
pub fn rolling_std(values: &[f64], window: usize, ddof: usize) -> Vec<f64> {
    if window <= ddof {
        return vec![f64::NAN; values.len()];
    }
    rolling_apply(values, window, |w| {
        let n = w.len() as f64;
        let mean = w.iter().sum::<f64>() / n;
        let ss: f64 = w.iter().map(|x| (x - mean).powi(2)).sum();
        (ss / (n - ddof as f64)).sqrt()
    })
}

/// Rolling minimum.
#[must_use]
pub fn rolling_min(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| w.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Rolling maximum.
#[must_use]
pub fn rolling_max(values: &[f64], window: usize) -> Vec<f64> {
    rolling_apply(values, window, |w| {
        w.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    })
}

/// Index of the first finite value.
#[must_use]
pub fn first_defined(values: &[f64]) -> Option<usize> {
    values.iter().position(|v| v.is_finite())
}
