//! Elastic (smoothed) force index

use crate::ewm::Ewm;
use crate::traits::Indicator;
use chipfuse_types::DailyBar;

/// Force index smoothed with an adjusted span EWM.
#[derive(Debug, Clone)]
pub struct ForceIndex {
    /// EWM span
    pub span: usize,
}

impl ForceIndex {
    /// Creates a force index with the given smoothing span.
    pub fn new(span: usize) -> Self {
        Self { span }
    }
}

/// `(close_t - close_{t-1}) * volume_t`; undefined for the first bar.
pub fn raw_force(bars: &[DailyBar]) -> Vec<f64> {
    let mut force = Vec::with_capacity(bars.len());
    if !bars.is_empty() {
        force.push(f64::NAN);
    }
    for pair in bars.windows(2) {
        force.push((pair[1].close - pair[0].close) * pair[1].volume);
    }
    force
}

impl Indicator for ForceIndex {
    fn compute(&self, bars: &[DailyBar]) -> Vec<f64> {
        match Ewm::from_span(self.span, true) {
            Ok(ewm) => ewm.mean(&raw_force(bars)),
            Err(_) => vec![f64::NAN; bars.len()],
        }
    }
}
