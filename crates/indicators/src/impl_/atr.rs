//! Average True Range (ATR) indicator and the ATR stop line

use crate::rolling::rolling_mean;
use crate::traits::Indicator;
use chipfuse_types::DailyBar;

/// Average True Range as a simple rolling mean of true range.
#[derive(Debug, Clone)]
pub struct ATR {
    /// Number of periods for ATR calculation
    pub period: usize,
}

impl ATR {
    /// Creates a new ATR indicator with the given period.
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// TR = max(High - Low, |High - Prev_Close|, |Low - Prev_Close|)
    #[inline]
    fn true_range(bar: &DailyBar, prev_close: f64) -> f64 {
        let hl = bar.high - bar.low;
        let hc = (bar.high - prev_close).abs();
        let lc = (bar.low - prev_close).abs();
        hl.max(hc).max(lc)
    }
}

/// True range series. The first bar has no previous close, so its range is H - L.
pub fn true_range_series(bars: &[DailyBar]) -> Vec<f64> {
    let mut tr = Vec::with_capacity(bars.len());
    if let Some(first) = bars.first() {
        tr.push(first.high - first.low);
    }
    for pair in bars.windows(2) {
        tr.push(ATR::true_range(&pair[1], pair[0].close));
    }
    tr
}

/// `close - factor * atr`; NaN wherever `atr` is.
pub fn atr_stop(bars: &[DailyBar], atr: &[f64], factor: f64) -> Vec<f64> {
    bars.iter()
        .zip(atr)
        .map(|(bar, a)| bar.close - factor * a)
        .collect()
}

impl Indicator for ATR {
    fn compute(&self, bars: &[DailyBar]) -> Vec<f64> {
        rolling_mean(&true_range_series(bars), self.period)
    }
}
