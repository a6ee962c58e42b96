use chrono::NaiveDate;

/// One OHLCV row of the base price series.
/// `date` is a timezone-naive calendar date (trading day, or week key for weekly bars).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DailyBar {
    /// Trading date
    pub date: NaiveDate,
    /// Open price
    pub open: f64,
    /// High price
    pub high: f64,
    /// Low price
    pub low: f64,
    /// Close price
    pub close: f64,
    /// Traded volume (shares)
    pub volume: f64,
}

impl DailyBar {
    /// Creates a bar from its OHLCV components.
    #[must_use]
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_serde_uses_iso_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let bar = DailyBar::new(date, 700.0, 712.0, 698.0, 710.0, 25_000_000.0);

        let json = serde_json::to_string(&bar).unwrap();
        assert!(json.contains("\"date\":\"2024-03-01\""));

        let back: DailyBar = serde_json::from_str(&json).unwrap();
        assert_eq!(back, bar);
    }
}
