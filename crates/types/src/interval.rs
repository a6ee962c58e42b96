/// Bar interval of the fused series.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Interval {
    /// One bar per trading day
    #[default]
    Daily,
    /// One bar per ISO week, aggregated from daily bars
    Weekly,
}

/// Error parsing an interval or lookback string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIntervalError(pub String);

impl std::fmt::Display for ParseIntervalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid interval or period: {}", self.0)
    }
}

impl std::error::Error for ParseIntervalError {}

impl std::str::FromStr for Interval {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1d" | "d1" | "daily" => Ok(Interval::Daily),
            "1wk" | "w1" | "weekly" => Ok(Interval::Weekly),
            _ => Err(ParseIntervalError(s.to_string())),
        }
    }
}

impl Interval {
    /// Provider-style interval code
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::Daily => "1d",
            Interval::Weekly => "1wk",
        }
    }
}

/// Requested history length handed to the price collaborator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, serde::Serialize, serde::Deserialize,
)]
pub enum LookbackPeriod {
    /// One year
    #[serde(rename = "1y")]
    OneYear,
    /// Three years
    #[default]
    #[serde(rename = "3y")]
    ThreeYears,
    /// Five years
    #[serde(rename = "5y")]
    FiveYears,
    /// Ten years
    #[serde(rename = "10y")]
    TenYears,
}

impl std::str::FromStr for LookbackPeriod {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1y" => Ok(LookbackPeriod::OneYear),
            "3y" => Ok(LookbackPeriod::ThreeYears),
            "5y" => Ok(LookbackPeriod::FiveYears),
            "10y" => Ok(LookbackPeriod::TenYears),
            _ => Err(ParseIntervalError(s.to_string())),
        }
    }
}

impl LookbackPeriod {
    /// Number of calendar years covered
    #[must_use]
    pub fn years(&self) -> u32 {
        match self {
            LookbackPeriod::OneYear => 1,
            LookbackPeriod::ThreeYears => 3,
            LookbackPeriod::FiveYears => 5,
            LookbackPeriod::TenYears => 10,
        }
    }

    /// Provider-style period code
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            LookbackPeriod::OneYear => "1y",
            LookbackPeriod::ThreeYears => "3y",
            LookbackPeriod::FiveYears => "5y",
            LookbackPeriod::TenYears => "10y",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_interval_from_str() {
        assert_eq!(Interval::from_str("1d"), Ok(Interval::Daily));
        assert_eq!(Interval::from_str("Daily"), Ok(Interval::Daily));
        assert_eq!(Interval::from_str("1wk"), Ok(Interval::Weekly));
        assert!(Interval::from_str("1h").is_err());
    }

    #[test]
    fn test_lookback_serde_uses_provider_codes() {
        let json = serde_json::to_string(&LookbackPeriod::TenYears).unwrap();
        assert_eq!(json, "\"10y\"");
        let back: LookbackPeriod = serde_json::from_str("\"1y\"").unwrap();
        assert_eq!(back, LookbackPeriod::OneYear);
        assert_eq!(back.years(), 1);
    }

    #[test]
    fn test_defaults_match_batch_downloader() {
        assert_eq!(Interval::default(), Interval::Daily);
        assert_eq!(LookbackPeriod::default().as_str(), "3y");
    }
}
