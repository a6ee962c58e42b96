use crate::chip::FillPolicyTable;
use crate::error::CoreError;
use crate::interval::{Interval, LookbackPeriod};

/// Main pipeline configuration (one batch run)
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct PipelineConfig {
    /// Tickers to process, in order
    pub symbols: Vec<String>,
    /// Requested history length
    #[serde(default)]
    pub period: LookbackPeriod,
    /// Bar interval of the fused series
    #[serde(default)]
    pub interval: Interval,
    /// Holding-bracket classification
    #[serde(default)]
    pub brackets: BracketConfig,
    /// Indicator windows
    #[serde(default)]
    pub indicators: IndicatorConfig,
    /// Per-column fill policies used by fusion
    #[serde(default)]
    pub fill_policies: FillPolicyTable,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl PipelineConfig {
    /// Creates a config for the given symbols with every other field defaulted.
    #[must_use]
    pub fn for_symbols(symbols: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            symbols: symbols.into_iter().map(Into::into).collect(),
            period: LookbackPeriod::default(),
            interval: Interval::default(),
            brackets: BracketConfig::default(),
            indicators: IndicatorConfig::default(),
            fill_policies: FillPolicyTable::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validates every section.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.symbols.iter().all(|s| s.trim().is_empty()) {
            return Err(CoreError::Config("symbols is empty".to_string()));
        }
        self.brackets.validate()?;
        self.indicators.validate()?;
        self.fill_policies.validate()
    }
}

// ============================================
// SUB-CONFIGS
// ============================================

/// Shareholding bracket thresholds.
///
/// Providers number holding brackets from 1 (smallest holdings) upward; rows
/// above `max_bracket_level` are adjustment or total rows and are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BracketConfig {
    /// Lowest level counted as "big hands"
    #[serde(default = "default_big_min_level")]
    pub big_min_level: u32,
    /// Highest level counted as "small hands"
    #[serde(default = "default_small_max_level")]
    pub small_max_level: u32,
    /// Highest real bracket level
    #[serde(default = "default_max_bracket_level")]
    pub max_bracket_level: u32,
}

fn default_big_min_level() -> u32 {
    12
}

fn default_small_max_level() -> u32 {
    3
}

fn default_max_bracket_level() -> u32 {
    15
}

impl Default for BracketConfig {
    fn default() -> Self {
        Self {
            big_min_level: default_big_min_level(),
            small_max_level: default_small_max_level(),
            max_bracket_level: default_max_bracket_level(),
        }
    }
}

impl BracketConfig {
    /// Whether a level counts towards the big-hands percentage.
    #[must_use]
    pub fn is_big(&self, level: u32) -> bool {
        level >= self.big_min_level && level <= self.max_bracket_level
    }

    /// Whether a level counts towards the small-hands percentage.
    #[must_use]
    pub fn is_small(&self, level: u32) -> bool {
        level >= 1 && level <= self.small_max_level
    }

    /// # Errors
    /// Returns [`CoreError::Config`] unless `1 <= small_max < big_min <= max_bracket`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.small_max_level == 0 {
            return Err(CoreError::Config(
                "brackets.small_max_level must be >= 1".to_string(),
            ));
        }
        if self.small_max_level >= self.big_min_level {
            return Err(CoreError::Config(format!(
                "brackets.small_max_level ({}) must be below brackets.big_min_level ({})",
                self.small_max_level, self.big_min_level
            )));
        }
        if self.big_min_level > self.max_bracket_level {
            return Err(CoreError::Config(format!(
                "brackets.big_min_level ({}) exceeds brackets.max_bracket_level ({})",
                self.big_min_level, self.max_bracket_level
            )));
        }
        Ok(())
    }
}

/// Indicator windows and constants.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct IndicatorConfig {
    /// Moving-average windows for ma5/ma10/ma20/ma60
    #[serde(default = "default_ma_periods")]
    pub ma_periods: [usize; 4],
    /// Bollinger window
    #[serde(default = "default_bollinger_period")]
    pub bollinger_period: usize,
    /// Bollinger standard-deviation factor
    #[serde(default = "default_two")]
    pub bollinger_std_factor: f64,
    /// ATR window
    #[serde(default = "default_atr_period")]
    pub atr_period: usize,
    /// ATR stop multiplier
    #[serde(default = "default_two")]
    pub atr_stop_factor: f64,
    /// MACD fast/slow/signal spans
    #[serde(default = "default_macd_spans")]
    pub macd_spans: [usize; 3],
    /// Stochastic RSV window
    #[serde(default = "default_rsv_period")]
    pub rsv_period: usize,
    /// Centre of mass for K and D smoothing
    #[serde(default = "default_two")]
    pub kd_com: f64,
    /// Volume moving-average window
    #[serde(default = "default_volume_ma_period")]
    pub volume_ma_period: usize,
    /// Concentration windows (concentration_5, concentration_20)
    #[serde(default = "default_concentration_periods")]
    pub concentration_periods: [usize; 2],
    /// Guard added to the volume sum of a concentration window
    #[serde(default = "default_concentration_epsilon")]
    pub concentration_epsilon: f64,
    /// Force-index EWM span
    #[serde(default = "default_efi_span")]
    pub efi_span: usize,
}

fn default_ma_periods() -> [usize; 4] {
    [5, 10, 20, 60]
}

fn default_bollinger_period() -> usize {
    20
}

fn default_two() -> f64 {
    2.0
}

fn default_atr_period() -> usize {
    14
}

fn default_macd_spans() -> [usize; 3] {
    [12, 26, 9]
}

fn default_rsv_period() -> usize {
    9
}

fn default_volume_ma_period() -> usize {
    5
}

fn default_concentration_periods() -> [usize; 2] {
    [5, 20]
}

fn default_concentration_epsilon() -> f64 {
    1e-9
}

fn default_efi_span() -> usize {
    13
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_periods: default_ma_periods(),
            bollinger_period: default_bollinger_period(),
            bollinger_std_factor: default_two(),
            atr_period: default_atr_period(),
            atr_stop_factor: default_two(),
            macd_spans: default_macd_spans(),
            rsv_period: default_rsv_period(),
            kd_com: default_two(),
            volume_ma_period: default_volume_ma_period(),
            concentration_periods: default_concentration_periods(),
            concentration_epsilon: default_concentration_epsilon(),
            efi_span: default_efi_span(),
        }
    }
}

impl IndicatorConfig {
    /// # Errors
    /// Returns [`CoreError::Config`] for zero windows or a non-positive epsilon.
    pub fn validate(&self) -> Result<(), CoreError> {
        let windows = self
            .ma_periods
            .iter()
            .chain(self.macd_spans.iter())
            .chain(self.concentration_periods.iter())
            .chain([
                &self.bollinger_period,
                &self.atr_period,
                &self.rsv_period,
                &self.volume_ma_period,
                &self.efi_span,
            ]);
        if windows.into_iter().any(|w| *w == 0) {
            return Err(CoreError::Config(
                "indicator windows must be > 0".to_string(),
            ));
        }
        if !(self.concentration_epsilon.is_finite() && self.concentration_epsilon > 0.0) {
            return Err(CoreError::Config(
                "indicators.concentration_epsilon must be > 0".to_string(),
            ));
        }
        if !(self.kd_com.is_finite() && self.kd_com >= 0.0) {
            return Err(CoreError::Config(
                "indicators.kd_com must be >= 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Emit ANSI colours
    #[serde(default)]
    pub ansi: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            ansi: false,
        }
    }
}
