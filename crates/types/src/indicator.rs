/// Derived indicator columns of the unified table, in output order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum IndicatorColumn {
    /// 5-bar simple moving average of close
    Ma5,
    /// 10-bar simple moving average of close
    Ma10,
    /// 20-bar simple moving average of close
    Ma20,
    /// 60-bar simple moving average of close
    Ma60,
    /// Upper Bollinger band
    BbUp,
    /// Lower Bollinger band
    BbLo,
    /// Average true range
    Atr,
    /// `close - 2 * atr`
    AtrStop,
    /// MACD line
    Macd,
    /// MACD signal line
    Signal,
    /// MACD histogram
    Hist,
    /// Stochastic %K
    K,
    /// Stochastic %D
    D,
    /// 5-bar main-force concentration
    #[serde(rename = "concentration_5")]
    Concentration5,
    /// 20-bar main-force concentration
    #[serde(rename = "concentration_20")]
    Concentration20,
    /// 13-bar elastic force index
    #[serde(rename = "efi_13")]
    Efi13,
    /// 5-bar moving average of volume
    #[serde(rename = "vol_ma5")]
    VolMa5,
}

impl IndicatorColumn {
    /// All indicator columns in output order.
    pub const ALL: [IndicatorColumn; 17] = [
        IndicatorColumn::Ma5,
        IndicatorColumn::Ma10,
        IndicatorColumn::Ma20,
        IndicatorColumn::Ma60,
        IndicatorColumn::BbUp,
        IndicatorColumn::BbLo,
        IndicatorColumn::Atr,
        IndicatorColumn::AtrStop,
        IndicatorColumn::Macd,
        IndicatorColumn::Signal,
        IndicatorColumn::Hist,
        IndicatorColumn::K,
        IndicatorColumn::D,
        IndicatorColumn::Concentration5,
        IndicatorColumn::Concentration20,
        IndicatorColumn::Efi13,
        IndicatorColumn::VolMa5,
    ];

    /// Output column name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorColumn::Ma5 => "ma5",
            IndicatorColumn::Ma10 => "ma10",
            IndicatorColumn::Ma20 => "ma20",
            IndicatorColumn::Ma60 => "ma60",
            IndicatorColumn::BbUp => "bb_up",
            IndicatorColumn::BbLo => "bb_lo",
            IndicatorColumn::Atr => "atr",
            IndicatorColumn::AtrStop => "atr_stop",
            IndicatorColumn::Macd => "macd",
            IndicatorColumn::Signal => "signal",
            IndicatorColumn::Hist => "hist",
            IndicatorColumn::K => "k",
            IndicatorColumn::D => "d",
            IndicatorColumn::Concentration5 => "concentration_5",
            IndicatorColumn::Concentration20 => "concentration_20",
            IndicatorColumn::Efi13 => "efi_13",
            IndicatorColumn::VolMa5 => "vol_ma5",
        }
    }

    /// True for columns that depend on fused chip data.
    #[must_use]
    pub fn is_money_flow(&self) -> bool {
        matches!(
            self,
            IndicatorColumn::Concentration5
                | IndicatorColumn::Concentration20
                | IndicatorColumn::Efi13
        )
    }
}
