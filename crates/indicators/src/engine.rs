//! Indicator engine: fused series in, indicator table out.
//!
//! Undefined values stay NaN inside [`IndicatorTable`]; each column records the
//! first index holding a computed value. [`IndicatorTable::finalize`] is the
//! only place they are replaced by 0.0.

use std::collections::BTreeMap;

use chipfuse_data::FusedTable;
use chipfuse_types::{ChipColumn, IndicatorColumn, IndicatorConfig, UnifiedRow, UnifiedTable};

use crate::error::IndicatorError;
use crate::impl_::atr::{ATR, atr_stop};
use crate::impl_::bollinger::BollingerBands;
use crate::impl_::concentration::Concentration;
use crate::impl_::force_index::ForceIndex;
use crate::impl_::macd::MACD;
use crate::impl_::sma::SMA;
use crate::impl_::stochastic::StochasticKD;
use crate::rolling::first_defined;
use crate::traits::{Indicator, MultiOutputIndicator};

/// One computed indicator column.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    values: Vec<f64>,
    defined_from: Option<usize>,
}

impl Series {
    /// Wraps computed values; `defined_from` is the first finite index.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        let defined_from = first_defined(&values);
        Self {
            values,
            defined_from,
        }
    }

    /// Raw values, NaN where undefined.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// First index holding a computed value, if any.
    #[must_use]
    pub fn defined_from(&self) -> Option<usize> {
        self.defined_from
    }

    /// Value at `idx`, `None` when undefined or out of range.
    #[must_use]
    pub fn get(&self, idx: usize) -> Option<f64> {
        self.values.get(idx).copied().filter(|v| !v.is_nan())
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the series has no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A fused table plus every indicator column.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorTable {
    fused: FusedTable,
    series: BTreeMap<IndicatorColumn, Series>,
}

impl IndicatorTable {
    /// Underlying fused price/chip table.
    #[must_use]
    pub fn fused(&self) -> &FusedTable {
        &self.fused
    }

    /// Series of an indicator column.
    #[must_use]
    pub fn series(&self, column: IndicatorColumn) -> Option<&Series> {
        self.series.get(&column)
    }

    /// Indicator value at row `idx`; `None` where it is not computable.
    #[must_use]
    pub fn value(&self, column: IndicatorColumn, idx: usize) -> Option<f64> {
        self.series.get(&column).and_then(|s| s.get(idx))
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fused.len()
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fused.is_empty()
    }

    /// Converts into the presentation table: every undefined value becomes 0.0.
    #[must_use]
    pub fn finalize(&self, symbol: &str) -> UnifiedTable {
        let chip = |column: ChipColumn, i: usize| self.fused.chip(column)[i];
        let ind = |column: IndicatorColumn, i: usize| self.value(column, i).unwrap_or(0.0);

        let rows = self
            .fused
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| UnifiedRow {
                date: bar.date,
                open: bar.open,
                high: bar.high,
                low: bar.low,
                close: bar.close,
                volume: bar.volume,
                foreign_net: chip(ChipColumn::ForeignNet, i),
                trust_net: chip(ChipColumn::TrustNet, i),
                dealer_net: chip(ChipColumn::DealerNet, i),
                margin_balance: chip(ChipColumn::MarginBalance, i),
                short_balance: chip(ChipColumn::ShortBalance, i),
                big_hands_pct: chip(ChipColumn::BigHandsPct, i),
                small_hands_pct: chip(ChipColumn::SmallHandsPct, i),
                chip_spread: chip(ChipColumn::ChipSpread, i),
                main_force_net: self.fused.main_force_net()[i],
                ma5: ind(IndicatorColumn::Ma5, i),
                ma10: ind(IndicatorColumn::Ma10, i),
                ma20: ind(IndicatorColumn::Ma20, i),
                ma60: ind(IndicatorColumn::Ma60, i),
                bb_up: ind(IndicatorColumn::BbUp, i),
                bb_lo: ind(IndicatorColumn::BbLo, i),
                atr: ind(IndicatorColumn::Atr, i),
                atr_stop: ind(IndicatorColumn::AtrStop, i),
                macd: ind(IndicatorColumn::Macd, i),
                signal: ind(IndicatorColumn::Signal, i),
                hist: ind(IndicatorColumn::Hist, i),
                k: ind(IndicatorColumn::K, i),
                d: ind(IndicatorColumn::D, i),
                concentration_5: ind(IndicatorColumn::Concentration5, i),
                concentration_20: ind(IndicatorColumn::Concentration20, i),
                efi_13: ind(IndicatorColumn::Efi13, i),
                vol_ma5: ind(IndicatorColumn::VolMa5, i),
            })
            .collect();

        UnifiedTable::new(symbol, rows)
    }
}

/// Computes every indicator column over a fused table.
///
/// # Errors
/// - [`IndicatorError::InvalidParams`] when `config` fails validation.
/// - [`IndicatorError::LengthMismatch`] when the fused series disagree in length.
pub fn compute_indicators(
    fused: &FusedTable,
    config: &IndicatorConfig,
) -> Result<IndicatorTable, IndicatorError> {
    config
        .validate()
        .map_err(|e| IndicatorError::invalid_params(e.to_string()))?;

    let bars = fused.bars();
    let mut series: BTreeMap<IndicatorColumn, Series> = BTreeMap::new();
    let mut put = |column: IndicatorColumn, values: Vec<f64>| {
        series.insert(column, Series::new(values));
    };

    let [p5, p10, p20, p60] = config.ma_periods;
    put(IndicatorColumn::Ma5, SMA::new(p5).compute(bars));
    put(IndicatorColumn::Ma10, SMA::new(p10).compute(bars));
    put(IndicatorColumn::Ma20, SMA::new(p20).compute(bars));
    put(IndicatorColumn::Ma60, SMA::new(p60).compute(bars));

    let bollinger =
        BollingerBands::new(config.bollinger_period, config.bollinger_std_factor).compute_all(bars);
    put(IndicatorColumn::BbUp, bollinger.upper);
    put(IndicatorColumn::BbLo, bollinger.lower);

    let atr = ATR::new(config.atr_period).compute(bars);
    put(
        IndicatorColumn::AtrStop,
        atr_stop(bars, &atr, config.atr_stop_factor),
    );
    put(IndicatorColumn::Atr, atr);

    let [fast, slow, signal] = config.macd_spans;
    let macd = MACD::new(fast, slow, signal).compute_all(bars);
    put(IndicatorColumn::Macd, macd.macd);
    put(IndicatorColumn::Signal, macd.signal);
    put(IndicatorColumn::Hist, macd.hist);

    let kd = StochasticKD::new(config.rsv_period, config.kd_com).compute_all(bars);
    put(IndicatorColumn::K, kd.k);
    put(IndicatorColumn::D, kd.d);

    put(
        IndicatorColumn::VolMa5,
        SMA::of_volume(config.volume_ma_period).compute(bars),
    );

    let volumes = fused.volumes();
    let [c_short, c_long] = config.concentration_periods;
    for (column, period) in [
        (IndicatorColumn::Concentration5, c_short),
        (IndicatorColumn::Concentration20, c_long),
    ] {
        let ratio = Concentration::new(period)
            .with_epsilon(config.concentration_epsilon)
            .compute_flow(fused.main_force_net(), &volumes)?;
        put(column, ratio);
    }

    put(
        IndicatorColumn::Efi13,
        ForceIndex::new(config.efi_span).compute(bars),
    );

    tracing::debug!(
        "Computed {} indicator columns over {} bars",
        series.len(),
        bars.len()
    );

    Ok(IndicatorTable {
        fused: fused.clone(),
        series,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipfuse_data::{ChipFeeds, ChipTable, fuse};
    use chipfuse_types::{ChipFeed, DailyBar, FillPolicyTable};
    use chrono::{Days, NaiveDate};

    fn bars(n: u64) -> Vec<DailyBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        (0..n)
            .map(|i| {
                let close = 100.0 + (i as f64 * 0.3).sin() * 4.0 + i as f64 * 0.1;
                DailyBar::new(
                    start.checked_add_days(Days::new(i)).unwrap(),
                    close,
                    close + 1.5,
                    close - 1.5,
                    close,
                    10_000.0,
                )
            })
            .collect()
    }

    fn fused(n: u64) -> FusedTable {
        fuse(&bars(n), &ChipFeeds::none(), &FillPolicyTable::default()).unwrap()
    }

    #[test]
    fn test_every_column_present_and_aligned() {
        let table = compute_indicators(&fused(70), &IndicatorConfig::default()).unwrap();
        for column in IndicatorColumn::ALL {
            let series = table.series(column).unwrap();
            assert_eq!(series.len(), 70, "{column:?}");
        }
    }

    #[test]
    fn test_defined_from_markers() {
        let table = compute_indicators(&fused(70), &IndicatorConfig::default()).unwrap();
        let from = |c| table.series(c).unwrap().defined_from();

        assert_eq!(from(IndicatorColumn::Ma5), Some(4));
        assert_eq!(from(IndicatorColumn::Ma20), Some(19));
        assert_eq!(from(IndicatorColumn::Ma60), Some(59));
        assert_eq!(from(IndicatorColumn::BbUp), Some(19));
        assert_eq!(from(IndicatorColumn::Atr), Some(13));
        assert_eq!(from(IndicatorColumn::AtrStop), Some(13));
        assert_eq!(from(IndicatorColumn::Macd), Some(0));
        assert_eq!(from(IndicatorColumn::K), Some(8));
        assert_eq!(from(IndicatorColumn::Concentration20), Some(19));
        assert_eq!(from(IndicatorColumn::Efi13), Some(1));
        assert_eq!(from(IndicatorColumn::VolMa5), Some(4));
    }

    #[test]
    fn test_value_exposes_undefined() {
        let table = compute_indicators(&fused(30), &IndicatorConfig::default()).unwrap();
        assert_eq!(table.value(IndicatorColumn::Ma20, 18), None);
        assert!(table.value(IndicatorColumn::Ma20, 19).is_some());
        assert_eq!(table.value(IndicatorColumn::Ma60, 29), None);
    }

    #[test]
    fn test_finalize_zero_fills_and_keeps_chips() {
        let price = bars(25);
        let inst = ChipTable::from_rows(
            ChipFeed::Institutional,
            [(price[3].date, vec![300.0, 200.0, 0.0])].into_iter().collect(),
        )
        .unwrap();
        let fused = fuse(
            &price,
            &ChipFeeds::none().with(inst),
            &FillPolicyTable::default(),
        )
        .unwrap();

        let unified = compute_indicators(&fused, &IndicatorConfig::default())
            .unwrap()
            .finalize("2330.TW");

        assert_eq!(unified.symbol(), "2330.TW");
        assert_eq!(unified.len(), 25);
        let rows = unified.rows();
        assert_eq!(rows[0].ma20, 0.0);
        assert_eq!(rows[0].efi_13, 0.0);
        assert!(rows[19].ma20 > 0.0);
        assert_eq!(rows[3].main_force_net, 500.0);
        assert_eq!(rows[4].foreign_net, 0.0);
        // 500 / 50_000 * 100 over the 5-row window ending at row 4
        assert!((rows[4].concentration_5 - 1.0).abs() < 1e-12);
        assert!(rows.iter().all(|r| r.hist == r.macd - r.signal));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = IndicatorConfig {
            atr_period: 0,
            ..IndicatorConfig::default()
        };
        let err = compute_indicators(&fused(10), &config).unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidParams(_)));
    }

    #[test]
    fn test_empty_table() {
        let empty = fuse(&[], &ChipFeeds::none(), &FillPolicyTable::default()).unwrap();
        let table = compute_indicators(&empty, &IndicatorConfig::default()).unwrap();
        assert!(table.is_empty());
        assert!(table.finalize("X").is_empty());
    }
}
