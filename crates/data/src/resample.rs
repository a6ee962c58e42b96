//! Weekly resampling of price bars and chip tables.
//!
//! Weeks are ISO weeks (Monday start). A week is keyed by its first trading
//! date, so the resampled price index is a subset of the daily one.

use std::collections::BTreeMap;

use chipfuse_types::{ChipFeed, DailyBar};
use chrono::{Datelike, IsoWeek, NaiveDate};

use crate::table::{ChipFeeds, ChipTable};

/// How a chip feed collapses several daily rows into one weekly row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeekAggregation {
    /// Flows: the week's total
    Sum,
    /// Balances and snapshots: the week's last reported value
    Last,
}

impl WeekAggregation {
    /// Aggregation used for a feed.
    #[must_use]
    pub fn for_feed(feed: ChipFeed) -> Self {
        match feed {
            ChipFeed::Institutional => WeekAggregation::Sum,
            ChipFeed::MarginShort | ChipFeed::Shareholding => WeekAggregation::Last,
        }
    }
}

/// Aggregates daily bars into weekly bars.
///
/// `bars` must be sorted ascending. Open comes from the first bar of the week,
/// close from the last, high/low are the extremes and volume is summed.
#[must_use]
pub fn resample_bars_weekly(bars: &[DailyBar]) -> Vec<DailyBar> {
    let mut weekly: Vec<DailyBar> = Vec::new();
    let mut current: Option<IsoWeek> = None;

    for bar in bars {
        let week = bar.date.iso_week();
        match weekly.last_mut() {
            Some(acc) if current == Some(week) => {
                acc.high = acc.high.max(bar.high);
                acc.low = acc.low.min(bar.low);
                acc.close = bar.close;
                acc.volume += bar.volume;
            }
            _ => {
                weekly.push(*bar);
                current = Some(week);
            }
        }
    }

    weekly
}

/// Resamples a chip table onto weekly keys (the dates of resampled bars).
///
/// Rows whose week has no key are dropped. A table failing
/// [`ChipTable::validate`] is returned unchanged so fusion can reject it.
#[must_use]
pub fn resample_chips_weekly(table: &ChipTable, week_keys: &[NaiveDate]) -> ChipTable {
    if table.validate().is_err() {
        return table.clone();
    }

    let keys: BTreeMap<IsoWeek, NaiveDate> =
        week_keys.iter().map(|d| (d.iso_week(), *d)).collect();
    let feed = table.feed();
    let aggregation = WeekAggregation::for_feed(feed);
    let columns = feed.columns();

    let mut rows: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for (i, date) in table.dates().iter().enumerate() {
        let Some(key) = keys.get(&date.iso_week()) else {
            continue;
        };
        let values: Vec<f64> = columns
            .iter()
            .map(|c| table.column(*c).and_then(|v| v.get(i).copied()).unwrap_or(f64::NAN))
            .collect();

        match rows.get_mut(key) {
            Some(acc) => match aggregation {
                WeekAggregation::Sum => {
                    for (slot, value) in acc.iter_mut().zip(&values) {
                        *slot += value;
                    }
                }
                WeekAggregation::Last => *acc = values,
            },
            None => {
                rows.insert(*key, values);
            }
        }
    }

    match ChipTable::from_rows(feed, rows) {
        Ok(weekly) => weekly,
        Err(err) => {
            tracing::warn!("Weekly resample of {feed} failed: {err}");
            ChipTable::empty(feed)
        }
    }
}

/// Resamples every available feed onto the weekly bar index.
#[must_use]
pub fn resample_feeds_weekly(feeds: &ChipFeeds, weekly_bars: &[DailyBar]) -> ChipFeeds {
    let keys: Vec<NaiveDate> = weekly_bars.iter().map(|b| b.date).collect();
    let mut weekly = ChipFeeds::none();
    for feed in ChipFeed::FUSION_ORDER {
        if let Some(table) = feeds.get(feed) {
            weekly.insert(resample_chips_weekly(table, &keys));
        }
    }
    weekly
}

#[cfg(test)]
mod tests {
    use super::*;
    use chipfuse_types::ChipColumn;

    // 2024-01-01 is a Monday.
    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, day).unwrap()
    }

    fn bar(day: u32, open: f64, high: f64, low: f64, close: f64, volume: f64) -> DailyBar {
        DailyBar::new(date(day), open, high, low, close, volume)
    }

    #[test]
    fn test_bars_aggregate_per_iso_week() {
        let daily = vec![
            bar(2, 10.0, 12.0, 9.0, 11.0, 100.0),
            bar(3, 11.0, 15.0, 10.0, 14.0, 200.0),
            bar(5, 14.0, 14.5, 8.0, 9.0, 300.0),
            bar(8, 9.0, 10.0, 8.5, 9.5, 50.0),
        ];
        let weekly = resample_bars_weekly(&daily);

        assert_eq!(weekly.len(), 2);
        let first = &weekly[0];
        assert_eq!(first.date, date(2));
        assert_eq!(first.open, 10.0);
        assert_eq!(first.high, 15.0);
        assert_eq!(first.low, 8.0);
        assert_eq!(first.close, 9.0);
        assert_eq!(first.volume, 600.0);
        assert_eq!(weekly[1].date, date(8));
    }

    #[test]
    fn test_institutional_summed_margin_last() {
        let keys = [date(2), date(8)];
        let institutional = ChipTable::from_rows(
            ChipFeed::Institutional,
            BTreeMap::from([
                (date(2), vec![10.0, 1.0, -1.0]),
                (date(4), vec![5.0, 1.0, 0.0]),
                (date(9), vec![7.0, 0.0, 0.0]),
            ]),
        )
        .unwrap();
        let weekly = resample_chips_weekly(&institutional, &keys);
        assert_eq!(weekly.dates(), &keys);
        assert_eq!(weekly.column(ChipColumn::ForeignNet), Some(&[15.0, 7.0][..]));
        assert_eq!(weekly.column(ChipColumn::DealerNet), Some(&[-1.0, 0.0][..]));

        let margin = ChipTable::from_rows(
            ChipFeed::MarginShort,
            BTreeMap::from([(date(2), vec![100.0, 5.0]), (date(5), vec![120.0, 4.0])]),
        )
        .unwrap();
        let weekly = resample_chips_weekly(&margin, &keys);
        assert_eq!(weekly.dates(), &[date(2)]);
        assert_eq!(weekly.column(ChipColumn::MarginBalance), Some(&[120.0][..]));
    }

    #[test]
    fn test_report_in_week_without_bars_dropped() {
        let shareholding = ChipTable::from_rows(
            ChipFeed::Shareholding,
            BTreeMap::from([(date(20), vec![60.0, 10.0, 50.0])]),
        )
        .unwrap();
        let weekly = resample_chips_weekly(&shareholding, &[date(2)]);
        assert!(weekly.is_empty());
    }

    #[test]
    fn test_feeds_keep_absent_slots_absent() {
        let feeds = ChipFeeds::none().with(ChipTable::empty(ChipFeed::MarginShort));
        let weekly = resample_feeds_weekly(&feeds, &[bar(2, 1.0, 1.0, 1.0, 1.0, 1.0)]);
        assert!(weekly.institutional.is_none());
        assert!(weekly.margin_short.is_some());
    }
}
