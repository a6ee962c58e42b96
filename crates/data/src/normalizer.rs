//! Feed normalizer: raw collaborator feeds into date-indexed tables.
//!
//! Every chip normalizer takes the collaborator's `Result` as-is. A failed or
//! empty feed yields an empty [`ChipTable`] and a log line; it never aborts the
//! pipeline.

use std::collections::BTreeMap;

use chipfuse_types::{BracketConfig, ChipFeed, DailyBar};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::{DataError, FeedError};
use crate::raw::{InvestorType, RawInstitutionalRecord, RawMarginRecord, RawShareholdingRecord};
use crate::table::ChipTable;
use crate::validation::{clamp_range, validate_bar, validate_bar_values};

/// Coerces a provider date string to a timezone-naive calendar date.
///
/// Accepts `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS`, `YYYY-MM-DDTHH:MM:SS`,
/// RFC 3339 (the local calendar date at the given offset is kept) and `YYYYMMDD`.
///
/// # Errors
/// - [`DataError::InvalidDate`] when no format matches.
pub fn parse_feed_date(raw: &str) -> Result<NaiveDate, DataError> {
    let s = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.date_naive());
    }
    if s.len() == 8
        && let Ok(date) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(date);
    }
    Err(DataError::InvalidDate(raw.to_string()))
}

/// Sorts bars by date and keeps the last bar of each date.
///
/// Bars with non-finite values, non-positive prices or negative volume are
/// dropped. Bars whose high/low do not contain open and close stay in the
/// index with the range widened.
#[must_use]
pub fn normalize_bars(mut bars: Vec<DailyBar>) -> Vec<DailyBar> {
    bars.sort_by_key(|b| b.date);

    let mut out: Vec<DailyBar> = Vec::with_capacity(bars.len());
    let mut dropped = 0usize;
    for bar in bars {
        if let Err(err) = validate_bar_values(&bar) {
            tracing::warn!("Dropping price bar: {err}");
            dropped += 1;
            continue;
        }
        let bar = if validate_bar(&bar).is_ok() {
            bar
        } else {
            let clamped = clamp_range(&bar);
            tracing::warn!(
                "Widening OHLC range at {}: high {} -> {}, low {} -> {}",
                bar.date,
                bar.high,
                clamped.high,
                bar.low,
                clamped.low
            );
            clamped
        };
        match out.last_mut() {
            Some(last) if last.date == bar.date => *last = bar,
            _ => out.push(bar),
        }
    }

    if dropped > 0 {
        tracing::warn!("Price feed: dropped {dropped} invalid bars, kept {}", out.len());
    }
    out
}

/// Institutional feed: per date, `net = sum(buy) - sum(sell)` for foreign,
/// investment-trust and dealer-self investors. A tracked type missing on a
/// reported date nets to 0.0.
#[must_use]
pub fn normalize_institutional(
    feed: Result<Vec<RawInstitutionalRecord>, FeedError>,
) -> ChipTable {
    let Some(records) = accept_feed(ChipFeed::Institutional, feed) else {
        return ChipTable::empty(ChipFeed::Institutional);
    };

    let mut nets: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    let mut skipped = 0usize;
    for record in records {
        let Some(investor) = InvestorType::from_label(&record.name) else {
            continue;
        };
        let Some(date) = record_date(&record.date) else {
            skipped += 1;
            continue;
        };
        if !record.buy.is_finite() || !record.sell.is_finite() {
            skipped += 1;
            continue;
        }
        let row = nets.entry(date).or_insert_with(|| vec![0.0; 3]);
        row[investor_slot(investor)] += record.buy - record.sell;
    }

    build_table(ChipFeed::Institutional, nets, skipped)
}

/// Margin/short feed: one row per date, duplicates keep the last record.
#[must_use]
pub fn normalize_margin(feed: Result<Vec<RawMarginRecord>, FeedError>) -> ChipTable {
    let Some(records) = accept_feed(ChipFeed::MarginShort, feed) else {
        return ChipTable::empty(ChipFeed::MarginShort);
    };

    let mut rows: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    let mut skipped = 0usize;
    for record in records {
        let Some(date) = record_date(&record.date) else {
            skipped += 1;
            continue;
        };
        rows.insert(
            date,
            vec![
                record.margin_purchase_today_balance,
                record.short_sale_today_balance,
            ],
        );
    }

    build_table(ChipFeed::MarginShort, rows, skipped)
}

/// Shareholding feed: per report date, sum bracket percentages into big-hands
/// and small-hands totals and derive `chip_spread = big - small`.
/// Levels outside `1..=max_bracket_level` (adjustment and total rows) are ignored.
#[must_use]
pub fn normalize_shareholding(
    feed: Result<Vec<RawShareholdingRecord>, FeedError>,
    brackets: &BracketConfig,
) -> ChipTable {
    let Some(records) = accept_feed(ChipFeed::Shareholding, feed) else {
        return ChipTable::empty(ChipFeed::Shareholding);
    };

    let mut sums: BTreeMap<NaiveDate, (f64, f64)> = BTreeMap::new();
    let mut skipped = 0usize;
    for record in records {
        if record.level == 0 || record.level > brackets.max_bracket_level {
            continue;
        }
        let Some(date) = record_date(&record.date) else {
            skipped += 1;
            continue;
        };
        if !record.percent.is_finite() {
            skipped += 1;
            continue;
        }
        let (big, small) = sums.entry(date).or_insert((0.0, 0.0));
        if brackets.is_big(record.level) {
            *big += record.percent;
        } else if brackets.is_small(record.level) {
            *small += record.percent;
        }
    }

    let rows = sums
        .into_iter()
        .map(|(date, (big, small))| (date, vec![big, small, big - small]))
        .collect();
    build_table(ChipFeed::Shareholding, rows, skipped)
}

fn accept_feed<T>(feed: ChipFeed, result: Result<Vec<T>, FeedError>) -> Option<Vec<T>> {
    match result {
        Ok(records) if records.is_empty() => {
            tracing::warn!("{feed} feed returned no records; columns stay neutral");
            None
        }
        Ok(records) => Some(records),
        Err(err) => {
            tracing::warn!("{feed} feed failed ({err}); columns stay neutral");
            None
        }
    }
}

fn record_date(raw: &str) -> Option<NaiveDate> {
    match parse_feed_date(raw) {
        Ok(date) => Some(date),
        Err(err) => {
            tracing::debug!("Skipping record: {err}");
            None
        }
    }
}

fn investor_slot(investor: InvestorType) -> usize {
    match investor {
        InvestorType::Foreign => 0,
        InvestorType::Trust => 1,
        InvestorType::Dealer => 2,
    }
}

fn build_table(feed: ChipFeed, rows: BTreeMap<NaiveDate, Vec<f64>>, skipped: usize) -> ChipTable {
    if skipped > 0 {
        tracing::warn!("{feed} feed: skipped {skipped} records with invalid date or value");
    }
    ChipTable::from_rows(feed, rows).unwrap_or_else(|err| {
        tracing::warn!("{feed} feed could not be tabulated: {err}");
        ChipTable::empty(feed)
    })
}
