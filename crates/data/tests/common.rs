#![allow(dead_code)]

use std::collections::BTreeMap;

use chipfuse_data::ChipTable;
use chipfuse_types::{ChipFeed, DailyBar};
use chrono::NaiveDate;

pub fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
}

pub fn make_bar(d: u32, close: f64, volume: f64) -> DailyBar {
    DailyBar::new(day(d), close, close + 1.0, close - 1.0, close, volume)
}

/// Consecutive daily bars D1..=Dn.
pub fn bars_through(n: u32) -> Vec<DailyBar> {
    (1..=n).map(|d| make_bar(d, 100.0 + f64::from(d), 1_000.0)).collect()
}

pub fn chip_table(feed: ChipFeed, rows: &[(u32, &[f64])]) -> ChipTable {
    let rows: BTreeMap<NaiveDate, Vec<f64>> =
        rows.iter().map(|(d, v)| (day(*d), v.to_vec())).collect();
    ChipTable::from_rows(feed, rows).unwrap()
}
