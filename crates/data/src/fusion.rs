//! Series fusion: chip tables onto the price index.
//!
//! The price series drives the output index. Chip tables are overlaid in
//! fixed feed order, each only at dates it reports, then every column is
//! completed by its [`FillPolicy`]. A chip table that fails validation is
//! skipped and its columns keep their neutral defaults.

use std::collections::BTreeMap;

use chipfuse_types::{ChipColumn, ChipFeed, DailyBar, FillPolicy, FillPolicyTable};
use chrono::NaiveDate;

use crate::error::DataError;
use crate::table::{ChipFeeds, ChipTable};

/// Price bars plus one value per date for every chip column and `main_force_net`.
#[derive(Debug, Clone, PartialEq)]
pub struct FusedTable {
    bars: Vec<DailyBar>,
    chips: BTreeMap<ChipColumn, Vec<f64>>,
    main_force_net: Vec<f64>,
}

impl FusedTable {
    /// Table without rows.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            bars: Vec::new(),
            chips: ChipColumn::ALL.iter().map(|c| (*c, Vec::new())).collect(),
            main_force_net: Vec::new(),
        }
    }

    /// Base price bars (the index).
    #[must_use]
    pub fn bars(&self) -> &[DailyBar] {
        &self.bars
    }

    /// Date at a row.
    #[must_use]
    pub fn date(&self, idx: usize) -> Option<NaiveDate> {
        self.bars.get(idx).map(|b| b.date)
    }

    /// Values of a chip column; always as long as the index.
    #[must_use]
    pub fn chip(&self, column: ChipColumn) -> &[f64] {
        self.chips.get(&column).map_or(&[], Vec::as_slice)
    }

    /// `foreign_net + trust_net + dealer_net` per row.
    #[must_use]
    pub fn main_force_net(&self) -> &[f64] {
        &self.main_force_net
    }

    /// Close prices.
    #[must_use]
    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Volumes.
    #[must_use]
    pub fn volumes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.volume).collect()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }
}

/// How one feed took part in a fusion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedStatus {
    /// Overlaid; `covered` price dates received values.
    Applied {
        /// Number of price dates present in the feed's index
        covered: usize,
    },
    /// Rejected by validation; columns kept their defaults.
    Skipped {
        /// Validation failure
        reason: String,
    },
    /// No table supplied (or an empty one).
    Absent,
}

/// Per-feed outcome of a fusion run, in fusion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionReport {
    /// `(feed, status)` in the order feeds were processed
    pub feeds: Vec<(ChipFeed, FeedStatus)>,
}

impl FusionReport {
    /// Status of a feed.
    #[must_use]
    pub fn status(&self, feed: ChipFeed) -> Option<&FeedStatus> {
        self.feeds.iter().find(|(f, _)| *f == feed).map(|(_, s)| s)
    }
}

/// Fuses chip tables onto the price index.
///
/// `bars` must be strictly ascending by date (see [`crate::normalize_bars`]).
///
/// # Errors
/// - [`DataError::CorruptData`] when the price index is not strictly ascending.
pub fn fuse(
    bars: &[DailyBar],
    feeds: &ChipFeeds,
    policies: &FillPolicyTable,
) -> Result<FusedTable, DataError> {
    fuse_with_report(bars, feeds, policies).map(|(table, _)| table)
}

/// [`fuse`] that also returns how each feed was handled.
///
/// # Errors
/// - [`DataError::CorruptData`] when the price index is not strictly ascending.
pub fn fuse_with_report(
    bars: &[DailyBar],
    feeds: &ChipFeeds,
    policies: &FillPolicyTable,
) -> Result<(FusedTable, FusionReport), DataError> {
    let mut report = FusionReport { feeds: Vec::new() };

    if bars.is_empty() {
        report.feeds = ChipFeed::FUSION_ORDER
            .iter()
            .map(|f| (*f, FeedStatus::Absent))
            .collect();
        return Ok((FusedTable::empty(), report));
    }

    if let Some(pos) = bars.windows(2).position(|w| w[0].date >= w[1].date) {
        return Err(DataError::CorruptData(format!(
            "Price index not strictly ascending at {}",
            bars[pos + 1].date
        )));
    }

    let index: Vec<NaiveDate> = bars.iter().map(|b| b.date).collect();
    let mut observed: BTreeMap<ChipColumn, Vec<Option<f64>>> = ChipColumn::ALL
        .iter()
        .map(|c| (*c, vec![None; index.len()]))
        .collect();

    for feed in ChipFeed::FUSION_ORDER {
        let status = match feeds.get(feed) {
            None => FeedStatus::Absent,
            Some(table) if table.is_empty() => FeedStatus::Absent,
            Some(table) => match overlay(&index, feed, table, &mut observed) {
                Ok(covered) => FeedStatus::Applied { covered },
                Err(err) => {
                    tracing::warn!("Skipping {feed} feed: {err}");
                    FeedStatus::Skipped {
                        reason: err.to_string(),
                    }
                }
            },
        };
        tracing::debug!("Fusion {feed}: {status:?}");
        report.feeds.push((feed, status));
    }

    let mut chips: BTreeMap<ChipColumn, Vec<f64>> = observed
        .into_iter()
        .map(|(column, values)| (column, apply_policy(&values, policies.policy(column))))
        .collect();
    derive_spread(&mut chips);

    let main_force_net: Vec<f64> = (0..index.len())
        .map(|i| {
            [ChipColumn::ForeignNet, ChipColumn::TrustNet, ChipColumn::DealerNet]
                .iter()
                .map(|c| chips[c][i])
                .sum::<f64>()
        })
        .collect();

    Ok((
        FusedTable {
            bars: bars.to_vec(),
            chips,
            main_force_net,
        },
        report,
    ))
}

/// Completes an observed column according to its policy.
#[must_use]
pub fn apply_policy(observed: &[Option<f64>], policy: FillPolicy) -> Vec<f64> {
    match policy {
        FillPolicy::ZeroDefault => observed.iter().map(|v| v.unwrap_or(0.0)).collect(),
        FillPolicy::ForwardFill => {
            let mut last: Option<f64> = None;
            observed
                .iter()
                .map(|v| {
                    if v.is_some() {
                        last = *v;
                    }
                    last.unwrap_or(0.0)
                })
                .collect()
        }
    }
}

/// Writes a validated table's values at the price dates it covers.
/// Nothing is written when validation fails.
fn overlay(
    index: &[NaiveDate],
    feed: ChipFeed,
    table: &ChipTable,
    observed: &mut BTreeMap<ChipColumn, Vec<Option<f64>>>,
) -> Result<usize, DataError> {
    if table.feed() != feed {
        return Err(DataError::AlignmentFailure(format!(
            "{} table supplied in the {feed} slot",
            table.feed()
        )));
    }
    table.validate()?;

    let dates = table.dates();
    let mut covered = 0usize;
    let (mut i, mut j) = (0usize, 0usize);
    while i < index.len() && j < dates.len() {
        match index[i].cmp(&dates[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                for column in feed.columns() {
                    if *column == ChipColumn::ChipSpread {
                        continue;
                    }
                    let Some(values) = table.column(*column) else {
                        continue;
                    };
                    let value = values[j];
                    if value.is_finite()
                        && let Some(slot) = observed.get_mut(column)
                    {
                        slot[i] = Some(value);
                    }
                }
                covered += 1;
                i += 1;
                j += 1;
            }
        }
    }
    Ok(covered)
}

/// `chip_spread` is recomputed from the filled bracket columns so it holds row by row.
fn derive_spread(chips: &mut BTreeMap<ChipColumn, Vec<f64>>) {
    let spread: Vec<f64> = chips[&ChipColumn::BigHandsPct]
        .iter()
        .zip(&chips[&ChipColumn::SmallHandsPct])
        .map(|(big, small)| big - small)
        .collect();
    chips.insert(ChipColumn::ChipSpread, spread);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 7, day).unwrap()
    }

    fn bars(days: &[u32]) -> Vec<DailyBar> {
        days.iter()
            .map(|d| DailyBar::new(date(*d), 10.0, 11.0, 9.0, 10.5, 1_000.0))
            .collect()
    }

    fn table(feed: ChipFeed, rows: &[(u32, Vec<f64>)]) -> ChipTable {
        let rows = rows.iter().map(|(d, v)| (date(*d), v.clone())).collect();
        ChipTable::from_rows(feed, rows).unwrap()
    }

    #[test]
    fn test_apply_policy() {
        let observed = [None, Some(2.0), None, Some(5.0), None];
        assert_eq!(
            apply_policy(&observed, FillPolicy::ZeroDefault),
            vec![0.0, 2.0, 0.0, 5.0, 0.0]
        );
        assert_eq!(
            apply_policy(&observed, FillPolicy::ForwardFill),
            vec![0.0, 2.0, 2.0, 5.0, 5.0]
        );
    }

    #[test]
    fn test_empty_price_series_short_circuits() {
        let feeds = ChipFeeds::none().with(table(
            ChipFeed::Institutional,
            &[(1, vec![1.0, 2.0, 3.0])],
        ));
        let (fused, report) = fuse_with_report(&[], &feeds, &FillPolicyTable::default()).unwrap();
        assert!(fused.is_empty());
        assert!(report.feeds.iter().all(|(_, s)| *s == FeedStatus::Absent));
    }

    #[test]
    fn test_overlay_only_at_covered_dates() {
        let feeds = ChipFeeds::none().with(table(
            ChipFeed::Institutional,
            &[(2, vec![100.0, -10.0, 5.0]), (9, vec![1.0, 1.0, 1.0])],
        ));
        let (fused, report) =
            fuse_with_report(&bars(&[1, 2, 3]), &feeds, &FillPolicyTable::default()).unwrap();

        assert_eq!(fused.chip(ChipColumn::ForeignNet), &[0.0, 100.0, 0.0]);
        assert_eq!(fused.chip(ChipColumn::TrustNet), &[0.0, -10.0, 0.0]);
        assert_eq!(fused.main_force_net(), &[0.0, 95.0, 0.0]);
        assert_eq!(
            report.status(ChipFeed::Institutional),
            Some(&FeedStatus::Applied { covered: 1 })
        );
        assert_eq!(report.status(ChipFeed::MarginShort), Some(&FeedStatus::Absent));
    }

    #[test]
    fn test_shareholding_forward_filled_and_spread_derived() {
        let feeds = ChipFeeds::none().with(table(
            ChipFeed::Shareholding,
            &[(2, vec![60.0, 10.0, 50.0]), (5, vec![62.0, 9.0, 53.0])],
        ));
        let fused = fuse(&bars(&[1, 2, 3, 4, 5, 6]), &feeds, &FillPolicyTable::default()).unwrap();

        assert_eq!(
            fused.chip(ChipColumn::BigHandsPct),
            &[0.0, 60.0, 60.0, 60.0, 62.0, 62.0]
        );
        assert_eq!(
            fused.chip(ChipColumn::SmallHandsPct),
            &[0.0, 10.0, 10.0, 10.0, 9.0, 9.0]
        );
        for i in 0..fused.len() {
            assert_relative_eq!(
                fused.chip(ChipColumn::ChipSpread)[i],
                fused.chip(ChipColumn::BigHandsPct)[i] - fused.chip(ChipColumn::SmallHandsPct)[i]
            );
        }
    }

    #[test]
    fn test_spread_is_derived_even_if_table_disagrees() {
        let mut columns = BTreeMap::new();
        columns.insert(ChipColumn::BigHandsPct, vec![70.0]);
        columns.insert(ChipColumn::SmallHandsPct, vec![20.0]);
        columns.insert(ChipColumn::ChipSpread, vec![999.0]);
        let shareholding = ChipTable::from_parts(ChipFeed::Shareholding, vec![date(1)], columns);

        let fused = fuse(
            &bars(&[1]),
            &ChipFeeds::none().with(shareholding),
            &FillPolicyTable::default(),
        )
        .unwrap();
        assert_relative_eq!(fused.chip(ChipColumn::ChipSpread)[0], 50.0);
    }

    #[test]
    fn test_invalid_table_is_skipped_others_applied() {
        let broken_margin = ChipTable::from_parts(
            ChipFeed::MarginShort,
            vec![date(1), date(2)],
            BTreeMap::from([(ChipColumn::MarginBalance, vec![5.0])]),
        );
        let feeds = ChipFeeds::none()
            .with(table(ChipFeed::Institutional, &[(1, vec![1.0, 2.0, 3.0])]))
            .with(broken_margin);

        let (fused, report) =
            fuse_with_report(&bars(&[1, 2]), &feeds, &FillPolicyTable::default()).unwrap();

        assert!(matches!(
            report.status(ChipFeed::MarginShort),
            Some(FeedStatus::Skipped { .. })
        ));
        assert_eq!(fused.chip(ChipColumn::MarginBalance), &[0.0, 0.0]);
        assert_eq!(fused.main_force_net(), &[6.0, 0.0]);
    }

    #[test]
    fn test_table_in_wrong_slot_is_skipped() {
        let mut feeds = ChipFeeds::none();
        feeds.institutional = Some(table(ChipFeed::MarginShort, &[(1, vec![1.0, 2.0])]));
        let (fused, report) =
            fuse_with_report(&bars(&[1]), &feeds, &FillPolicyTable::default()).unwrap();
        assert!(matches!(
            report.status(ChipFeed::Institutional),
            Some(FeedStatus::Skipped { .. })
        ));
        assert_eq!(fused.chip(ChipColumn::MarginBalance), &[0.0]);
    }

    #[test]
    fn test_non_finite_chip_value_treated_as_missing() {
        let feeds = ChipFeeds::none().with(table(
            ChipFeed::Shareholding,
            &[(1, vec![55.0, 5.0, 50.0]), (2, vec![f64::NAN, 6.0, f64::NAN])],
        ));
        let fused = fuse(&bars(&[1, 2]), &feeds, &FillPolicyTable::default()).unwrap();
        assert_eq!(fused.chip(ChipColumn::BigHandsPct), &[55.0, 55.0]);
        assert_eq!(fused.chip(ChipColumn::SmallHandsPct), &[5.0, 6.0]);
        assert_eq!(fused.chip(ChipColumn::ChipSpread), &[50.0, 49.0]);
    }

    #[test]
    fn test_unsorted_price_index_rejected() {
        let err = fuse(&bars(&[2, 1]), &ChipFeeds::none(), &FillPolicyTable::default())
            .unwrap_err();
        assert!(matches!(err, DataError::CorruptData(_)));
    }

    #[test]
    fn test_custom_policy_applied_uniformly() {
        let feeds = ChipFeeds::none().with(table(ChipFeed::MarginShort, &[(1, vec![500.0, 20.0])]));
        let policies =
            FillPolicyTable::from_entries([(ChipColumn::MarginBalance, FillPolicy::ForwardFill)]);
        let fused = fuse(&bars(&[1, 2, 3]), &feeds, &policies).unwrap();
        assert_eq!(fused.chip(ChipColumn::MarginBalance), &[500.0, 500.0, 500.0]);
        assert_eq!(fused.chip(ChipColumn::ShortBalance), &[20.0, 0.0, 0.0]);
    }
}
