//! Normalized chip tables: one row per date, one column per owned chip column.

use std::collections::BTreeMap;

use chipfuse_types::{ChipColumn, ChipFeed};
use chrono::NaiveDate;

use crate::error::DataError;

/// Date-indexed table produced by the normalizer for a single chip feed.
#[derive(Debug, Clone, PartialEq)]
pub struct ChipTable {
    feed: ChipFeed,
    dates: Vec<NaiveDate>,
    columns: BTreeMap<ChipColumn, Vec<f64>>,
}

impl ChipTable {
    /// Creates an empty table for a feed (the recoverable "feed unavailable" shape).
    #[must_use]
    pub fn empty(feed: ChipFeed) -> Self {
        let columns = feed.columns().iter().map(|c| (*c, Vec::new())).collect();
        Self {
            feed,
            dates: Vec::new(),
            columns,
        }
    }

    /// Builds a table from per-date rows. Each row lists values in
    /// `feed.columns()` order; the map ordering guarantees a sorted, unique index.
    ///
    /// # Errors
    /// Returns [`DataError::CorruptData`] if a row has the wrong width.
    pub fn from_rows(
        feed: ChipFeed,
        rows: BTreeMap<NaiveDate, Vec<f64>>,
    ) -> Result<Self, DataError> {
        let owned = feed.columns();
        let mut table = Self::empty(feed);
        for (date, values) in rows {
            if values.len() != owned.len() {
                return Err(DataError::CorruptData(format!(
                    "{feed} row at {date} has {} values, expected {}",
                    values.len(),
                    owned.len()
                )));
            }
            table.dates.push(date);
            for (column, value) in owned.iter().zip(values) {
                table.columns.entry(*column).or_default().push(value);
            }
        }
        Ok(table)
    }

    /// Assembles a table from raw parts without checking them.
    /// [`ChipTable::validate`] is run by fusion before the table is applied.
    #[must_use]
    pub fn from_parts(
        feed: ChipFeed,
        dates: Vec<NaiveDate>,
        columns: BTreeMap<ChipColumn, Vec<f64>>,
    ) -> Self {
        Self {
            feed,
            dates,
            columns,
        }
    }

    /// Feed this table was normalized from.
    #[must_use]
    pub fn feed(&self) -> ChipFeed {
        self.feed
    }

    /// Date index.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Values of a column, if the table carries it.
    #[must_use]
    pub fn column(&self, column: ChipColumn) -> Option<&[f64]> {
        self.columns.get(&column).map(Vec::as_slice)
    }

    /// Value of a column at a date, if both exist.
    #[must_use]
    pub fn value(&self, column: ChipColumn, date: NaiveDate) -> Option<f64> {
        let idx = self.dates.binary_search(&date).ok()?;
        self.columns.get(&column).and_then(|v| v.get(idx).copied())
    }

    /// Number of dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns `true` if the table has no dates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Checks the table contract: strictly ascending dates, every column owned
    /// by the feed, and every column as long as the index.
    ///
    /// # Errors
    /// Returns [`DataError::AlignmentFailure`] describing the first violation.
    pub fn validate(&self) -> Result<(), DataError> {
        if let Some(pos) = self.dates.windows(2).position(|w| w[0] >= w[1]) {
            return Err(DataError::AlignmentFailure(format!(
                "{} index not strictly ascending at {}",
                self.feed,
                self.dates[pos + 1]
            )));
        }

        for (column, values) in &self.columns {
            if column.feed() != self.feed {
                return Err(DataError::AlignmentFailure(format!(
                    "{} table carries foreign column {}",
                    self.feed,
                    column.as_str()
                )));
            }
            if values.len() != self.dates.len() {
                return Err(DataError::AlignmentFailure(format!(
                    "{} column {} has {} values for {} dates",
                    self.feed,
                    column.as_str(),
                    values.len(),
                    self.dates.len()
                )));
            }
        }
        Ok(())
    }
}

/// The normalized chip tables available for one symbol. Any may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChipFeeds {
    /// Institutional net table
    pub institutional: Option<ChipTable>,
    /// Margin/short balance table
    pub margin_short: Option<ChipTable>,
    /// Shareholding distribution table
    pub shareholding: Option<ChipTable>,
}

impl ChipFeeds {
    /// No chip feeds at all.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Table for a feed, if supplied.
    #[must_use]
    pub fn get(&self, feed: ChipFeed) -> Option<&ChipTable> {
        match feed {
            ChipFeed::Institutional => self.institutional.as_ref(),
            ChipFeed::MarginShort => self.margin_short.as_ref(),
            ChipFeed::Shareholding => self.shareholding.as_ref(),
        }
    }

    /// Stores a table under its own feed slot.
    pub fn insert(&mut self, table: ChipTable) {
        let slot = match table.feed() {
            ChipFeed::Institutional => &mut self.institutional,
            ChipFeed::MarginShort => &mut self.margin_short,
            ChipFeed::Shareholding => &mut self.shareholding,
        };
        *slot = Some(table);
    }

    /// Builder-style [`ChipFeeds::insert`].
    #[must_use]
    pub fn with(mut self, table: ChipTable) -> Self {
        self.insert(table);
        self
    }
}
