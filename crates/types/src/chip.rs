//! Chip (ownership-flow) columns, their owning feeds and fill policies.

use std::collections::BTreeMap;

use crate::error::CoreError;

/// The three independently-updated chip feeds, in fusion priority order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ChipFeed {
    /// Institutional investors net buy/sell
    Institutional,
    /// Margin purchase / short sale balances
    MarginShort,
    /// Shareholding distribution by holding bracket
    Shareholding,
}

impl ChipFeed {
    /// All feeds in the order fusion applies them.
    pub const FUSION_ORDER: [ChipFeed; 3] = [
        ChipFeed::Institutional,
        ChipFeed::MarginShort,
        ChipFeed::Shareholding,
    ];

    /// Columns written by this feed.
    #[must_use]
    pub fn columns(&self) -> &'static [ChipColumn] {
        match self {
            ChipFeed::Institutional => &[
                ChipColumn::ForeignNet,
                ChipColumn::TrustNet,
                ChipColumn::DealerNet,
            ],
            ChipFeed::MarginShort => &[ChipColumn::MarginBalance, ChipColumn::ShortBalance],
            ChipFeed::Shareholding => &[
                ChipColumn::BigHandsPct,
                ChipColumn::SmallHandsPct,
                ChipColumn::ChipSpread,
            ],
        }
    }

    /// Feed name used in logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChipFeed::Institutional => "institutional",
            ChipFeed::MarginShort => "margin_short",
            ChipFeed::Shareholding => "shareholding",
        }
    }
}

impl std::fmt::Display for ChipFeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chip column of the fused table.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ChipColumn {
    /// Foreign investors net (buy - sell)
    ForeignNet,
    /// Investment trust net
    TrustNet,
    /// Dealer (proprietary) net
    DealerNet,
    /// Outstanding margin purchase balance
    MarginBalance,
    /// Outstanding short sale balance
    ShortBalance,
    /// Percent held by the top holding brackets
    BigHandsPct,
    /// Percent held by the bottom holding brackets
    SmallHandsPct,
    /// `big_hands_pct - small_hands_pct`, derived
    ChipSpread,
}

impl ChipColumn {
    /// All chip columns in output order.
    pub const ALL: [ChipColumn; 8] = [
        ChipColumn::ForeignNet,
        ChipColumn::TrustNet,
        ChipColumn::DealerNet,
        ChipColumn::MarginBalance,
        ChipColumn::ShortBalance,
        ChipColumn::BigHandsPct,
        ChipColumn::SmallHandsPct,
        ChipColumn::ChipSpread,
    ];

    /// Feed that owns this column.
    #[must_use]
    pub fn feed(&self) -> ChipFeed {
        match self {
            ChipColumn::ForeignNet | ChipColumn::TrustNet | ChipColumn::DealerNet => {
                ChipFeed::Institutional
            }
            ChipColumn::MarginBalance | ChipColumn::ShortBalance => ChipFeed::MarginShort,
            ChipColumn::BigHandsPct | ChipColumn::SmallHandsPct | ChipColumn::ChipSpread => {
                ChipFeed::Shareholding
            }
        }
    }

    /// Output column name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ChipColumn::ForeignNet => "foreign_net",
            ChipColumn::TrustNet => "trust_net",
            ChipColumn::DealerNet => "dealer_net",
            ChipColumn::MarginBalance => "margin_balance",
            ChipColumn::ShortBalance => "short_balance",
            ChipColumn::BigHandsPct => "big_hands_pct",
            ChipColumn::SmallHandsPct => "small_hands_pct",
            ChipColumn::ChipSpread => "chip_spread",
        }
    }
}

/// How fusion fills dates a feed did not report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    /// Unreported date holds 0.0 ("no activity" is neutral).
    ZeroDefault,
    /// Unreported date carries the last reported value; 0.0 before the first report.
    ForwardFill,
}

/// Per-column fill policy table applied uniformly by the fusion engine.
/// Deserialised entries are merged over the defaults.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(
    from = "BTreeMap<ChipColumn, FillPolicy>",
    into = "BTreeMap<ChipColumn, FillPolicy>"
)]
pub struct FillPolicyTable(BTreeMap<ChipColumn, FillPolicy>);

impl From<BTreeMap<ChipColumn, FillPolicy>> for FillPolicyTable {
    fn from(entries: BTreeMap<ChipColumn, FillPolicy>) -> Self {
        Self::from_entries(entries)
    }
}

impl From<FillPolicyTable> for BTreeMap<ChipColumn, FillPolicy> {
    fn from(table: FillPolicyTable) -> Self {
        table.0
    }
}

impl FillPolicyTable {
    /// Builds a table from explicit entries; unlisted columns fall back to the defaults.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (ChipColumn, FillPolicy)>) -> Self {
        let mut table = Self::default();
        table.0.extend(entries);
        table
    }

    /// Policy for a column.
    #[must_use]
    pub fn policy(&self, column: ChipColumn) -> FillPolicy {
        self.0
            .get(&column)
            .copied()
            .unwrap_or(FillPolicy::ZeroDefault)
    }

    /// `chip_spread` is derived from the two bracket columns, so all three must
    /// share one policy for `chip_spread == big_hands_pct - small_hands_pct` to hold
    /// on every date.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] when the shareholding policies differ.
    pub fn validate(&self) -> Result<(), CoreError> {
        let spread = self.policy(ChipColumn::ChipSpread);
        let big = self.policy(ChipColumn::BigHandsPct);
        let small = self.policy(ChipColumn::SmallHandsPct);
        if spread != big || spread != small {
            return Err(CoreError::Config(format!(
                "fill_policies: chip_spread ({spread:?}) must match big_hands_pct ({big:?}) and small_hands_pct ({small:?})"
            )));
        }
        Ok(())
    }

    /// Iterates over `(column, policy)` in column order.
    pub fn iter(&self) -> impl Iterator<Item = (ChipColumn, FillPolicy)> + '_ {
        ChipColumn::ALL.iter().map(|c| (*c, self.policy(*c)))
    }
}

impl Default for FillPolicyTable {
    fn default() -> Self {
        let entries = ChipColumn::ALL.iter().map(|column| {
            let policy = match column.feed() {
                ChipFeed::Shareholding => FillPolicy::ForwardFill,
                ChipFeed::Institutional | ChipFeed::MarginShort => FillPolicy::ZeroDefault,
            };
            (*column, policy)
        });
        Self(entries.collect())
    }
}
