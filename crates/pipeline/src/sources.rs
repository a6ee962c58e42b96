//! External data collaborators.
//!
//! Implementations do the fetching; the pipeline only sees their results.
//! [`PriceSource`] receives the resolved symbol (e.g. `2330.TW`);
//! [`ChipSource`] receives the bare stock id (e.g. `2330`).

use chipfuse_data::{FeedError, RawInstitutionalRecord, RawMarginRecord, RawShareholdingRecord};
use chipfuse_types::{DailyBar, LookbackPeriod};

/// Supplier of daily OHLCV bars.
pub trait PriceSource {
    /// Daily bars covering `period`, in any order.
    ///
    /// # Errors
    /// Returns [`FeedError`] when the provider cannot deliver.
    fn daily_bars(&self, symbol: &str, period: LookbackPeriod)
    -> Result<Vec<DailyBar>, FeedError>;
}

/// Supplier of the three chip feeds, keyed by stock id. Each feed may fail
/// independently.
pub trait ChipSource {
    /// Institutional investors buy/sell records.
    ///
    /// # Errors
    /// Returns [`FeedError`] when the provider cannot deliver.
    fn institutional(
        &self,
        stock_id: &str,
        period: LookbackPeriod,
    ) -> Result<Vec<RawInstitutionalRecord>, FeedError>;

    /// Margin purchase / short sale balances.
    ///
    /// # Errors
    /// Returns [`FeedError`] when the provider cannot deliver.
    fn margin_short(
        &self,
        stock_id: &str,
        period: LookbackPeriod,
    ) -> Result<Vec<RawMarginRecord>, FeedError>;

    /// Shareholding distribution rows.
    ///
    /// # Errors
    /// Returns [`FeedError`] when the provider cannot deliver.
    fn shareholding(
        &self,
        stock_id: &str,
        period: LookbackPeriod,
    ) -> Result<Vec<RawShareholdingRecord>, FeedError>;
}

/// Collaborators for a run. Without a chip source every chip column stays neutral.
#[derive(Clone, Copy)]
pub struct Sources<'a> {
    /// Price collaborator
    pub price: &'a dyn PriceSource,
    /// Optional chip collaborator
    pub chips: Option<&'a dyn ChipSource>,
}

impl<'a> Sources<'a> {
    /// Price-only sources.
    #[must_use]
    pub fn price_only(price: &'a dyn PriceSource) -> Self {
        Self { price, chips: None }
    }

    /// Price and chip sources.
    #[must_use]
    pub fn with_chips(price: &'a dyn PriceSource, chips: &'a dyn ChipSource) -> Self {
        Self {
            price,
            chips: Some(chips),
        }
    }
}
