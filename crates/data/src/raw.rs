//! Raw chip-feed records as delivered by the data-source collaborators.
//!
//! Field names follow the provider payloads, so a JSON response body can be
//! deserialized straight into these types.

use serde::Deserialize;

/// One institutional-investor buy/sell record for a (date, investor type).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawInstitutionalRecord {
    /// Provider date string
    pub date: String,
    /// Investor type label (e.g. `Foreign_Investor`)
    pub name: String,
    /// Shares bought
    pub buy: f64,
    /// Shares sold
    pub sell: f64,
}

/// One day of margin purchase / short sale balances.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawMarginRecord {
    /// Provider date string
    pub date: String,
    /// Outstanding margin purchase balance at day end
    #[serde(rename = "MarginPurchaseTodayBalance")]
    pub margin_purchase_today_balance: f64,
    /// Outstanding short sale balance at day end
    #[serde(rename = "ShortSaleTodayBalance")]
    pub short_sale_today_balance: f64,
}

/// One holding-bracket row of a shareholding-distribution report.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawShareholdingRecord {
    /// Provider date string
    pub date: String,
    /// Bracket number, 1 = smallest holdings
    #[serde(rename = "HoldingSharesLevel")]
    pub level: u32,
    /// Percent of outstanding shares held by this bracket
    pub percent: f64,
}

/// Institutional investor categories tracked by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InvestorType {
    /// Foreign institutional investors
    Foreign,
    /// Domestic investment trusts
    Trust,
    /// Dealers trading for their own account
    Dealer,
}

impl InvestorType {
    /// Maps a provider label to a tracked investor type.
    /// Other categories (dealer hedging, foreign dealers, totals) are not tracked.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim() {
            "Foreign_Investor" => Some(InvestorType::Foreign),
            "Investment_Trust" => Some(InvestorType::Trust),
            "Dealer_self" => Some(InvestorType::Dealer),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_investor_labels() {
        assert_eq!(
            InvestorType::from_label("Foreign_Investor"),
            Some(InvestorType::Foreign)
        );
        assert_eq!(
            InvestorType::from_label("Investment_Trust"),
            Some(InvestorType::Trust)
        );
        assert_eq!(InvestorType::from_label("Dealer_self"), Some(InvestorType::Dealer));
        assert_eq!(InvestorType::from_label("Dealer_Hedging"), None);
        assert_eq!(InvestorType::from_label("Foreign_Dealer_Self"), None);
    }

    #[test]
    fn test_margin_record_provider_field_names() {
        let json = r#"{
            "date": "2024-05-02",
            "stock_id": "2330",
            "MarginPurchaseTodayBalance": 21500.0,
            "ShortSaleTodayBalance": 310.0
        }"#;
        let record: RawMarginRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.margin_purchase_today_balance, 21500.0);
        assert_eq!(record.short_sale_today_balance, 310.0);
    }

    #[test]
    fn test_shareholding_record_provider_field_names() {
        let json = r#"{"date": "2024-05-03", "HoldingSharesLevel": 15, "percent": 71.2}"#;
        let record: RawShareholdingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.level, 15);
        assert_eq!(record.percent, 71.2);
    }
}
