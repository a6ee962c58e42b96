//! Ticker resolution.

/// Suffix appended to purely numeric (Taiwan-listed) tickers.
pub const TW_SUFFIX: &str = ".TW";

/// Resolves a user ticker: trimmed and upper-cased, with `.TW` appended when
/// it is purely numeric. `None` for a blank ticker.
#[must_use]
pub fn resolve_symbol(raw: &str) -> Option<String> {
    let ticker = raw.trim().to_uppercase();
    if ticker.is_empty() {
        return None;
    }
    if ticker.chars().all(|c| c.is_ascii_digit()) {
        return Some(format!("{ticker}{TW_SUFFIX}"));
    }
    Some(ticker)
}

/// Bare stock id used by chip-data providers (`2330.TW` -> `2330`).
#[must_use]
pub fn stock_id(symbol: &str) -> &str {
    symbol
        .strip_suffix(TW_SUFFIX)
        .or_else(|| symbol.strip_suffix(".TWO"))
        .unwrap_or(symbol)
}
