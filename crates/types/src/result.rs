use chrono::NaiveDate;

/// One row of the final, indicator-enriched table.
/// Field order is the output column contract.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnifiedRow {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
    pub foreign_net: f64,
    pub trust_net: f64,
    pub dealer_net: f64,
    pub margin_balance: f64,
    pub short_balance: f64,
    pub big_hands_pct: f64,
    pub small_hands_pct: f64,
    pub chip_spread: f64,
    pub main_force_net: f64,
    pub ma5: f64,
    pub ma10: f64,
    pub ma20: f64,
    pub ma60: f64,
    pub bb_up: f64,
    pub bb_lo: f64,
    pub atr: f64,
    pub atr_stop: f64,
    pub macd: f64,
    pub signal: f64,
    pub hist: f64,
    pub k: f64,
    pub d: f64,
    pub concentration_5: f64,
    pub concentration_20: f64,
    pub efi_13: f64,
    pub vol_ma5: f64,
}

/// Output column names in contract order.
pub const UNIFIED_COLUMNS: [&str; 32] = [
    "date",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "foreign_net",
    "trust_net",
    "dealer_net",
    "margin_balance",
    "short_balance",
    "big_hands_pct",
    "small_hands_pct",
    "chip_spread",
    "main_force_net",
    "ma5",
    "ma10",
    "ma20",
    "ma60",
    "bb_up",
    "bb_lo",
    "atr",
    "atr_stop",
    "macd",
    "signal",
    "hist",
    "k",
    "d",
    "concentration_5",
    "concentration_20",
    "efi_13",
    "vol_ma5",
];

/// Final per-symbol table handed to presentation adapters.
/// Rows are sorted ascending by date; the table is read-only after construction.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct UnifiedTable {
    symbol: String,
    rows: Vec<UnifiedRow>,
}

impl UnifiedTable {
    /// Wraps finalized rows for a symbol.
    #[must_use]
    pub fn new(symbol: impl Into<String>, rows: Vec<UnifiedRow>) -> Self {
        Self {
            symbol: symbol.into(),
            rows,
        }
    }

    /// Symbol the table was built for.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    /// All rows, ascending by date.
    #[must_use]
    pub fn rows(&self) -> &[UnifiedRow] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a date, if present.
    #[must_use]
    pub fn row(&self, date: NaiveDate) -> Option<&UnifiedRow> {
        self.rows
            .binary_search_by_key(&date, |r| r.date)
            .ok()
            .map(|idx| &self.rows[idx])
    }

    /// Last `n` rows (the plotting window of a chart adapter).
    #[must_use]
    pub fn tail(&self, n: usize) -> &[UnifiedRow] {
        &self.rows[self.rows.len().saturating_sub(n)..]
    }
}

/// Outcome of one symbol within a batch.
#[derive(Debug, Clone, serde::Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SymbolOutcome {
    /// Pipeline produced a table.
    Ok {
        /// Resolved symbol
        symbol: String,
        /// Final table
        table: UnifiedTable,
    },
    /// Price feed was empty or unavailable.
    NoData {
        /// Resolved symbol
        symbol: String,
    },
    /// Pipeline failed for this symbol only.
    Failed {
        /// Resolved symbol
        symbol: String,
        /// Error category
        category: String,
        /// Error message
        message: String,
    },
}

impl SymbolOutcome {
    /// Resolved symbol of this outcome.
    #[must_use]
    pub fn symbol(&self) -> &str {
        match self {
            SymbolOutcome::Ok { symbol, .. }
            | SymbolOutcome::NoData { symbol }
            | SymbolOutcome::Failed { symbol, .. } => symbol,
        }
    }

    /// The table, when the symbol succeeded.
    #[must_use]
    pub fn table(&self) -> Option<&UnifiedTable> {
        match self {
            SymbolOutcome::Ok { table, .. } => Some(table),
            SymbolOutcome::NoData { .. } | SymbolOutcome::Failed { .. } => None,
        }
    }

    /// Returns `true` for a successful outcome.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        matches!(self, SymbolOutcome::Ok { .. })
    }
}

/// Result of a sequential batch run.
#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct BatchReport {
    /// Per-symbol outcomes in input order
    pub outcomes: Vec<SymbolOutcome>,
}

impl BatchReport {
    /// Number of symbols that produced a table.
    #[must_use]
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_ok()).count()
    }

    /// Successful tables in input order.
    pub fn tables(&self) -> impl Iterator<Item = &UnifiedTable> {
        self.outcomes.iter().filter_map(SymbolOutcome::table)
    }
}
