//! High-level pipeline runner helpers.

use chipfuse_data::{
    ChipFeeds, FeedStatus, fuse_with_report, normalize_bars, normalize_institutional,
    normalize_margin, normalize_shareholding, resample_bars_weekly, resample_feeds_weekly,
};
use chipfuse_indicators::compute_indicators;
use chipfuse_types::{BatchReport, Interval, PipelineConfig, SymbolOutcome, UnifiedTable};

use crate::error::PipelineError;
use crate::sources::{ChipSource, Sources};
use crate::symbol::{resolve_symbol, stock_id};

/// Runs the full pipeline for one ticker.
///
/// Chip-feed failures are absorbed (their columns stay neutral); a missing
/// or empty price series is [`PipelineError::NoData`].
///
/// # Errors
/// - [`PipelineError::ConfigValidation`] for a blank ticker or invalid stage settings.
/// - [`PipelineError::NoData`] when the price feed fails or nothing survives cleaning.
/// - [`PipelineError::Data`] / [`PipelineError::Indicator`] from fusion or indicators.
pub fn run_symbol(
    ticker: &str,
    sources: &Sources<'_>,
    config: &PipelineConfig,
) -> Result<UnifiedTable, PipelineError> {
    let symbol = resolve_symbol(ticker)
        .ok_or_else(|| PipelineError::ConfigValidation("ticker is empty".to_string()))?;
    validate_stage_config(config)?;

    tracing::info!(
        "Running {symbol}: period={}, interval={}",
        config.period.as_str(),
        config.interval.as_str()
    );

    let raw_bars = match sources.price.daily_bars(&symbol, config.period) {
        Ok(bars) => bars,
        Err(err) => {
            tracing::warn!("{symbol}: price feed failed ({err})");
            return Err(PipelineError::NoData { symbol });
        }
    };
    let mut bars = normalize_bars(raw_bars);
    if bars.is_empty() {
        tracing::warn!("{symbol}: no usable price bars");
        return Err(PipelineError::NoData { symbol });
    }

    let mut feeds = match sources.chips {
        Some(chips) => collect_chip_feeds(&symbol, chips, config),
        None => ChipFeeds::none(),
    };

    if config.interval == Interval::Weekly {
        bars = resample_bars_weekly(&bars);
        feeds = resample_feeds_weekly(&feeds, &bars);
    }

    let (fused, report) = fuse_with_report(&bars, &feeds, &config.fill_policies)?;
    let skipped = report
        .feeds
        .iter()
        .filter(|(_, status)| matches!(status, FeedStatus::Skipped { .. }))
        .count();
    let indicators = compute_indicators(&fused, &config.indicators)?;
    let table = indicators.finalize(&symbol);

    tracing::info!(
        "Finished {symbol}: {} rows, {skipped} chip feeds skipped",
        table.len()
    );
    Ok(table)
}

/// Runs every ticker in order. A failing ticker never stops the batch.
#[must_use]
pub fn run_batch<S: AsRef<str>>(
    tickers: &[S],
    sources: &Sources<'_>,
    config: &PipelineConfig,
) -> BatchReport {
    let mut report = BatchReport::default();

    for ticker in tickers {
        let ticker = ticker.as_ref();
        let Some(symbol) = resolve_symbol(ticker) else {
            tracing::debug!("Skipping blank ticker");
            continue;
        };

        let outcome = match run_symbol(ticker, sources, config) {
            Ok(table) => SymbolOutcome::Ok { symbol, table },
            Err(err) => {
                if !matches!(err, PipelineError::NoData { .. }) {
                    tracing::warn!("{symbol} failed [{}]: {err}", err.error_category());
                }
                err.into_outcome(symbol)
            }
        };
        report.outcomes.push(outcome);
    }

    tracing::info!(
        "Batch finished: {}/{} symbols produced a table",
        report.success_count(),
        report.outcomes.len()
    );
    report
}

/// Main entry point: receives config JSON, returns the batch report as JSON.
///
/// # Errors
/// - [`PipelineError::ConfigParse`] when JSON parsing fails.
/// - [`PipelineError::ConfigValidation`] for invalid configuration values.
/// - [`PipelineError::ResultSerialize`] when the report cannot be encoded.
pub fn run_batch_from_json(
    config_json: &str,
    sources: &Sources<'_>,
) -> Result<String, PipelineError> {
    let config: PipelineConfig = serde_json::from_str(config_json)
        .map_err(|e| PipelineError::ConfigParse(e.to_string()))?;

    config.validate()?;

    let report = run_batch(&config.symbols, sources, &config);

    serde_json::to_string(&report).map_err(|e| PipelineError::ResultSerialize(e.to_string()))
}

fn validate_stage_config(config: &PipelineConfig) -> Result<(), PipelineError> {
    config.brackets.validate()?;
    config.indicators.validate()?;
    config.fill_policies.validate()?;
    Ok(())
}

fn collect_chip_feeds(symbol: &str, chips: &dyn ChipSource, config: &PipelineConfig) -> ChipFeeds {
    let id = stock_id(symbol);
    ChipFeeds::none()
        .with(normalize_institutional(chips.institutional(id, config.period)))
        .with(normalize_margin(chips.margin_short(id, config.period)))
        .with(normalize_shareholding(
            chips.shareholding(id, config.period),
            &config.brackets,
        ))
}
