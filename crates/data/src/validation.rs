//! Price-bar validation helpers.

use chipfuse_types::DailyBar;

use crate::error::DataError;

/// Validates a single bar: finite values, positive prices, non-negative volume,
/// and a low/high range that contains open and close.
///
/// # Errors
/// - [`DataError::CorruptData`] describing the first violated rule.
pub fn validate_bar(bar: &DailyBar) -> Result<(), DataError> {
    validate_bar_values(bar)?;

    if bar.low > bar.open
        || bar.low > bar.close
        || bar.high < bar.open
        || bar.high < bar.close
        || bar.low > bar.high
    {
        return Err(DataError::CorruptData(format!(
            "Invalid OHLC at {}: low={}, high={}, open={}, close={}",
            bar.date, bar.low, bar.high, bar.open, bar.close
        )));
    }

    Ok(())
}

/// Checks the rules a bar cannot be repaired from: finite values, positive
/// prices and non-negative volume.
///
/// # Errors
/// - [`DataError::CorruptData`] describing the first violated rule.
pub fn validate_bar_values(bar: &DailyBar) -> Result<(), DataError> {
    if !bar.open.is_finite()
        || !bar.high.is_finite()
        || !bar.low.is_finite()
        || !bar.close.is_finite()
        || !bar.volume.is_finite()
    {
        return Err(DataError::CorruptData(format!(
            "NaN/Inf at {}: {bar:?}",
            bar.date
        )));
    }

    if bar.open <= 0.0 || bar.high <= 0.0 || bar.low <= 0.0 || bar.close <= 0.0 {
        return Err(DataError::CorruptData(format!(
            "Non-positive price at {}: open={}, high={}, low={}, close={}",
            bar.date, bar.open, bar.high, bar.low, bar.close
        )));
    }

    if bar.volume < 0.0 {
        return Err(DataError::CorruptData(format!(
            "Negative volume at {}: {}",
            bar.date, bar.volume
        )));
    }

    Ok(())
}

/// Widens high/low so the range contains open and close.
///
/// Adjusted provider prices are rounded independently, so close can sit a
/// tick above high. Returns the bar unchanged when it is already consistent.
#[must_use]
pub fn clamp_range(bar: &DailyBar) -> DailyBar {
    DailyBar {
        high: bar.high.max(bar.open).max(bar.close),
        low: bar.low.min(bar.open).min(bar.close),
        ..*bar
    }
}

/// Validates a bar series: every bar valid and dates strictly ascending.
///
/// # Errors
/// - [`DataError::EmptyData`] when `bars` is empty.
/// - [`DataError::CorruptData`] when a bar is invalid or dates are not strictly ascending.
pub fn validate_bars(bars: &[DailyBar]) -> Result<(), DataError> {
    if bars.is_empty() {
        return Err(DataError::EmptyData);
    }

    for (i, bar) in bars.iter().enumerate() {
        validate_bar(bar)?;
        if i > 0 && bar.date <= bars[i - 1].date {
            return Err(DataError::CorruptData(format!(
                "Non-monotonic date at index {i}: {} <= {}",
                bar.date,
                bars[i - 1].date
            )));
        }
    }

    Ok(())
}
