//! Daily OHLCV bar representation and series validation.

use chrono::NaiveDate;

use super::error::MacdvolError;

/// One trading day for a single instrument. Immutable once loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Check the invariants a bar series must hold before any pipeline stage
/// touches it: strictly increasing dates (no duplicates), finite positive
/// closes, non-negative volume.
pub fn validate_series(bars: &[DailyBar]) -> Result<(), MacdvolError> {
    for (i, bar) in bars.iter().enumerate() {
        if !bar.close.is_finite() || bar.close <= 0.0 {
            return Err(MacdvolError::MalformedSeries {
                reason: format!("non-positive close {} on {}", bar.close, bar.date),
            });
        }
        if !bar.volume.is_finite() || bar.volume < 0.0 {
            return Err(MacdvolError::MalformedSeries {
                reason: format!("negative volume {} on {}", bar.volume, bar.date),
            });
        }
        if i > 0 && bar.date <= bars[i - 1].date {
            return Err(MacdvolError::MalformedSeries {
                reason: format!(
                    "dates not strictly increasing: {} follows {}",
                    bar.date,
                    bars[i - 1].date
                ),
            });
        }
    }
    Ok(())
}
