//! Technical indicators for the MACD + volume strategy.
//!
//! Every series element is `Option<f64>`: `None` means "not yet available"
//! during indicator warmup. Downstream stages must treat `None` as absence,
//! never as zero.

pub mod ema;
pub mod macd;
pub mod volume;

use self::macd::macd;
use self::volume::volume_sma;
use super::error::MacdvolError;
use super::ohlcv::DailyBar;

/// Per-bar indicator values aligned 1:1 with the source bar series.
/// Derived once per backtest run, read-only thereafter.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorFrame {
    pub dif: Vec<Option<f64>>,
    pub dea: Vec<Option<f64>>,
    pub hist: Vec<Option<f64>>,
    pub volume_ma: Vec<Option<f64>>,
}

impl IndicatorFrame {
    /// Compute the full frame for a bar series.
    ///
    /// Fails with [`MacdvolError::InsufficientData`] when the series is too
    /// short to ever produce a defined DEA (fewer than slow + signal bars),
    /// rather than handing back an all-warmup frame for a full-size request.
    pub fn compute(
        bars: &[DailyBar],
        fast: usize,
        slow: usize,
        signal: usize,
        volume_window: usize,
    ) -> Result<Self, MacdvolError> {
        let minimum = slow + signal;
        if bars.len() < minimum {
            return Err(MacdvolError::InsufficientData {
                bars: bars.len(),
                minimum,
            });
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();

        let macd_series = macd(&closes, fast, slow, signal);
        let volume_ma = volume_sma(&volumes, volume_window);

        Ok(IndicatorFrame {
            dif: macd_series.dif,
            dea: macd_series.dea,
            hist: macd_series.hist,
            volume_ma,
        })
    }

    pub fn len(&self) -> usize {
        self.dif.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dif.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(count: usize) -> Vec<DailyBar> {
        (0..count)
            .map(|i| DailyBar {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Duration::days(i as i64),
                open: 100.0,
                high: 101.0,
                low: 99.0,
                close: 100.0 + (i as f64 * 0.3).sin(),
                volume: 1000.0 + i as f64,
            })
            .collect()
    }

    #[test]
    fn frame_aligned_with_bars() {
        let bars = make_bars(60);
        let frame = IndicatorFrame::compute(&bars, 12, 26, 9, 20).unwrap();
        assert_eq!(frame.len(), 60);
        assert_eq!(frame.dea.len(), 60);
        assert_eq!(frame.hist.len(), 60);
        assert_eq!(frame.volume_ma.len(), 60);
    }

    #[test]
    fn insufficient_history_rejected() {
        let bars = make_bars(34);
        let err = IndicatorFrame::compute(&bars, 12, 26, 9, 20).unwrap_err();
        match err {
            MacdvolError::InsufficientData { bars, minimum } => {
                assert_eq!(bars, 34);
                assert_eq!(minimum, 35);
            }
            other => panic!("expected InsufficientData, got {other:?}"),
        }
    }

    #[test]
    fn exact_minimum_accepted() {
        let bars = make_bars(35);
        let frame = IndicatorFrame::compute(&bars, 12, 26, 9, 20).unwrap();
        // The single fully-defined bar sits at slow + signal - 2.
        assert!(frame.dea[33].is_some());
        assert!(frame.dea[32].is_none());
    }

    #[test]
    fn volume_ma_warmup() {
        let bars = make_bars(40);
        let frame = IndicatorFrame::compute(&bars, 12, 26, 9, 20).unwrap();
        assert!(frame.volume_ma[18].is_none());
        assert!(frame.volume_ma[19].is_some());
    }

    #[test]
    fn empty_bars_rejected() {
        let err = IndicatorFrame::compute(&[], 12, 26, 9, 20).unwrap_err();
        assert!(matches!(err, MacdvolError::InsufficientData { .. }));
    }
}
