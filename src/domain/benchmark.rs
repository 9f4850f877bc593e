//! Buy-and-hold benchmark curve.

use super::ohlcv::DailyBar;

/// Value of putting the whole starting cash into the instrument at the first
/// close and holding: initial_cash * close[i] / close[0]. Fractional shares
/// are allowed here on purpose; the benchmark is a reference line, not a
/// simulated portfolio.
pub fn buy_and_hold_curve(bars: &[DailyBar], initial_cash: f64) -> Vec<f64> {
    let Some(first) = bars.first() else {
        return Vec::new();
    };
    bars.iter()
        .map(|bar| initial_cash * bar.close / first.close)
        .collect()
}
