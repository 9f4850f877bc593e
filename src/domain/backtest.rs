//! Pipeline entry point: bars in, outcome out.
//!
//! The whole run is a pure function of the bar series and an immutable
//! parameter struct. Stages run strictly left to right — indicators, signals,
//! simulation, metrics — each consuming the previous stage's output. The
//! caller may hand in a progress sink for human-readable status lines; the
//! core never blocks on it and holds no other state, so it is safe to invoke
//! from any worker context and to abandon mid-run.

use chrono::NaiveDate;

use super::benchmark::buy_and_hold_curve;
use super::error::MacdvolError;
use super::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW};
use super::indicator::IndicatorFrame;
use super::metrics::PerformanceReport;
use super::ohlcv::{validate_series, DailyBar};
use super::portfolio::EquityPoint;
use super::position::{CompletedTrade, Position};
use super::signal::{generate_signals, SignalEvent};
use super::simulator::simulate;
use crate::ports::progress_port::ProgressPort;

pub const DEFAULT_INITIAL_CASH: f64 = 100_000.0;
pub const DEFAULT_VOLUME_WINDOW: usize = 20;
pub const DEFAULT_VOLUME_FACTOR: f64 = 1.2;

/// Immutable run configuration. Validated up front; no process-wide state.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestParams {
    pub symbol: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub initial_cash: f64,
    pub fast: usize,
    pub slow: usize,
    pub signal: usize,
    pub volume_window: usize,
    pub volume_factor: f64,
}

impl BacktestParams {
    pub fn new(symbol: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        BacktestParams {
            symbol: symbol.into(),
            start_date,
            end_date,
            initial_cash: DEFAULT_INITIAL_CASH,
            fast: DEFAULT_FAST,
            slow: DEFAULT_SLOW,
            signal: DEFAULT_SIGNAL,
            volume_window: DEFAULT_VOLUME_WINDOW,
            volume_factor: DEFAULT_VOLUME_FACTOR,
        }
    }

    /// Reject invalid parameter combinations before any computation starts.
    pub fn validate(&self) -> Result<(), MacdvolError> {
        fn invalid(key: &str, reason: &str) -> MacdvolError {
            MacdvolError::ConfigInvalid {
                section: "backtest".to_string(),
                key: key.to_string(),
                reason: reason.to_string(),
            }
        }

        if self.symbol.trim().is_empty() {
            return Err(invalid("symbol", "symbol must not be empty"));
        }
        if self.start_date >= self.end_date {
            return Err(invalid("start_date", "start_date must be before end_date"));
        }
        if self.initial_cash <= 0.0 {
            return Err(invalid("initial_cash", "initial_cash must be positive"));
        }
        if self.fast == 0 || self.slow == 0 || self.signal == 0 {
            return Err(invalid("fast_period", "MACD periods must be positive"));
        }
        if self.fast >= self.slow {
            return Err(invalid(
                "fast_period",
                "fast_period must be less than slow_period",
            ));
        }
        if self.volume_window == 0 {
            return Err(invalid("volume_window", "volume_window must be positive"));
        }
        if self.volume_factor <= 0.0 {
            return Err(invalid("volume_factor", "volume_factor must be positive"));
        }
        Ok(())
    }
}

/// Everything the presentation layer needs: indicator series for charting,
/// strategy-vs-benchmark equity, the trade tape, and the summary report.
#[derive(Debug, Clone, PartialEq)]
pub struct BacktestOutcome {
    pub frame: IndicatorFrame,
    pub signals: Vec<SignalEvent>,
    pub equity_curve: Vec<EquityPoint>,
    pub benchmark: Vec<f64>,
    pub trades: Vec<CompletedTrade>,
    /// Position still open at the final bar; marked to market in the equity
    /// curve but excluded from trade_count and win_rate.
    pub open_position_at_end: Option<Position>,
    pub report: PerformanceReport,
}

pub fn run_backtest(
    bars: &[DailyBar],
    params: &BacktestParams,
    progress: &dyn ProgressPort,
) -> Result<BacktestOutcome, MacdvolError> {
    params.validate()?;

    if bars.is_empty() {
        return Err(MacdvolError::NoData {
            symbol: params.symbol.clone(),
        });
    }
    validate_series(bars)?;

    progress.info(&format!(
        "computing indicators over {} bars of {}",
        bars.len(),
        params.symbol
    ));
    let frame = IndicatorFrame::compute(
        bars,
        params.fast,
        params.slow,
        params.signal,
        params.volume_window,
    )?;

    let signals = generate_signals(bars, &frame, params.volume_factor);
    progress.info(&format!("{} signal(s) generated", signals.len()));

    progress.info("running portfolio simulation");
    let sim = simulate(bars, &signals, params.initial_cash, progress)?;

    let benchmark = buy_and_hold_curve(bars, params.initial_cash);

    let elapsed_days = (bars[bars.len() - 1].date - bars[0].date).num_days();
    let report = PerformanceReport::compute(
        &sim.equity_curve,
        &sim.trades,
        params.initial_cash,
        elapsed_days,
    );
    progress.info("backtest complete");

    Ok(BacktestOutcome {
        frame,
        signals,
        equity_curve: sim.equity_curve,
        benchmark,
        trades: sim.trades,
        open_position_at_end: sim.open_position,
        report,
    })
}
