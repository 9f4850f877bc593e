//! Portfolio simulator: replays signal events against cash/position state
//! and produces the per-bar equity curve.
//!
//! All-in / all-out sizing into whole shares, no fees or slippage, fills at
//! the signal bar's close. A position still open at the final bar is marked
//! to market but never force-closed, and does not count as a completed trade.

use super::error::MacdvolError;
use super::ohlcv::DailyBar;
use super::portfolio::{EquityPoint, Portfolio};
use super::position::{CompletedTrade, Position};
use super::signal::{SignalEvent, SignalKind};
use crate::ports::progress_port::ProgressPort;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationResult {
    pub equity_curve: Vec<EquityPoint>,
    pub trades: Vec<CompletedTrade>,
    /// Position left open at the final bar, if any.
    pub open_position: Option<Position>,
}

/// Reject structurally malformed sequences before touching any money: events
/// must alternate Enter/Exit starting with Enter, with strictly increasing
/// in-range bar indices. A malformed sequence is a defect in the signal
/// generator, not a condition to tolerate.
fn validate_signals(signals: &[SignalEvent], bar_count: usize) -> Result<(), MacdvolError> {
    for (i, event) in signals.iter().enumerate() {
        if event.bar_index >= bar_count {
            return Err(MacdvolError::MalformedSignals {
                reason: format!(
                    "event {} references bar {} of {}",
                    i, event.bar_index, bar_count
                ),
            });
        }
        if i > 0 && event.bar_index <= signals[i - 1].bar_index {
            return Err(MacdvolError::MalformedSignals {
                reason: format!("event indices not increasing at event {i}"),
            });
        }
        let expected = if i % 2 == 0 {
            SignalKind::Enter
        } else {
            SignalKind::Exit
        };
        if event.kind != expected {
            return Err(MacdvolError::MalformedSignals {
                reason: format!("expected {:?} at event {}, got {:?}", expected, i, event.kind),
            });
        }
    }
    Ok(())
}

pub fn simulate(
    bars: &[DailyBar],
    signals: &[SignalEvent],
    initial_cash: f64,
    progress: &dyn ProgressPort,
) -> Result<SimulationResult, MacdvolError> {
    validate_signals(signals, bars.len())?;

    let mut portfolio = Portfolio::new(initial_cash);
    let mut pending = signals.iter().peekable();
    // Set when an entry could not buy a single share; the matching exit is
    // then skipped instead of being treated as malformed.
    let mut entry_skipped = false;

    for (i, bar) in bars.iter().enumerate() {
        if let Some(event) = pending.peek()
            && event.bar_index == i
        {
            match event.kind {
                SignalKind::Enter => {
                    let shares = (portfolio.cash / bar.close).floor() as i64;
                    if shares >= 1 {
                        portfolio.open_position(shares, bar.close, i, bar.date)?;
                        progress.info(&format!(
                            "enter: {} shares at {:.2} on {}",
                            shares, bar.close, bar.date
                        ));
                    } else {
                        entry_skipped = true;
                        progress.warning(&format!(
                            "entry on {} skipped: cash {:.2} buys no whole share at {:.2}",
                            bar.date, portfolio.cash, bar.close
                        ));
                    }
                }
                SignalKind::Exit => {
                    if entry_skipped {
                        entry_skipped = false;
                        progress.warning(&format!(
                            "exit on {} skipped: matching entry was never filled",
                            bar.date
                        ));
                    } else {
                        let trade = portfolio.close_position(bar.close, i, bar.date)?;
                        progress.info(&format!(
                            "exit: {} shares at {:.2} on {} ({:+.2}%)",
                            trade.shares,
                            trade.exit_price,
                            bar.date,
                            trade.return_pct() * 100.0
                        ));
                    }
                }
            }
            pending.next();
        }

        portfolio.record_equity(i, bar.close);
    }

    if portfolio.is_open() {
        progress.warning("position still open at the final bar; marked to market, not counted as a trade");
    }

    Ok(SimulationResult {
        equity_curve: portfolio.equity_curve,
        trades: portfolio.trades,
        open_position: portfolio.position,
    })
}
