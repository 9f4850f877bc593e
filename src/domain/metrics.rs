//! Performance metrics derived from the completed equity curve and trade
//! list. Pure functions of their inputs; no I/O, no state across calls.

use super::portfolio::EquityPoint;
use super::position::CompletedTrade;

const DAYS_PER_YEAR: f64 = 365.25;

/// Summary statistics for one backtest run.
///
/// `annualized_return` is `None` when no calendar time elapsed, and
/// `win_rate` is `None` when there are no completed trades — zero trades is
/// not zero wins out of a nonempty population.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceReport {
    pub total_return: f64,
    pub annualized_return: Option<f64>,
    pub trade_count: usize,
    pub win_rate: Option<f64>,
    pub max_drawdown: f64,
    pub final_equity: f64,
}

impl PerformanceReport {
    pub fn compute(
        equity_curve: &[EquityPoint],
        trades: &[CompletedTrade],
        initial_cash: f64,
        elapsed_days: i64,
    ) -> Self {
        let final_equity = equity_curve
            .last()
            .map(|p| p.total_equity)
            .unwrap_or(initial_cash);

        let total_return = if initial_cash > 0.0 {
            final_equity / initial_cash - 1.0
        } else {
            0.0
        };

        let annualized_return = if elapsed_days > 0 && total_return > -1.0 {
            Some((1.0 + total_return).powf(DAYS_PER_YEAR / elapsed_days as f64) - 1.0)
        } else {
            None
        };

        let trade_count = trades.len();
        let win_rate = if trade_count > 0 {
            let wins = trades.iter().filter(|t| t.is_win()).count();
            Some(wins as f64 / trade_count as f64)
        } else {
            None
        };

        PerformanceReport {
            total_return,
            annualized_return,
            trade_count,
            win_rate,
            max_drawdown: max_drawdown(equity_curve),
            final_equity,
        }
    }

    /// Flat metric-name → formatted-value rows for display.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total return", format!("{:.2}%", self.total_return * 100.0)),
            (
                "Annualized return",
                match self.annualized_return {
                    Some(r) => format!("{:.2}%", r * 100.0),
                    None => "n/a".to_string(),
                },
            ),
            ("Trades", self.trade_count.to_string()),
            (
                "Win rate",
                match self.win_rate {
                    Some(r) => format!("{:.1}%", r * 100.0),
                    None => "n/a (no completed trades)".to_string(),
                },
            ),
            ("Max drawdown", format!("{:.2}%", self.max_drawdown * 100.0)),
            ("Final equity", format!("{:.2}", self.final_equity)),
        ]
    }
}

/// Largest peak-to-trough decline as a positive fraction, via a running peak
/// in a single left-to-right pass.
fn max_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::NEG_INFINITY;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.total_equity > peak {
            peak = point.total_equity;
        } else if peak > 0.0 {
            let dd = (peak - point.total_equity) / peak;
            if dd > max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}
