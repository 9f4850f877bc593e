//! Single-position portfolio state and the equity curve.

use chrono::NaiveDate;

use super::error::MacdvolError;
use super::position::{CompletedTrade, Position};

/// One point of the equity curve. The sequence is 1:1 with the bar series.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityPoint {
    pub bar_index: usize,
    pub cash: f64,
    pub holdings_value: f64,
    pub total_equity: f64,
}

/// Cash plus at most one open long position. No leverage, no shorting:
/// equity can never go negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Portfolio {
    pub cash: f64,
    pub initial_cash: f64,
    pub position: Option<Position>,
    pub trades: Vec<CompletedTrade>,
    pub equity_curve: Vec<EquityPoint>,
}

impl Portfolio {
    pub fn new(initial_cash: f64) -> Self {
        Portfolio {
            cash: initial_cash,
            initial_cash,
            position: None,
            trades: Vec::new(),
            equity_curve: Vec::new(),
        }
    }

    pub fn is_open(&self) -> bool {
        self.position.is_some()
    }

    /// Buy `shares` at `price`, deducting the cost from cash. Rejects a
    /// second entry while a position is already open.
    pub fn open_position(
        &mut self,
        shares: i64,
        price: f64,
        bar_index: usize,
        date: NaiveDate,
    ) -> Result<(), MacdvolError> {
        if self.position.is_some() {
            return Err(MacdvolError::MalformedSignals {
                reason: format!("entry at bar {bar_index} while a position is already open"),
            });
        }
        self.cash -= shares as f64 * price;
        self.position = Some(Position {
            shares,
            entry_price: price,
            entry_index: bar_index,
            entry_date: date,
        });
        Ok(())
    }

    /// Sell the whole position at `price`, crediting cash and recording the
    /// completed trade. Rejects an exit with no open position.
    pub fn close_position(
        &mut self,
        price: f64,
        bar_index: usize,
        date: NaiveDate,
    ) -> Result<CompletedTrade, MacdvolError> {
        let Some(position) = self.position.take() else {
            return Err(MacdvolError::MalformedSignals {
                reason: format!("exit at bar {bar_index} with no open position"),
            });
        };
        self.cash += position.shares as f64 * price;
        let trade = CompletedTrade {
            shares: position.shares,
            entry_price: position.entry_price,
            exit_price: price,
            entry_index: position.entry_index,
            exit_index: bar_index,
            entry_date: position.entry_date,
            exit_date: date,
        };
        self.trades.push(trade.clone());
        Ok(trade)
    }

    /// Mark to market at this bar's close and append an equity point.
    pub fn record_equity(&mut self, bar_index: usize, close: f64) {
        let holdings_value = self
            .position
            .as_ref()
            .map(|p| p.market_value(close))
            .unwrap_or(0.0);
        self.equity_curve.push(EquityPoint {
            bar_index,
            cash: self.cash,
            holdings_value,
            total_equity: self.cash + holdings_value,
        });
    }
}
