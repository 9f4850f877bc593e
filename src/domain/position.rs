//! Position and completed-trade records.

use chrono::NaiveDate;

/// An open long position. The portfolio holds at most one at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    pub shares: i64,
    pub entry_price: f64,
    pub entry_index: usize,
    pub entry_date: NaiveDate,
}

impl Position {
    pub fn market_value(&self, price: f64) -> f64 {
        self.shares as f64 * price
    }

    pub fn unrealized_pnl(&self, price: f64) -> f64 {
        self.shares as f64 * (price - self.entry_price)
    }
}

/// A round trip: entry later closed by an exit. Positions still open at the
/// end of the window never become completed trades.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletedTrade {
    pub shares: i64,
    pub entry_price: f64,
    pub exit_price: f64,
    pub entry_index: usize,
    pub exit_index: usize,
    pub entry_date: NaiveDate,
    pub exit_date: NaiveDate,
}

impl CompletedTrade {
    /// exit/entry - 1
    pub fn return_pct(&self) -> f64 {
        self.exit_price / self.entry_price - 1.0
    }

    pub fn is_win(&self) -> bool {
        self.return_pct() > 0.0
    }

    pub fn holding_days(&self) -> i64 {
        (self.exit_date - self.entry_date).num_days()
    }
}
