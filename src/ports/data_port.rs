//! Market-data access port trait.

use crate::domain::error::MacdvolError;
use crate::domain::ohlcv::DailyBar;
use chrono::NaiveDate;

pub trait DataPort {
    /// Fetch bars for one symbol over a closed date range, in date order.
    /// An empty result is a valid outcome ("no data for range"), not an
    /// error; callers decide how to signal it.
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyBar>, MacdvolError>;

    /// First date, last date, and bar count available for a symbol.
    fn data_range(&self, symbol: &str)
        -> Result<Option<(NaiveDate, NaiveDate, usize)>, MacdvolError>;
}
