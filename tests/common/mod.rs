#![allow(dead_code)]

use chrono::NaiveDate;
use macdvol::domain::error::MacdvolError;
pub use macdvol::domain::ohlcv::DailyBar;
use macdvol::ports::data_port::DataPort;
use std::collections::HashMap;

pub fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn make_bar(day_offset: i64, close: f64, volume: f64) -> DailyBar {
    DailyBar {
        date: base_date() + chrono::Duration::days(day_offset),
        open: close,
        high: close,
        low: close,
        close,
        volume,
    }
}

/// Flat for `flat` bars, rising 1/day for `rise` bars, falling 1/day for
/// `fall` bars. `spike_at` gets 5x volume; everything else trades 1000.
pub fn hump_series(flat: usize, rise: usize, fall: usize, spike_at: usize) -> Vec<DailyBar> {
    let mut bars = Vec::new();
    let mut close = 100.0;
    for i in 0..(flat + rise + fall) {
        if i >= flat && i < flat + rise {
            close += 1.0;
        } else if i >= flat + rise {
            close -= 1.0;
        }
        let volume = if i == spike_at { 5000.0 } else { 1000.0 };
        bars.push(make_bar(i as i64, close, volume));
    }
    bars
}

pub struct MockDataPort {
    pub data: HashMap<String, Vec<DailyBar>>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, symbol: &str, bars: Vec<DailyBar>) -> Self {
        self.data.insert(symbol.to_string(), bars);
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyBar>, MacdvolError> {
        Ok(self
            .data
            .get(symbol)
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter(|b| b.date >= start_date && b.date <= end_date)
            .collect())
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MacdvolError> {
        let bars = self.data.get(symbol).cloned().unwrap_or_default();
        Ok(match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, bars.len())),
            _ => None,
        })
    }
}
