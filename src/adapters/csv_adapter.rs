//! CSV file data adapter.
//!
//! Reads `{symbol}.csv` files from a base directory with the columns
//! date,open,high,low,close,volume (header row expected, extra columns
//! ignored). The loaded series is validated before it leaves the adapter.

use crate::domain::error::MacdvolError;
use crate::domain::ohlcv::{validate_series, DailyBar};
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::path::PathBuf;

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn read_all(&self, symbol: &str) -> Result<Vec<DailyBar>, MacdvolError> {
        let path = self.csv_path(symbol);
        let mut reader = csv::Reader::from_path(&path).map_err(|e| {
            MacdvolError::MalformedSeries {
                reason: format!("failed to open {}: {}", path.display(), e),
            }
        })?;

        let mut bars = Vec::new();
        for (line, result) in reader.records().enumerate() {
            let record = result.map_err(|e| MacdvolError::MalformedSeries {
                reason: format!("CSV parse error: {}", e),
            })?;

            let row = line + 2;
            let date_str = field(&record, 0, "date", row)?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                MacdvolError::MalformedSeries {
                    reason: format!("row {}: invalid date: {}", row, e),
                }
            })?;

            bars.push(DailyBar {
                date,
                open: number(&record, 1, "open", row)?,
                high: number(&record, 2, "high", row)?,
                low: number(&record, 3, "low", row)?,
                close: number(&record, 4, "close", row)?,
                volume: number(&record, 5, "volume", row)?,
            });
        }

        validate_series(&bars)?;
        Ok(bars)
    }
}

fn field<'r>(
    record: &'r csv::StringRecord,
    idx: usize,
    name: &str,
    row: usize,
) -> Result<&'r str, MacdvolError> {
    record.get(idx).ok_or_else(|| MacdvolError::MalformedSeries {
        reason: format!("row {}: missing {} column", row, name),
    })
}

fn number(
    record: &csv::StringRecord,
    idx: usize,
    name: &str,
    row: usize,
) -> Result<f64, MacdvolError> {
    field(record, idx, name, row)?
        .parse()
        .map_err(|e| MacdvolError::MalformedSeries {
            reason: format!("row {}: invalid {} value: {}", row, name, e),
        })
}

impl DataPort for CsvAdapter {
    fn fetch_bars(
        &self,
        symbol: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Vec<DailyBar>, MacdvolError> {
        let bars = self.read_all(symbol)?;
        Ok(bars
            .into_iter()
            .filter(|bar| bar.date >= start_date && bar.date <= end_date)
            .collect())
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, MacdvolError> {
        let bars = self.read_all(symbol)?;
        match (bars.first(), bars.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, bars.len()))),
            _ => Ok(None),
        }
    }
}
