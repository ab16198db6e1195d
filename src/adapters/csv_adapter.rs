//! CSV file data adapter.
//!
//! Reads `<base>/<SYMBOL>.csv` with a header row. Only the `Date` and
//! `Close` columns are used; extra columns (Open, High, Low, Adj Close,
//! Volume) are ignored.

use crate::domain::error::SmacrossError;
use crate::domain::quote::Quote;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
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

    fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
        headers
            .iter()
            .position(|h| h.trim().eq_ignore_ascii_case(name))
    }
}

impl DataPort for CsvAdapter {
    fn fetch_quotes(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Quote>, SmacrossError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| SmacrossError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr
            .headers()
            .map_err(|e| SmacrossError::Data {
                reason: format!("CSV parse error: {}", e),
            })?
            .clone();

        let date_idx = Self::column_index(&headers, "date").ok_or_else(|| SmacrossError::Data {
            reason: format!("{}: no Date column", path.display()),
        })?;
        let close_idx =
            Self::column_index(&headers, "close").ok_or_else(|| SmacrossError::Data {
                reason: format!("{}: no Close column", path.display()),
            })?;

        let mut quotes = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| SmacrossError::Data {
                reason: format!("CSV parse error: {}", e),
            })?;

            let date_str = record.get(date_idx).ok_or_else(|| SmacrossError::Data {
                reason: "missing date column".into(),
            })?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                SmacrossError::Data {
                    reason: format!("invalid date {:?}: {}", date_str, e),
                }
            })?;

            if let Some(start) = start_date {
                if date < start {
                    continue;
                }
            }
            if let Some(end) = end_date {
                if date > end {
                    continue;
                }
            }

            let close: f64 = record
                .get(close_idx)
                .ok_or_else(|| SmacrossError::Data {
                    reason: "missing close column".into(),
                })?
                .parse()
                .map_err(|e| SmacrossError::Data {
                    reason: format!("invalid close value: {}", e),
                })?;

            quotes.push(Quote::new(date, close));
        }

        quotes.sort_by_key(|q| q.date);
        Ok(quotes)
    }

    fn list_symbols(&self) -> Result<Vec<String>, SmacrossError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| SmacrossError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.base_path.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();

        for entry in entries {
            let entry = entry.map_err(|e| SmacrossError::Data {
                reason: format!("directory entry error: {}", e),
            })?;

            let name = entry.file_name();
            let name_str = name.to_string_lossy();

            if let Some(symbol) = name_str.strip_suffix(".csv") {
                symbols.push(symbol.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SmacrossError> {
        let quotes = self.fetch_quotes(symbol, None, None)?;
        match (quotes.first(), quotes.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, quotes.len()))),
            _ => Ok(None),
        }
    }
}
