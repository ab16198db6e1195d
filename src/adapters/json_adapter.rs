//! JSON file data adapter.
//!
//! Reads `<base>/<SYMBOL>.json`: an array of `{"date": "YYYY-MM-DD",
//! "close": <number>}` records.

use crate::domain::error::SmacrossError;
use crate::domain::quote::Quote;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct QuoteRow {
    date: String,
    close: f64,
}

#[derive(Debug)]
pub struct JsonAdapter {
    base_path: PathBuf,
}

impl JsonAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn json_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", symbol))
    }
}

impl DataPort for JsonAdapter {
    fn fetch_quotes(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Quote>, SmacrossError> {
        let path = self.json_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| SmacrossError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let rows: Vec<QuoteRow> =
            serde_json::from_str(&content).map_err(|e| SmacrossError::Data {
                reason: format!("JSON parse error in {}: {}", path.display(), e),
            })?;

        let mut quotes = Vec::with_capacity(rows.len());

        for row in rows {
            let date = NaiveDate::parse_from_str(&row.date, "%Y-%m-%d").map_err(|e| {
                SmacrossError::Data {
                    reason: format!("invalid date {:?}: {}", row.date, e),
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

            quotes.push(Quote::new(date, row.close));
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

            if let Some(symbol) = name_str.strip_suffix(".json") {
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

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        let json_content = r#"[
            {"date": "2024-01-16", "close": 110.0},
            {"date": "2024-01-15", "close": 105.0},
            {"date": "2024-01-17", "close": 115.0}
        ]"#;

        fs::write(path.join("NIFTY.json"), json_content).unwrap();
        (dir, path)
    }

    #[test]
    fn fetch_quotes_parses_and_sorts() {
        let (_dir, path) = setup_test_data();
        let adapter = JsonAdapter::new(path);

        let quotes = adapter.fetch_quotes("NIFTY", None, None).unwrap();

        assert_eq!(quotes.len(), 3);
        assert_eq!(
            quotes[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
        );
        assert_eq!(quotes[0].close, 105.0);
        assert_eq!(
            quotes[2].date,
            NaiveDate::from_ymd_opt(2024, 1, 17).unwrap()
        );
    }

    #[test]
    fn fetch_quotes_filters_by_date() {
        let (_dir, path) = setup_test_data();
        let adapter = JsonAdapter::new(path);

        let end = NaiveDate::from_ymd_opt(2024, 1, 16).unwrap();
        let quotes = adapter.fetch_quotes("NIFTY", None, Some(end)).unwrap();

        assert_eq!(quotes.len(), 2);
    }

    #[test]
    fn fetch_quotes_errors_on_malformed_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("BAD.json"), "{not json").unwrap();
        let adapter = JsonAdapter::new(dir.path().to_path_buf());

        assert!(adapter.fetch_quotes("BAD", None, None).is_err());
    }

    #[test]
    fn fetch_quotes_errors_on_bad_date() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("BAD.json"),
            r#"[{"date": "15/01/2024", "close": 1.0}]"#,
        )
        .unwrap();
        let adapter = JsonAdapter::new(dir.path().to_path_buf());

        assert!(adapter.fetch_quotes("BAD", None, None).is_err());
    }
}
