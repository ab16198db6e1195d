#![allow(dead_code)]

use chrono::NaiveDate;
use smacross::domain::error::SmacrossError;
pub use smacross::domain::quote::Quote;
use smacross::ports::data_port::DataPort;
use std::collections::HashMap;

#[derive(Debug)]
pub struct MockDataPort {
    pub data: HashMap<String, Vec<Quote>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_quotes(mut self, symbol: &str, quotes: Vec<Quote>) -> Self {
        self.data.insert(symbol.to_string(), quotes);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_quotes(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Quote>, SmacrossError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(SmacrossError::Data {
                reason: reason.clone(),
            });
        }
        let quotes = self.data.get(symbol).cloned().unwrap_or_default();
        Ok(quotes
            .into_iter()
            .filter(|q| start_date.is_none_or(|s| q.date >= s))
            .filter(|q| end_date.is_none_or(|e| q.date <= e))
            .collect())
    }

    fn list_symbols(&self) -> Result<Vec<String>, SmacrossError> {
        let mut symbols: Vec<String> = self.data.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SmacrossError> {
        let quotes = self.fetch_quotes(symbol, None, None)?;
        Ok(match (quotes.first(), quotes.last()) {
            (Some(first), Some(last)) => Some((first.date, last.date, quotes.len())),
            _ => None,
        })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_quote(day: &str, close: f64) -> Quote {
    Quote::new(NaiveDate::parse_from_str(day, "%Y-%m-%d").unwrap(), close)
}

/// One quote per calendar day starting at `start`.
pub fn quotes_from_closes(start: &str, closes: &[f64]) -> Vec<Quote> {
    let start = NaiveDate::parse_from_str(start, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Quote::new(start + chrono::Duration::days(i as i64), close))
        .collect()
}
