//! Quote retrieval port trait.

use crate::domain::error::SmacrossError;
use crate::domain::quote::Quote;
use chrono::NaiveDate;

pub trait DataPort: std::fmt::Debug {
    /// Fetch the chronological quote series for `symbol`, restricted to
    /// `[start_date, end_date]` when bounds are given.
    fn fetch_quotes(
        &self,
        symbol: &str,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<Vec<Quote>, SmacrossError>;

    fn list_symbols(&self) -> Result<Vec<String>, SmacrossError>;

    fn get_data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, SmacrossError>;
}
