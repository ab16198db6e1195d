//! Report generation port trait.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::SmacrossError;
use crate::domain::sma::SmaParams;

/// Port for writing backtest reports.
pub trait ReportPort {
    fn write(
        &self,
        result: &BacktestResult,
        symbol: &str,
        params: &SmaParams,
        output_path: &str,
    ) -> Result<(), SmacrossError>;
}
