//! Plain-text report adapter implementing ReportPort.
//!
//! Renders the trade table and the summary block the CLI also prints,
//! suitable for piping into version control or a spreadsheet import.

use crate::domain::backtest::BacktestResult;
use crate::domain::error::SmacrossError;
use crate::domain::sma::SmaParams;
use crate::ports::report_port::ReportPort;
use std::fmt::Write as _;
use std::fs;

pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn render(result: &BacktestResult, symbol: &str, params: &SmaParams) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "SMA crossover backtest: {} (window {}, offset {})",
            symbol, params.window, params.offset
        );
        let _ = writeln!(out);

        let _ = writeln!(
            out,
            "{:<12} {:>10} {:>10} {:<12} {:>10} {:>10} {:>10} {:>7}",
            "buy date", "buy close", "buy sma", "sell date", "sell close", "sell sma", "profit",
            "verdict"
        );
        for trade in &result.trades {
            let _ = writeln!(
                out,
                "{:<12} {:>10.2} {:>10.2} {:<12} {:>10.2} {:>10.2} {:>10.2} {:>7}",
                trade.buy_date.to_string(),
                trade.buy_close,
                trade.buy_sma,
                trade.sell_date.to_string(),
                trade.sell_close,
                trade.sell_sma,
                trade.profit,
                trade.verdict.to_string(),
            );
        }

        let s = &result.summary;
        let _ = writeln!(out);
        let _ = writeln!(out, "Trades:          {}", s.total);
        let _ = writeln!(out, "Wins:            {} ({:.2}%)", s.win_count, s.win_pct);
        let _ = writeln!(out, "Losses:          {} ({:.2}%)", s.loss_count, s.loss_pct);
        let _ = writeln!(out, "Total win:       {:.2}", s.total_win_amount);
        let _ = writeln!(out, "Total loss:      {:.2}", s.total_loss_amount);
        let _ = writeln!(out, "Avg win size:    {:.0}", s.avg_win_size);
        let _ = writeln!(out, "Avg loss size:   {:.0}", s.avg_loss_size);
        let _ = writeln!(out, "Net:             {:.2}", s.net);
        let _ = writeln!(out, "Win multiple:    {:.2}", s.win_multiple);
        let _ = writeln!(out, "Loss multiple:   {:.2}", s.loss_multiple);
        let _ = writeln!(out, "Expectancy:      {:.0}", s.expectancy);

        out
    }
}

impl ReportPort for TextReportAdapter {
    fn write(
        &self,
        result: &BacktestResult,
        symbol: &str,
        params: &SmaParams,
        output_path: &str,
    ) -> Result<(), SmacrossError> {
        fs::write(output_path, Self::render(result, symbol, params))?;
        Ok(())
    }
}
