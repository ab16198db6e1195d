//! Long-only crossover scan and pipeline entry point.
//!
//! The scan is a single forward pass over an annotated series carrying
//! one piece of state: the currently open position, if any. At each
//! point the sell check runs before the buy check, so a close and a
//! re-open are both possible within one step.

use crate::domain::quote::Quote;
use crate::domain::sma::{annotate_sma, SmaParams};
use crate::domain::summary::Summary;
use crate::domain::trade::{OpenPosition, Trade};

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    pub trades: Vec<Trade>,
    pub summary: Summary,
}

/// Scan an annotated series for price/SMA crossovers.
///
/// Callers pass only the SMA-defined region; undefined (sentinel) SMA
/// values in the input would compare like a real price level.
///
/// A position still open when the series ends is closed out against the
/// last point. A series that never fires a buy signal yields an empty
/// vector. Trades come out ordered by buy date with
/// `buy_date <= sell_date`.
pub fn scan_crossovers(quotes: &[Quote]) -> Vec<Trade> {
    let mut trades = Vec::new();
    let mut open: Option<OpenPosition> = None;

    for quote in quotes {
        if let Some(position) = open {
            if quote.sma > quote.close {
                trades.push(Trade::close_out(position, quote.date, quote.close, quote.sma));
                open = None;
            }
        }

        if open.is_none() && quote.close > quote.sma {
            open = Some(OpenPosition {
                date: quote.date,
                close: quote.close,
                sma: quote.sma,
            });
        }
    }

    // Still holding at the end: implicit close-out against the last point.
    if let (Some(position), Some(last)) = (open, quotes.last()) {
        trades.push(Trade::close_out(position, last.date, last.close, last.sma));
    }

    trades
}

/// Full pipeline: annotate in place, skip the warmup prefix, scan,
/// summarize. Re-invocation with new parameters recomputes everything
/// from scratch on the caller-owned buffer.
pub fn run_backtest(quotes: &mut [Quote], params: &SmaParams) -> BacktestResult {
    annotate_sma(quotes, params);

    let start = params.warmup().min(quotes.len());
    let trades = scan_crossovers(&quotes[start..]);
    let summary = Summary::compute(&trades);

    BacktestResult { trades, summary }
}
