//! Trade records produced by the crossover scan.

use chrono::NaiveDate;
use std::fmt;

/// Win/loss classification of a completed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Win,
    Loss,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Win => write!(f, "win"),
            Verdict::Loss => write!(f, "loss"),
        }
    }
}

/// An open long position awaiting its closing sale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpenPosition {
    pub date: NaiveDate,
    pub close: f64,
    pub sma: f64,
}

/// A paired buy/sell event. Only the backtester creates these; they are
/// immutable after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub buy_date: NaiveDate,
    pub buy_close: f64,
    pub buy_sma: f64,
    pub sell_date: NaiveDate,
    pub sell_close: f64,
    pub sell_sma: f64,
    pub profit: f64,
    pub verdict: Verdict,
}

impl Trade {
    /// Pair an open buy with its closing point. Profit is the raw close
    /// difference; a zero-profit trade counts as a loss.
    pub fn close_out(buy: OpenPosition, sell_date: NaiveDate, sell_close: f64, sell_sma: f64) -> Self {
        let profit = sell_close - buy.close;
        let verdict = if profit > 0.0 {
            Verdict::Win
        } else {
            Verdict::Loss
        };
        Self {
            buy_date: buy.date,
            buy_close: buy.close,
            buy_sma: buy.sma,
            sell_date,
            sell_close,
            sell_sma,
            profit,
            verdict,
        }
    }
}
