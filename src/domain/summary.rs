//! Aggregate win/loss statistics over a trade sequence.

use crate::domain::trade::{Trade, Verdict};

/// Derived from the full trade sequence on every call; there is no
/// incremental update. Loss amounts are reported as positive
/// magnitudes. Every ratio with a zero divisor comes out as 0.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub win_count: usize,
    pub loss_count: usize,
    pub win_pct: f64,
    pub loss_pct: f64,
    pub total_win_amount: f64,
    pub total_loss_amount: f64,
    pub avg_win_size: f64,
    pub avg_loss_size: f64,
    pub net: f64,
    pub win_multiple: f64,
    pub loss_multiple: f64,
    pub expectancy: f64,
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl Summary {
    pub fn compute(trades: &[Trade]) -> Self {
        let mut win_count = 0usize;
        let mut loss_count = 0usize;
        let mut total_win_amount = 0.0_f64;
        let mut total_loss_amount = 0.0_f64;

        for trade in trades {
            match trade.verdict {
                Verdict::Win => {
                    win_count += 1;
                    total_win_amount += trade.profit;
                }
                Verdict::Loss => {
                    loss_count += 1;
                    total_loss_amount += -trade.profit;
                }
            }
        }

        let total = trades.len();

        let win_pct = if total > 0 {
            round2(win_count as f64 / total as f64 * 100.0)
        } else {
            0.0
        };
        let loss_pct = if total > 0 {
            round2(loss_count as f64 / total as f64 * 100.0)
        } else {
            0.0
        };

        let avg_win_size = if win_count > 0 {
            (total_win_amount / win_count as f64).round()
        } else {
            0.0
        };
        let avg_loss_size = if loss_count > 0 {
            (total_loss_amount / loss_count as f64).round()
        } else {
            0.0
        };

        let net = total_win_amount - total_loss_amount;

        let win_multiple = if avg_loss_size > 0.0 {
            round2(avg_win_size / avg_loss_size)
        } else {
            0.0
        };
        let loss_multiple = if win_count > 0 {
            round2(loss_count as f64 / win_count as f64)
        } else {
            0.0
        };

        let expectancy = if total > 0 {
            (total_win_amount / total as f64).round()
        } else {
            0.0
        };

        Summary {
            total,
            win_count,
            loss_count,
            win_pct,
            loss_pct,
            total_win_amount,
            total_loss_amount,
            avg_win_size,
            avg_loss_size,
            net,
            win_multiple,
            loss_multiple,
            expectancy,
        }
    }
}
