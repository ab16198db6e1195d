//! Core domain types and logic.

pub mod quote;
pub mod sma;
pub mod trade;
pub mod backtest;
pub mod summary;
pub mod error;
