//! Daily quote representation.

use chrono::NaiveDate;

/// Sentinel for "SMA not yet defined at this point".
///
/// A real close of 0.0 would be indistinguishable from the sentinel;
/// known limitation, callers must treat 0.0 as undefined.
pub const SMA_UNDEFINED: f64 = 0.0;

/// One trading-day observation. `sma` is written by the annotator and
/// carries [`SMA_UNDEFINED`] until enough history has accumulated.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub date: NaiveDate,
    pub close: f64,
    pub sma: f64,
}

impl Quote {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self {
            date,
            close,
            sma: SMA_UNDEFINED,
        }
    }

    /// Whether the annotator has written a meaningful SMA here.
    pub fn has_sma(&self) -> bool {
        self.sma != SMA_UNDEFINED
    }

    /// Midnight-UTC milliseconds for consumers that want a numeric axis.
    pub fn timestamp_millis(&self) -> i64 {
        self.date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
            .unwrap_or(0)
    }
}
