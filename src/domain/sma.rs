//! Simple moving average annotation.
//!
//! SMA(window, offset)[i] = mean of the `window` closes ending `offset`
//! points before i, i.e. closes[i-offset-window+1 ..= i-offset].
//! Warmup: the first (window + offset - 1) points stay at the sentinel.

use crate::domain::quote::{Quote, SMA_UNDEFINED};

/// Parameters for the annotator. `window` must be >= 1 for a meaningful
/// average; a zero window writes the sentinel everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmaParams {
    pub window: usize,
    pub offset: usize,
}

impl SmaParams {
    pub fn new(window: usize, offset: usize) -> Self {
        Self { window, offset }
    }

    /// Number of leading points without a defined SMA.
    pub fn warmup(&self) -> usize {
        (self.window + self.offset).saturating_sub(1)
    }
}

/// Annotate `quotes` in place. The caller owns the buffer; re-invoking
/// with different parameters overwrites every `sma` field, so the
/// operation is idempotent for a fixed input and parameter set.
///
/// NaN closes propagate into the affected windows; there is no failure
/// path.
pub fn annotate_sma(quotes: &mut [Quote], params: &SmaParams) {
    let warmup = params.warmup();

    for i in 0..quotes.len() {
        if params.window == 0 || i < warmup {
            quotes[i].sma = SMA_UNDEFINED;
            continue;
        }

        let end = i - params.offset;
        let start = end + 1 - params.window;
        let sum: f64 = quotes[start..=end].iter().map(|q| q.close).sum();
        quotes[i].sma = sum / params.window as f64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn make_quotes(closes: &[f64]) -> Vec<Quote> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                Quote::new(
                    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                        + chrono::Duration::days(i as i64),
                    close,
                )
            })
            .collect()
    }

    #[test]
    fn shorter_than_window_all_undefined() {
        let mut quotes = make_quotes(&[10.0, 11.0, 12.0]);
        annotate_sma(&mut quotes, &SmaParams::new(5, 0));
        assert!(quotes.iter().all(|q| !q.has_sma()));
    }

    #[test]
    fn first_defined_point_is_window_mean() {
        let mut quotes = make_quotes(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        annotate_sma(&mut quotes, &SmaParams::new(3, 0));

        assert!(!quotes[0].has_sma());
        assert!(!quotes[1].has_sma());
        assert!((quotes[2].sma - 20.0).abs() < 1e-9);
        assert!((quotes[3].sma - 30.0).abs() < 1e-9);
        assert!((quotes[4].sma - 40.0).abs() < 1e-9);
    }

    #[test]
    fn crossover_scenario_values() {
        let mut quotes = make_quotes(&[10.0, 10.0, 10.0, 10.0, 10.0, 20.0, 5.0]);
        annotate_sma(&mut quotes, &SmaParams::new(5, 0));

        assert!((quotes[4].sma - 10.0).abs() < 1e-9);
        assert!((quotes[5].sma - 12.0).abs() < 1e-9);
        assert!((quotes[6].sma - 11.0).abs() < 1e-9);
    }

    #[test]
    fn offset_shifts_the_window_back() {
        let mut quotes = make_quotes(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        annotate_sma(&mut quotes, &SmaParams::new(3, 1));

        // warmup = 3, first defined at index 3 over closes[0..=2]
        assert!(!quotes[2].has_sma());
        assert!((quotes[3].sma - 20.0).abs() < 1e-9);
        assert!((quotes[4].sma - 30.0).abs() < 1e-9);
    }

    #[test]
    fn reannotation_is_idempotent() {
        let mut quotes = make_quotes(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        annotate_sma(&mut quotes, &SmaParams::new(3, 0));
        let first = quotes.clone();
        annotate_sma(&mut quotes, &SmaParams::new(3, 0));
        assert_eq!(quotes, first);
    }

    #[test]
    fn smaller_window_overwrites_previous_annotation() {
        let mut quotes = make_quotes(&[10.0, 20.0, 30.0, 40.0, 50.0]);
        annotate_sma(&mut quotes, &SmaParams::new(2, 0));
        annotate_sma(&mut quotes, &SmaParams::new(4, 0));

        assert!(!quotes[2].has_sma());
        assert!((quotes[3].sma - 25.0).abs() < 1e-9);
    }

    #[test]
    fn zero_window_writes_sentinel_everywhere() {
        let mut quotes = make_quotes(&[10.0, 20.0, 30.0]);
        annotate_sma(&mut quotes, &SmaParams::new(0, 0));
        assert!(quotes.iter().all(|q| !q.has_sma()));
    }

    proptest! {
        #[test]
        fn warmup_prefix_is_always_undefined(
            closes in proptest::collection::vec(1.0f64..1000.0, 1..60),
            window in 1usize..20,
            offset in 0usize..5,
        ) {
            let mut quotes = make_quotes(&closes);
            let params = SmaParams::new(window, offset);
            annotate_sma(&mut quotes, &params);

            for (i, q) in quotes.iter().enumerate() {
                if i < params.warmup() {
                    prop_assert!(!q.has_sma());
                }
            }
        }

        #[test]
        fn defined_sma_matches_window_mean(
            closes in proptest::collection::vec(1.0f64..1000.0, 5..60),
            window in 1usize..10,
        ) {
            let mut quotes = make_quotes(&closes);
            annotate_sma(&mut quotes, &SmaParams::new(window, 0));

            for i in (window - 1)..closes.len() {
                let mean: f64 =
                    closes[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
                prop_assert!((quotes[i].sma - mean).abs() < 1e-9);
            }
        }
    }
}
