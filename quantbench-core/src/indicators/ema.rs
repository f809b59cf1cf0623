//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * close[t] + (1 - alpha) * EMA[t-1],
//! alpha = 2 / (span + 1). Seed: EMA[0] = close[0], so every bar has a
//! value from the first observation onward.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        ema_of_series(&closes, self.span)
    }
}

/// Compute the recursive EMA of an arbitrary f64 series.
///
/// Seeds at the first non-NaN value; leading NaNs stay NaN. A NaN after the
/// seed leaves that index NaN and carries the previous EMA forward, so one
/// bad input does not taint the rest of the series.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];
    if n == 0 || span == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);

    let Some(seed_idx) = values.iter().position(|v| !v.is_nan()) else {
        return result;
    };

    let mut prev = values[seed_idx];
    result[seed_idx] = prev;

    for i in (seed_idx + 1)..n {
        if values[i].is_nan() {
            continue;
        }
        prev = alpha * values[i] + (1.0 - alpha) * prev;
        result[i] = prev;
    }

    result
}
