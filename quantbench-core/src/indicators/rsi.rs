//! Relative Strength Index (RSI).
//!
//! Simple rolling means of gains and losses over the trailing window
//! (not Wilder smoothing): RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Lookback: window (the first delta exists at index 1).
//! Edge case: avg_loss == 0 → RSI = 100, never a division by zero.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Rsi {
    window: usize,
    name: String,
}

impl Rsi {
    pub fn new(window: usize) -> Self {
        assert!(window >= 1, "RSI window must be >= 1");
        Self {
            window,
            name: format!("rsi_{window}"),
        }
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.window + 1 {
            return result;
        }

        // Positive / negative parts of the close-to-close deltas.
        let mut gains = vec![0.0; n];
        let mut losses = vec![0.0; n];
        for i in 1..n {
            let delta = bars[i].close - bars[i - 1].close;
            if delta > 0.0 {
                gains[i] = delta;
            } else {
                losses[i] = -delta;
            }
        }

        let mut gain_sum: f64 = gains[1..=self.window].iter().sum();
        let mut loss_sum: f64 = losses[1..=self.window].iter().sum();
        result[self.window] = rsi_value(gain_sum, loss_sum, self.window);

        for i in (self.window + 1)..n {
            gain_sum += gains[i] - gains[i - self.window];
            loss_sum += losses[i] - losses[i - self.window];
            result[i] = rsi_value(gain_sum, loss_sum, self.window);
        }

        result
    }
}

fn rsi_value(gain_sum: f64, loss_sum: f64, window: usize) -> f64 {
    let avg_gain = gain_sum / window as f64;
    let avg_loss = loss_sum / window as f64;
    if avg_loss == 0.0 {
        // Zero losses in the trailing window: maximally overbought.
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn rsi_warmup_is_nan() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 11.0, 13.0, 14.0]);
        let result = Rsi::new(3).compute(&bars);
        for i in 0..3 {
            assert!(result[i].is_nan(), "expected NaN at index {i}");
        }
        assert!(!result[3].is_nan());
    }

    #[test]
    fn rsi_zero_losses_is_100() {
        // Strictly rising closes: no losses anywhere in the window.
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
        let result = Rsi::new(3).compute(&bars);
        for &v in &result[3..] {
            assert_approx(v, 100.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rsi_zero_gains_is_0() {
        let bars = make_bars(&[15.0, 14.0, 13.0, 12.0, 11.0, 10.0]);
        let result = Rsi::new(3).compute(&bars);
        for &v in &result[3..] {
            assert_approx(v, 0.0, DEFAULT_EPSILON);
        }
    }

    #[test]
    fn rsi_flat_window_is_100() {
        // avg_loss == 0 dominates even when avg_gain is also 0.
        let bars = make_bars(&[10.0, 10.0, 10.0, 10.0, 10.0]);
        let result = Rsi::new(3).compute(&bars);
        assert_approx(result[4], 100.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_balanced_moves_is_50() {
        // Alternating +1/-1 deltas over an even window: avg_gain == avg_loss.
        let bars = make_bars(&[10.0, 11.0, 10.0, 11.0, 10.0, 11.0]);
        let result = Rsi::new(4).compute(&bars);
        assert_approx(result[4], 50.0, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_in_range() {
        let closes: Vec<f64> = (0..50)
            .map(|i| 100.0 + ((i * 7) % 13) as f64 - 6.0)
            .collect();
        let bars = make_bars(&closes);
        let result = Rsi::new(14).compute(&bars);
        for &v in result.iter().filter(|v| !v.is_nan()) {
            assert!((0.0..=100.0).contains(&v), "RSI out of range: {v}");
        }
    }
}
