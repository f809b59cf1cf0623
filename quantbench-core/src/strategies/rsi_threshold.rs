//! RSI threshold strategy.
//!
//! Long when RSI drops below the oversold threshold, Short when it rises
//! above the overbought threshold, Flat in between (and during warmup).

use crate::domain::{Bar, Signal};
use crate::indicators::{Indicator, Rsi};
use crate::strategies::Strategy;

#[derive(Debug, Clone)]
pub struct RsiThreshold {
    window: usize,
    oversold: f64,
    overbought: f64,
    name: String,
}

impl RsiThreshold {
    pub fn new(window: usize, oversold: f64, overbought: f64) -> Self {
        assert!(
            oversold < overbought,
            "oversold threshold must be < overbought threshold"
        );
        Self {
            window,
            oversold,
            overbought,
            name: format!("rsi_{window}_{oversold}_{overbought}"),
        }
    }
}

impl Strategy for RsiThreshold {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate_signals(&self, bars: &[Bar]) -> Vec<Signal> {
        Rsi::new(self.window)
            .compute(bars)
            .iter()
            .map(|&rsi| {
                if rsi.is_nan() {
                    Signal::Flat
                } else if rsi < self.oversold {
                    Signal::Long
                } else if rsi > self.overbought {
                    Signal::Short
                } else {
                    Signal::Flat
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_bars;

    #[test]
    fn long_at_bottom_short_at_recovery() {
        // Five tradable bars after a steady fall, then a sharp recovery:
        // RSI(3) is 0 at the bottom (all losses) and 100 once the trailing
        // window holds only gains.
        let bars = make_bars(&[100.0, 96.0, 92.0, 88.0, 92.0, 96.0, 100.0, 104.0]);
        let signals = RsiThreshold::new(3, 30.0, 70.0).generate_signals(&bars);

        // Warmup
        for &s in &signals[..3] {
            assert_eq!(s, Signal::Flat);
        }
        // Local bottom: trailing window all losses, RSI 0 < 30.
        assert_eq!(signals[3], Signal::Long);
        // Recovery complete: trailing window all gains, RSI 100 > 70.
        assert_eq!(signals[6], Signal::Short);
        assert_eq!(signals[7], Signal::Short);
    }

    #[test]
    fn neutral_rsi_is_flat() {
        // Alternating moves keep RSI near 50.
        let bars = make_bars(&[100.0, 101.0, 100.0, 101.0, 100.0, 101.0, 100.0]);
        let signals = RsiThreshold::new(4, 30.0, 70.0).generate_signals(&bars);
        for &s in &signals[4..] {
            assert_eq!(s, Signal::Flat);
        }
    }

    #[test]
    fn output_length_matches_input() {
        let bars = make_bars(&[100.0, 101.0]);
        let signals = RsiThreshold::new(14, 30.0, 70.0).generate_signals(&bars);
        assert_eq!(signals.len(), 2);
        assert!(signals.iter().all(|s| s.is_flat()));
    }
}
