//! Moving-average cross strategy.
//!
//! Long while the short SMA is strictly above the long SMA, Short while
//! strictly below, Flat otherwise (ties and NaN warmup included). This is a
//! level comparison per bar, not an edge-triggered cross detector.

use crate::domain::{Bar, Signal};
use crate::indicators::{Indicator, Sma};
use crate::strategies::Strategy;

#[derive(Debug, Clone)]
pub struct MaCross {
    short_window: usize,
    long_window: usize,
    name: String,
}

impl MaCross {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        assert!(short_window >= 1, "short_window must be >= 1");
        assert!(
            short_window < long_window,
            "short_window must be < long_window"
        );
        Self {
            short_window,
            long_window,
            name: format!("ma_cross_{short_window}_{long_window}"),
        }
    }
}

impl Strategy for MaCross {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate_signals(&self, bars: &[Bar]) -> Vec<Signal> {
        let short = Sma::new(self.short_window).compute(bars);
        let long = Sma::new(self.long_window).compute(bars);

        short
            .iter()
            .zip(&long)
            .map(|(&s, &l)| {
                if s.is_nan() || l.is_nan() {
                    Signal::Flat
                } else if s > l {
                    Signal::Long
                } else if s < l {
                    Signal::Short
                } else {
                    Signal::Flat
                }
            })
            .collect()
    }
}
