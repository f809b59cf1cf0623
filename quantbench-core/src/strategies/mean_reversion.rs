//! Mean-reversion z-score strategy.
//!
//! z = (close - rolling mean) / rolling sample std over `window` bars.
//! Long when z < -threshold (price stretched below its mean), Short when
//! z > +threshold. NaN z (warmup, zero-variance window) is Flat.

use crate::domain::{Bar, Signal};
use crate::indicators::{rolling_mean, rolling_std};
use crate::strategies::Strategy;

#[derive(Debug, Clone)]
pub struct MeanReversion {
    window: usize,
    z_threshold: f64,
    name: String,
}

impl MeanReversion {
    pub fn new(window: usize, z_threshold: f64) -> Self {
        assert!(window >= 2, "window must be >= 2");
        assert!(z_threshold > 0.0, "z_threshold must be > 0");
        Self {
            window,
            z_threshold,
            name: format!("mean_reversion_{window}_{z_threshold}"),
        }
    }
}

impl Strategy for MeanReversion {
    fn name(&self) -> &str {
        &self.name
    }

    fn generate_signals(&self, bars: &[Bar]) -> Vec<Signal> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let mean = rolling_mean(&closes, self.window);
        let std = rolling_std(&closes, self.window);

        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| {
                if mean[i].is_nan() || std[i].is_nan() || std[i] == 0.0 {
                    return Signal::Flat;
                }
                let z = (close - mean[i]) / std[i];
                if z < -self.z_threshold {
                    Signal::Long
                } else if z > self.z_threshold {
                    Signal::Short
                } else {
                    Signal::Flat
                }
            })
            .collect()
    }
}
