//! Bollinger Bands — moving average +/- standard deviation multiplier.
//!
//! Three bands (separate Indicator instances):
//! - Middle: SMA(close, window)
//! - Upper: middle + mult * stddev(close, window)
//! - Lower: middle - mult * stddev(close, window)
//!
//! Uses population stddev (divide by N). Lookback: window - 1.

use crate::domain::Bar;
use crate::indicators::Indicator;

/// Which band of the Bollinger Bands to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BollingerBand {
    Upper,
    Middle,
    Lower,
}

#[derive(Debug, Clone)]
pub struct Bollinger {
    window: usize,
    multiplier: f64,
    band: BollingerBand,
    name: String,
}

impl Bollinger {
    pub fn upper(window: usize, multiplier: f64) -> Self {
        Self::with_band(window, multiplier, BollingerBand::Upper)
    }

    pub fn middle(window: usize, multiplier: f64) -> Self {
        Self::with_band(window, multiplier, BollingerBand::Middle)
    }

    pub fn lower(window: usize, multiplier: f64) -> Self {
        Self::with_band(window, multiplier, BollingerBand::Lower)
    }

    fn with_band(window: usize, multiplier: f64, band: BollingerBand) -> Self {
        assert!(window >= 1, "Bollinger window must be >= 1");
        let tag = match band {
            BollingerBand::Upper => "upper",
            BollingerBand::Middle => "middle",
            BollingerBand::Lower => "lower",
        };
        Self {
            window,
            multiplier,
            band,
            name: format!("bollinger_{tag}_{window}_{multiplier}"),
        }
    }
}

impl Indicator for Bollinger {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let n = bars.len();
        let mut result = vec![f64::NAN; n];

        if n < self.window {
            return result;
        }

        for i in (self.window - 1)..n {
            let window = &bars[i + 1 - self.window..=i];
            let mean =
                window.iter().map(|b| b.close).sum::<f64>() / self.window as f64;

            match self.band {
                BollingerBand::Middle => {
                    result[i] = mean;
                }
                BollingerBand::Upper | BollingerBand::Lower => {
                    // Population stddev
                    let variance = window
                        .iter()
                        .map(|b| (b.close - mean).powi(2))
                        .sum::<f64>()
                        / self.window as f64;
                    let offset = self.multiplier * variance.sqrt();
                    result[i] = match self.band {
                        BollingerBand::Upper => mean + offset,
                        _ => mean - offset,
                    };
                }
            }
        }

        result
    }
}
