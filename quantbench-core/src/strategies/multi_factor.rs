//! Multi-factor composite strategy.
//!
//! Six weighted sub-scores (trend, momentum, volatility, volume, structure,
//! candlestick body), each thresholded against indicator conditions. The
//! weighted sum is compared against +/-0.3 to emit Long/Short/Flat.
//!
//! NaN policy: every condition below is an ordered comparison, and ordered
//! comparisons against NaN are false, so a factor whose indicator is still
//! in warmup (or degenerate, e.g. zero-range candle) contributes exactly
//! zero to the composite. This fill-with-zero behavior is load-bearing:
//! summing raw NaN factor values would wipe out the whole score.

use serde::{Deserialize, Serialize};

use crate::domain::{Bar, Signal};
use crate::indicators::{
    rolling_max, rolling_mean, rolling_min, rolling_std, Indicator, Macd, Rsi, Sma,
};
use crate::strategies::Strategy;

/// Relative weight of each factor in the composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FactorWeights {
    pub trend: f64,
    pub momentum: f64,
    pub volatility: f64,
    pub volume: f64,
    pub structure: f64,
    pub candlestick: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            trend: 0.20,
            momentum: 0.35,
            volatility: 0.20,
            volume: 0.15,
            structure: 0.05,
            candlestick: 0.05,
        }
    }
}

/// Composite score magnitude required to emit a directional signal.
const SCORE_THRESHOLD: f64 = 0.3;

#[derive(Debug, Clone)]
pub struct MultiFactor {
    weights: FactorWeights,
}

impl MultiFactor {
    pub fn new(weights: FactorWeights) -> Self {
        Self { weights }
    }
}

impl Default for MultiFactor {
    fn default() -> Self {
        Self::new(FactorWeights::default())
    }
}

impl Strategy for MultiFactor {
    fn name(&self) -> &str {
        "multi_factor"
    }

    fn generate_signals(&self, bars: &[Bar]) -> Vec<Signal> {
        let n = bars.len();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        // Trend: MA ladder
        let ma5 = Sma::new(5).compute(bars);
        let ma10 = Sma::new(10).compute(bars);
        let ma20 = Sma::new(20).compute(bars);

        // Momentum: fast MACD + short RSI
        let macd_line = Macd::line(6, 13, 4).compute(bars);
        let macd_signal = Macd::signal_line(6, 13, 4).compute(bars);
        let rsi = Rsi::new(7).compute(bars);

        // Volatility: position inside 10-bar bands (sample std, k = 2)
        let mid = rolling_mean(&closes, 10);
        let sd = rolling_std(&closes, 10);

        // Volume: ratio to its own 20-bar mean
        let volumes: Vec<f64> = bars.iter().map(|b| b.volume).collect();
        let vol_ma = rolling_mean(&volumes, 20);

        // Structure: 20-bar extremes, current bar included
        let highs: Vec<f64> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<f64> = bars.iter().map(|b| b.low).collect();
        let resistance = rolling_max(&highs, 20);
        let support = rolling_min(&lows, 20);

        let mut signals = Vec::with_capacity(n);
        for i in 0..n {
            let bar = &bars[i];

            let mut trend = 0.0;
            if ma5[i] > ma10[i] && ma10[i] > ma20[i] {
                trend = 2.0;
            } else if ma5[i] < ma10[i] && ma10[i] < ma20[i] {
                trend = -2.0;
            }

            let mut momentum = 0.0;
            if macd_line[i] > macd_signal[i] {
                momentum += 1.0;
            }
            if rsi[i] < 30.0 {
                momentum += 1.0;
            }
            if rsi[i] > 70.0 {
                momentum -= 1.0;
            }

            let mut volatility = 0.0;
            let upper = mid[i] + 2.0 * sd[i];
            let lower = mid[i] - 2.0 * sd[i];
            let boll_pos = (bar.close - lower) / (upper - lower);
            if boll_pos < 0.3 {
                volatility += 1.0;
            }
            if boll_pos > 0.7 {
                volatility -= 1.0;
            }

            let mut volume = 0.0;
            let vol_ratio = bar.volume / vol_ma[i];
            if vol_ratio > 1.1 {
                volume = 1.0;
            } else if vol_ratio < 0.9 {
                volume = -1.0;
            }

            let mut structure = 0.0;
            if bar.close > resistance[i] {
                structure = 1.0;
            } else if bar.close < support[i] {
                structure = -1.0;
            }

            let mut candlestick = 0.0;
            let body_ratio = (bar.close - bar.open).abs() / (bar.high - bar.low);
            if body_ratio > 0.6 {
                candlestick = (bar.close - bar.open).signum();
            }

            let total = trend * self.weights.trend
                + momentum * self.weights.momentum
                + volatility * self.weights.volatility
                + volume * self.weights.volume
                + structure * self.weights.structure
                + candlestick * self.weights.candlestick;

            signals.push(if total > SCORE_THRESHOLD {
                Signal::Long
            } else if total < -SCORE_THRESHOLD {
                Signal::Short
            } else {
                Signal::Flat
            });
        }

        signals
    }
}
