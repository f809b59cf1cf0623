//! Moving Average Convergence Divergence (MACD).
//!
//! Line: EMA(fast) - EMA(slow). Signal line: EMA(signal_span) of the line.
//! Histogram: line - signal line.
//!
//! Three outputs (separate Indicator instances, same pattern as Bollinger):
//! `Macd::line`, `Macd::signal_line`, `Macd::histogram`.

use crate::domain::Bar;
use crate::indicators::ema::ema_of_series;
use crate::indicators::Indicator;

/// Which MACD output series to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MacdOutput {
    Line,
    SignalLine,
    Histogram,
}

#[derive(Debug, Clone)]
pub struct Macd {
    fast: usize,
    slow: usize,
    signal_span: usize,
    output: MacdOutput,
    name: String,
}

impl Macd {
    pub fn line(fast: usize, slow: usize, signal_span: usize) -> Self {
        Self::with_output(fast, slow, signal_span, MacdOutput::Line)
    }

    pub fn signal_line(fast: usize, slow: usize, signal_span: usize) -> Self {
        Self::with_output(fast, slow, signal_span, MacdOutput::SignalLine)
    }

    pub fn histogram(fast: usize, slow: usize, signal_span: usize) -> Self {
        Self::with_output(fast, slow, signal_span, MacdOutput::Histogram)
    }

    fn with_output(fast: usize, slow: usize, signal_span: usize, output: MacdOutput) -> Self {
        assert!(fast >= 1 && slow >= 1 && signal_span >= 1, "MACD spans must be >= 1");
        assert!(fast < slow, "MACD fast span must be < slow span");
        let tag = match output {
            MacdOutput::Line => "line",
            MacdOutput::SignalLine => "signal",
            MacdOutput::Histogram => "hist",
        };
        Self {
            fast,
            slow,
            signal_span,
            output,
            name: format!("macd_{tag}_{fast}_{slow}_{signal_span}"),
        }
    }

    fn compute_lines(&self, bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let fast = ema_of_series(&closes, self.fast);
        let slow = ema_of_series(&closes, self.slow);
        let line: Vec<f64> = fast
            .iter()
            .zip(&slow)
            .map(|(f, s)| f - s)
            .collect();
        let signal = ema_of_series(&line, self.signal_span);
        (line, signal)
    }
}

impl Indicator for Macd {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let (line, signal) = self.compute_lines(bars);
        match self.output {
            MacdOutput::Line => line,
            MacdOutput::SignalLine => signal,
            MacdOutput::Histogram => line
                .iter()
                .zip(&signal)
                .map(|(l, s)| l - s)
                .collect(),
        }
    }
}
