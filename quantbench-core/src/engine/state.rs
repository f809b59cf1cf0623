//! Engine configuration, per-run mutable state, and run result types.

use serde::{Deserialize, Serialize};

use crate::domain::{Bar, EquityPoint, Instrument, Signal, Trade, TradeAction};

/// Configuration for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub initial_capital: f64,
    /// Commission rate charged on notional, both sides.
    pub commission: f64,
    /// Slippage rate applied to the execution price in the signal direction.
    pub slippage: f64,
    /// Fraction of current cash allocated per entry (single-lot model).
    pub position_pct: f64,
    /// Exchange sizing rules for the traded pair.
    pub instrument: Instrument,
}

impl EngineConfig {
    pub fn new(initial_capital: f64) -> Self {
        Self {
            initial_capital,
            ..Self::default()
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            initial_capital: 50_000.0,
            commission: 0.001,
            slippage: 0.0005,
            position_pct: 0.10,
            instrument: Instrument::default(),
        }
    }
}

/// Mutable portfolio state for one run. Created fresh per `run_backtest`
/// call and consumed into a `RunResult` at the end.
#[derive(Debug)]
pub(crate) struct RunContext {
    pub cash: f64,
    pub position: f64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub signals: Vec<Signal>,
}

impl RunContext {
    pub fn new(config: &EngineConfig, bar_count: usize) -> Self {
        Self {
            cash: config.initial_capital,
            position: 0.0,
            trades: Vec::new(),
            equity_curve: Vec::with_capacity(bar_count),
            signals: Vec::with_capacity(bar_count),
        }
    }

    /// Record the end-of-bar snapshot at the bar's execution price.
    pub fn mark(&mut self, bar: &Bar, price: f64) {
        self.equity_curve.push(EquityPoint {
            timestamp: bar.timestamp,
            cash: self.cash,
            position: self.position,
            price,
            equity: self.cash + self.position * price,
        });
    }
}

/// Immutable history of a completed backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunResult {
    /// One point per bar processed.
    pub equity_curve: Vec<EquityPoint>,
    /// Executed trades, in bar order.
    pub trades: Vec<Trade>,
    /// The realized signal at each bar (diagnostics and testing).
    pub signals: Vec<Signal>,
    pub final_equity: f64,
    pub bar_count: usize,
}

impl RunResult {
    /// Count of completed (Buy, Sell) round-trips.
    pub fn round_trips(&self) -> usize {
        self.trades
            .iter()
            .filter(|t| t.action == TradeAction::Sell)
            .count()
    }
}
