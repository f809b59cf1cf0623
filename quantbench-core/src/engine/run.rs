//! The replay loop: validate, precompute signals, apply trading rules.

use thiserror::Error;

use crate::domain::{Bar, Signal, Trade, TradeAction};
use crate::engine::state::{EngineConfig, RunContext, RunResult};
use crate::strategies::Strategy;

/// Engine-level failures. All are fatal to the run that raised them and
/// produce no partial results.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("empty price series")]
    EmptySeries,

    #[error("non-monotonic timestamp at bar {index}")]
    NonMonotonicTimestamp { index: usize },

    #[error("non-positive or insane price at bar {index}")]
    InvalidPrice { index: usize },

    #[error("strategy '{strategy}' returned {actual} signals for {expected} bars")]
    SignalLengthMismatch {
        strategy: String,
        expected: usize,
        actual: usize,
    },
}

/// Validate the input series before any bar is processed.
///
/// Timestamps must be strictly increasing and every bar must pass the OHLC
/// sanity check (positive prices, high/low bracketing).
fn validate_series(bars: &[Bar]) -> Result<(), EngineError> {
    if bars.is_empty() {
        return Err(EngineError::EmptySeries);
    }
    for (i, bar) in bars.iter().enumerate() {
        if !bar.is_sane() {
            return Err(EngineError::InvalidPrice { index: i });
        }
        if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
            return Err(EngineError::NonMonotonicTimestamp { index: i });
        }
    }
    Ok(())
}

/// Slippage-adjusted execution price: fills degrade in the signal direction.
fn execution_price(close: f64, signal: Signal, slippage: f64) -> f64 {
    match signal {
        Signal::Long => close * (1.0 + slippage),
        Signal::Short => close * (1.0 - slippage),
        Signal::Flat => close,
    }
}

/// Replay `strategy` over `bars` and return the complete run history.
///
/// Signals are precomputed for the whole series before the loop; the
/// per-bar trading rules are:
/// - Long with no open position: buy `position_pct` of current cash,
///   quantity rounded down to the instrument's precision. Sizing
///   rejections (zero quantity, sub-minimum notional, insufficient cash
///   after commission) are silent no-trades, not errors.
/// - Short with an open position: liquidate it entirely.
/// - Anything else: hold.
///
/// Postcondition: `equity_curve.len() == signals.len() == bars.len()`.
pub fn run_backtest(
    config: &EngineConfig,
    strategy: &dyn Strategy,
    bars: &[Bar],
) -> Result<RunResult, EngineError> {
    validate_series(bars)?;

    let signals = strategy.generate_signals(bars);
    if signals.len() != bars.len() {
        return Err(EngineError::SignalLengthMismatch {
            strategy: strategy.name().to_string(),
            expected: bars.len(),
            actual: signals.len(),
        });
    }

    let mut ctx = RunContext::new(config, bars.len());

    for (bar, &signal) in bars.iter().zip(&signals) {
        let price = execution_price(bar.close, signal, config.slippage);

        match signal {
            Signal::Long if ctx.position == 0.0 => try_buy(config, &mut ctx, bar, price),
            Signal::Short if ctx.position > 0.0 => sell_all(config, &mut ctx, bar, price),
            _ => {}
        }

        ctx.mark(bar, price);
        ctx.signals.push(signal);
    }

    let final_equity = ctx
        .equity_curve
        .last()
        .map(|p| p.equity)
        .unwrap_or(config.initial_capital);

    Ok(RunResult {
        equity_curve: ctx.equity_curve,
        trades: ctx.trades,
        signals: ctx.signals,
        final_equity,
        bar_count: bars.len(),
    })
}

fn try_buy(config: &EngineConfig, ctx: &mut RunContext, bar: &Bar, price: f64) {
    let target_notional = ctx.cash * config.position_pct;
    let quantity = config.instrument.round_quantity(target_notional / price);
    if quantity <= 0.0 {
        return;
    }

    let notional = quantity * price;
    if notional < config.instrument.min_notional {
        return;
    }

    let commission = notional * config.commission;
    let cost = notional + commission;
    if cost > ctx.cash {
        return;
    }

    ctx.cash -= cost;
    ctx.position = quantity;
    ctx.trades.push(Trade {
        timestamp: bar.timestamp,
        action: TradeAction::Buy,
        price,
        quantity,
        notional,
        commission,
        signal: Signal::Long,
    });
}

fn sell_all(config: &EngineConfig, ctx: &mut RunContext, bar: &Bar, price: f64) {
    let quantity = ctx.position;
    let notional = quantity * price;
    let commission = notional * config.commission;

    ctx.cash += notional - commission;
    ctx.position = 0.0;
    ctx.trades.push(Trade {
        timestamp: bar.timestamp,
        action: TradeAction::Sell,
        price,
        quantity,
        notional,
        commission,
        signal: Signal::Short,
    });
}
