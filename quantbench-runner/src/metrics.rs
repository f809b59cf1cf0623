//! Performance metrics — pure functions that compute strategy statistics.
//!
//! Every metric is a pure function: equity curve and/or trade list in, scalar
//! out. No dependencies on the runner or the engine loop. Degenerate inputs
//! map to explicit fallback values (0 or +inf), never to NaN: strategy
//! ranking depends on infinities ordering correctly, so they are preserved
//! rather than clamped.

use quantbench_core::domain::{EquityPoint, Trade, TradeAction};
use serde::{Deserialize, Serialize};

const ANNUALIZATION: f64 = 252.0;

/// Aggregate performance metrics for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub initial_capital: f64,
    pub final_equity: f64,
    pub total_return: f64,
    pub annualized_return: f64,
    pub max_drawdown: f64,
    pub sharpe: f64,
    #[serde(with = "ratio_serde")]
    pub sortino: f64,
    #[serde(with = "ratio_serde")]
    pub calmar: f64,
    pub trade_count: usize,
    pub win_rate: f64,
}

impl PerformanceMetrics {
    /// Compute all metrics from an equity curve and trade list.
    pub fn compute(equity_curve: &[EquityPoint], trades: &[Trade], initial_capital: f64) -> Self {
        let equity: Vec<f64> = equity_curve.iter().map(|p| p.equity).collect();
        let final_equity = equity.last().copied().unwrap_or(initial_capital);
        let total = total_return(initial_capital, final_equity);
        let annualized = annualized_return(total, equity_curve);
        let dd = max_drawdown(&equity);
        Self {
            initial_capital,
            final_equity,
            total_return: total,
            annualized_return: annualized,
            max_drawdown: dd,
            sharpe: sharpe_ratio(&equity),
            sortino: sortino_ratio(&equity),
            calmar: calmar_ratio(annualized, dd),
            trade_count: trades.len(),
            win_rate: win_rate(trades),
        }
    }
}

/// JSON encoding for ratio fields that can legitimately be infinite.
///
/// `serde_json` flattens non-finite floats to `null`, which then fails to
/// deserialize back into an `f64`. Finite values stay plain numbers;
/// infinities round-trip as the strings `"inf"` / `"-inf"`.
mod ratio_serde {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if *value == f64::INFINITY {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Num(f64),
            Str(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Num(v) => Ok(v),
            Repr::Str(s) => match s.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                other => Err(serde::de::Error::custom(format!(
                    "unrecognized ratio encoding {other:?}"
                ))),
            },
        }
    }
}

// ─── Individual metric functions ────────────────────────────────────

/// Total return as a fraction: (final - initial) / initial.
pub fn total_return(initial_capital: f64, final_equity: f64) -> f64 {
    if initial_capital <= 0.0 {
        return 0.0;
    }
    (final_equity - initial_capital) / initial_capital
}

/// Annualized return over the calendar span of the equity curve.
///
/// (1 + total_return)^(365 / elapsed_days) - 1, where elapsed_days is the
/// whole-day span between the first and last equity timestamps. Defined as
/// 0 when the span is zero or reversed.
pub fn annualized_return(total_return: f64, equity_curve: &[EquityPoint]) -> f64 {
    let (first, last) = match (equity_curve.first(), equity_curve.last()) {
        (Some(f), Some(l)) => (f, l),
        _ => return 0.0,
    };
    let elapsed_days = (last.timestamp - first.timestamp).num_days();
    if elapsed_days <= 0 {
        return 0.0;
    }
    (1.0 + total_return).powf(365.0 / elapsed_days as f64) - 1.0
}

/// Maximum drawdown as a non-positive fraction (e.g., -0.15 = 15% drawdown).
///
/// Returns 0.0 if equity is constant or monotonically increasing.
pub fn max_drawdown(equity: &[f64]) -> f64 {
    if equity.len() < 2 {
        return 0.0;
    }
    let mut peak = equity[0];
    let mut max_dd = 0.0_f64;

    for &eq in equity {
        if eq > peak {
            peak = eq;
        }
        if peak > 0.0 {
            let dd = (eq - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }
    max_dd
}

/// Annualized Sharpe ratio from per-bar returns.
///
/// Sharpe = mean(returns) / std(returns) * sqrt(252).
/// Defined as 0 when the return variance is zero (flat equity curve) or
/// there are fewer than 2 returns.
pub fn sharpe_ratio(equity: &[f64]) -> f64 {
    let returns = bar_returns(equity);
    if returns.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(&returns);
    let std = std_dev(&returns);
    if std < 1e-15 {
        return 0.0;
    }
    (mean / std) * ANNUALIZATION.sqrt()
}

/// Annualized Sortino ratio (downside deviation only).
///
/// Sortino = mean(returns) / std(returns restricted to returns < 0) * sqrt(252).
/// Defined as +inf when there are zero negative returns or the downside
/// deviation is exactly zero: a strategy with no observed downside gets an
/// unbounded score, not an undefined one.
pub fn sortino_ratio(equity: &[f64]) -> f64 {
    let returns = bar_returns(equity);
    if returns.is_empty() {
        return 0.0;
    }
    let downside: Vec<f64> = returns.iter().copied().filter(|&r| r < 0.0).collect();
    if downside.is_empty() {
        return f64::INFINITY;
    }
    let downside_std = std_dev(&downside);
    if downside_std < 1e-15 {
        return f64::INFINITY;
    }
    (mean_f64(&returns) / downside_std) * ANNUALIZATION.sqrt()
}

/// Calmar ratio: annualized return / |max drawdown|.
///
/// Defined as +inf when max drawdown is zero.
pub fn calmar_ratio(annualized_return: f64, max_drawdown: f64) -> f64 {
    if max_drawdown == 0.0 {
        return f64::INFINITY;
    }
    annualized_return / max_drawdown.abs()
}

/// Win rate over completed round-trips.
///
/// Trades are paired sequentially as (BUY, next SELL); a pair is a win when
/// the sell price exceeds the buy price. A trailing BUY with no following
/// SELL is excluded from the denominator. Returns 0.0 with no completed
/// round-trips.
pub fn win_rate(trades: &[Trade]) -> f64 {
    let mut completed = 0usize;
    let mut wins = 0usize;
    let mut open_buy: Option<&Trade> = None;

    for trade in trades {
        match trade.action {
            TradeAction::Buy => open_buy = Some(trade),
            TradeAction::Sell => {
                if let Some(buy) = open_buy.take() {
                    completed += 1;
                    if trade.price > buy.price {
                        wins += 1;
                    }
                }
            }
        }
    }

    if completed == 0 {
        return 0.0;
    }
    wins as f64 / completed as f64
}

// ─── Helpers ────────────────────────────────────────────────────────

/// Per-bar returns from an equity series. The first bar has no defined
/// return and is dropped.
pub fn bar_returns(equity: &[f64]) -> Vec<f64> {
    if equity.len() < 2 {
        return Vec::new();
    }
    equity
        .windows(2)
        .map(|w| {
            if w[0] > 0.0 {
                (w[1] - w[0]) / w[0]
            } else {
                0.0
            }
        })
        .collect()
}

pub(crate) fn mean_f64(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (ddof = 1). Fewer than 2 values → 0.0.
pub(crate) fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean_f64(values);
    let variance =
        values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}
