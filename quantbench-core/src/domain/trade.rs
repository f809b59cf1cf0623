//! Trade and EquityPoint — the engine's append-only run history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Signal;

/// Direction of an executed trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeAction {
    Buy,
    Sell,
}

/// A single executed trade. Immutable once recorded.
///
/// `notional` is quantity * execution price; `commission` is charged on top
/// of (Buy) or deducted from (Sell) the notional.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub timestamp: DateTime<Utc>,
    pub action: TradeAction,
    pub price: f64,
    pub quantity: f64,
    pub notional: f64,
    pub commission: f64,
    /// The signal that triggered this trade.
    pub signal: Signal,
}

/// Portfolio snapshot recorded once per bar.
///
/// Invariant: `equity == cash + position * price` (price is the bar's
/// slippage-adjusted execution price).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquityPoint {
    pub timestamp: DateTime<Utc>,
    pub cash: f64,
    pub position: f64,
    pub price: f64,
    pub equity: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn trade_serialization_roundtrip() {
        let trade = Trade {
            timestamp: Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap(),
            action: TradeAction::Buy,
            price: 100.0,
            quantity: 5.0,
            notional: 500.0,
            commission: 0.5,
            signal: Signal::Long,
        };
        let json = serde_json::to_string(&trade).unwrap();
        let deser: Trade = serde_json::from_str(&json).unwrap();
        assert_eq!(deser.action, TradeAction::Buy);
        assert_eq!(deser.quantity, 5.0);
        assert_eq!(deser.signal, Signal::Long);
    }

    #[test]
    fn equity_point_identity() {
        let point = EquityPoint {
            timestamp: Utc.with_ymd_and_hms(2024, 8, 1, 12, 0, 0).unwrap(),
            cash: 45_000.0,
            position: 50.0,
            price: 100.0,
            equity: 50_000.0,
        };
        assert!((point.equity - (point.cash + point.position * point.price)).abs() < 1e-10);
    }
}
