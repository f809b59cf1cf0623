//! Instrument metadata — exchange sizing rules injected into the engine.

use serde::{Deserialize, Serialize};

/// Quantity precision and minimum order size for a trading pair.
///
/// These rules come from the exchange (an external collaborator) and are
/// consumed by the engine's position sizing: quantities are rounded DOWN to
/// `quantity_decimals` places, and orders whose notional falls below
/// `min_notional` are rejected as no-trades.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Instrument {
    pub symbol: String,
    pub quantity_decimals: u32,
    pub min_notional: f64,
}

impl Instrument {
    pub fn new(symbol: impl Into<String>, quantity_decimals: u32, min_notional: f64) -> Self {
        Self {
            symbol: symbol.into(),
            quantity_decimals,
            min_notional,
        }
    }

    /// Round a quantity down to this instrument's precision.
    ///
    /// Rounding down keeps the resulting notional within the budget the
    /// sizing rule computed; rounding up could overdraw cash.
    pub fn round_quantity(&self, quantity: f64) -> f64 {
        let scale = 10f64.powi(self.quantity_decimals as i32);
        (quantity * scale).floor() / scale
    }
}

impl Default for Instrument {
    fn default() -> Self {
        // BTC/USD-style pair: 6 decimal places, $10 minimum order.
        Self::new("BTC/USD", 6, 10.0)
    }
}
