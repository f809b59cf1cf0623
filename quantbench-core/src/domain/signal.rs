//! Signal — per-bar directional trading decision.

use serde::{Deserialize, Serialize};

/// Directional decision emitted by a strategy for a single bar.
///
/// A `Short` signal in this long-only model closes an existing position; it
/// never opens short inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    Long,
    Flat,
    Short,
}

impl Signal {
    /// Conventional integer encoding: Long = +1, Flat = 0, Short = -1.
    pub fn as_i8(self) -> i8 {
        match self {
            Signal::Long => 1,
            Signal::Flat => 0,
            Signal::Short => -1,
        }
    }

    pub fn is_flat(self) -> bool {
        matches!(self, Signal::Flat)
    }
}

impl Default for Signal {
    fn default() -> Self {
        Signal::Flat
    }
}
