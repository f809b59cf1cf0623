//! Strategy variants — per-bar signal generation over a price series.
//!
//! Strategies are portfolio-agnostic: they see bar history only, never cash
//! or position state. Signal generation is vectorized over the whole series
//! before the engine loop, but the value at index i must depend only on
//! bars[0..=i] (truncation test in `tests/lookahead_test.rs`).

pub mod ma_cross;
pub mod mean_reversion;
pub mod multi_factor;
pub mod opening_range;
pub mod rsi_threshold;

pub use ma_cross::MaCross;
pub use mean_reversion::MeanReversion;
pub use multi_factor::{FactorWeights, MultiFactor};
pub use opening_range::OpeningRangeBreakout;
pub use rsi_threshold::RsiThreshold;

use crate::domain::{Bar, Signal};

/// Trait for signal-generating strategies.
///
/// # Invariants
/// - Output has exactly one `Signal` per input bar, same order.
/// - Deterministic: same bars in, same signals out.
/// - No look-ahead: signals[i] depends only on bars[0..=i].
pub trait Strategy: Send + Sync {
    /// Human-readable name (e.g., "ma_cross_5_20").
    fn name(&self) -> &str;

    /// Generate one signal per input bar.
    fn generate_signals(&self, bars: &[Bar]) -> Vec<Signal>;
}
