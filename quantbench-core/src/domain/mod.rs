//! Domain types shared by the indicator, strategy, and engine layers.

pub mod bar;
pub mod instrument;
pub mod signal;
pub mod trade;

pub use bar::Bar;
pub use instrument::Instrument;
pub use signal::Signal;
pub use trade::{EquityPoint, Trade, TradeAction};
