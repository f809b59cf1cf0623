//! Backtest engine: deterministic bar-by-bar replay with trading frictions.
//!
//! The engine owns all portfolio mutation: strategies see bars only, and the
//! caller gets back an immutable run history (trades, equity curve, realized
//! signals). A fresh `RunContext` is created inside every `run_backtest`
//! call, so engine values carry no hidden cross-run state.

pub mod run;
pub mod state;

pub use run::{run_backtest, EngineError};
pub use state::{EngineConfig, RunResult};
