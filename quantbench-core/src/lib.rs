//! QuantBench Core — domain types, indicator library, strategy variants, and
//! the bar-by-bar backtest engine.
//!
//! This crate contains everything a single backtest run needs:
//! - Domain types (bars, signals, trades, equity points, instruments)
//! - Indicator library with a uniform NaN-warmup contract
//! - Five rule-based strategy variants behind one `Strategy` trait
//! - Deterministic replay engine with slippage, commission, and sizing rules
//!
//! Aggregation across runs (metrics, ranking, config, artifacts) lives in
//! `quantbench-runner`.

pub mod domain;
pub mod engine;
pub mod indicators;
pub mod strategies;
