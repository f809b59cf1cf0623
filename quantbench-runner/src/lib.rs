//! QuantBench Runner — backtest orchestration, metrics, comparison, artifacts.
//!
//! This crate builds on `quantbench-core` to provide:
//! - Performance metrics over equity curves and trade tapes
//! - Single-backtest runner with config-driven strategy construction
//! - Parallel multi-strategy comparison with metric ranking
//! - TOML config loading and content-addressed run ids
//! - JSON/CSV artifact export and Markdown reports

pub mod comparison;
pub mod config;
pub mod export;
pub mod metrics;
pub mod report;
pub mod runner;

pub use comparison::{compare_strategies, ComparisonTable, RankingMetric};
pub use config::{default_lineup, BacktestConfig, ConfigError, RunId, StrategyConfig};
pub use export::{export_json, import_json, write_equity_csv, write_result_json, write_trades_csv};
pub use metrics::PerformanceMetrics;
pub use report::{generate_comparison_report, generate_report};
pub use runner::{
    run_from_config_file, run_strategy_backtest, BacktestResult, RunError, SCHEMA_VERSION,
};
