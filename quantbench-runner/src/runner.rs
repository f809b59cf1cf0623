//! Backtest runner — wires together config, engine, and metrics.
//!
//! `run_strategy_backtest()` takes a config and a pre-loaded bar series,
//! replays the configured strategy through the engine, and packages the
//! full history with computed metrics into a serializable
//! `BacktestResult`. `run_from_config_file()` does the same from a TOML
//! config on disk.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use quantbench_core::domain::{Bar, EquityPoint, Trade};
use quantbench_core::engine::{run_backtest, EngineError};

use crate::config::{BacktestConfig, ConfigError, RunId};
use crate::metrics::PerformanceMetrics;

/// Errors from the runner.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),
}

/// Current schema version for persisted artifacts.
pub const SCHEMA_VERSION: u32 = 1;

/// Complete result of a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BacktestResult {
    /// Schema version for forward-compatible deserialization.
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,
    pub run_id: RunId,
    pub strategy_name: String,
    pub config: BacktestConfig,
    pub metrics: PerformanceMetrics,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
    pub bar_count: usize,
}

fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// Run a single backtest from a config against a pre-loaded series.
///
/// The series is read-only; all run state lives inside the engine call, so
/// the same config can be replayed against many series (or many configs
/// against the same series) without interference.
pub fn run_strategy_backtest(
    config: &BacktestConfig,
    bars: &[Bar],
) -> Result<BacktestResult, RunError> {
    let strategy = config.build_strategy();
    let result = run_backtest(&config.engine, strategy.as_ref(), bars)?;
    let metrics = PerformanceMetrics::compute(
        &result.equity_curve,
        &result.trades,
        config.engine.initial_capital,
    );

    Ok(BacktestResult {
        schema_version: SCHEMA_VERSION,
        run_id: config.run_id(),
        strategy_name: strategy.name().to_string(),
        config: config.clone(),
        metrics,
        trades: result.trades,
        equity_curve: result.equity_curve,
        bar_count: result.bar_count,
    })
}

/// Load a TOML config from disk and run it against a pre-loaded series.
pub fn run_from_config_file(
    path: &std::path::Path,
    bars: &[Bar],
) -> Result<BacktestResult, RunError> {
    let config = BacktestConfig::load(path)?;
    run_strategy_backtest(&config, bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StrategyConfig;
    use chrono::{TimeZone, Utc};
    use quantbench_core::engine::EngineConfig;

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Bar {
                timestamp: base + chrono::Duration::minutes(15 * i as i64),
                open: close,
                high: close * 1.005,
                low: close * 0.995,
                close,
                volume: 1000.0,
            })
            .collect()
    }

    fn ma_cross_config() -> BacktestConfig {
        BacktestConfig {
            strategy: StrategyConfig::MaCross {
                short_window: 5,
                long_window: 20,
            },
            engine: EngineConfig::default(),
        }
    }

    #[test]
    fn result_carries_full_history_and_metrics() {
        let closes: Vec<f64> = (0..60).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let bars = bars_from_closes(&closes);
        let result = run_strategy_backtest(&ma_cross_config(), &bars).unwrap();

        assert_eq!(result.schema_version, SCHEMA_VERSION);
        assert_eq!(result.strategy_name, "ma_cross_5_20");
        assert_eq!(result.bar_count, 60);
        assert_eq!(result.equity_curve.len(), 60);
        assert_eq!(result.trades.len(), 1);
        assert!(result.metrics.total_return > 0.0);
        assert_eq!(result.metrics.initial_capital, 50_000.0);
        assert_eq!(result.run_id, ma_cross_config().run_id());
    }

    #[test]
    fn engine_errors_propagate() {
        let result = run_strategy_backtest(&ma_cross_config(), &[]);
        assert!(matches!(
            result,
            Err(RunError::Engine(EngineError::EmptySeries))
        ));
    }

    #[test]
    fn runs_from_a_toml_file_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ma_cross.toml");
        std::fs::write(
            &path,
            "[strategy]\ntype = \"ma_cross\"\nshort_window = 5\nlong_window = 20\n",
        )
        .unwrap();

        let closes: Vec<f64> = (0..60).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let bars = bars_from_closes(&closes);
        let result = run_from_config_file(&path, &bars).unwrap();
        assert_eq!(result.strategy_name, "ma_cross_5_20");
        assert_eq!(result.bar_count, 60);
    }

    #[test]
    fn invalid_config_file_surfaces_as_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        std::fs::write(
            &path,
            "[strategy]\ntype = \"ma_cross\"\nshort_window = 20\nlong_window = 5\n",
        )
        .unwrap();

        let result = run_from_config_file(&path, &[]);
        assert!(matches!(result, Err(RunError::Config(_))));
    }

    #[test]
    fn result_serializes_to_json() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let bars = bars_from_closes(&closes);
        let result = run_strategy_backtest(&ma_cross_config(), &bars).unwrap();

        let json = serde_json::to_string(&result).unwrap();
        let back: BacktestResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.run_id, result.run_id);
        assert_eq!(back.equity_curve.len(), result.equity_curve.len());
    }
}
