//! Strategy comparison — run a lineup of configs against one series and
//! rank the results.
//!
//! Runs are embarrassingly parallel; each gets its own engine state, so the
//! lineup fans out over rayon and the results sort by the chosen metric.
//! Infinite metric values (a no-downside Sortino, a no-drawdown Calmar)
//! rank above every finite score, so a strategy with no observed risk wins
//! the ranking outright.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use quantbench_core::domain::Bar;
use quantbench_core::engine::EngineConfig;

use crate::config::{BacktestConfig, StrategyConfig};
use crate::runner::{run_strategy_backtest, BacktestResult, RunError};

/// Which metric to rank the comparison table by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum RankingMetric {
    #[default]
    Sortino,
    Sharpe,
    Calmar,
    TotalReturn,
    AnnualizedReturn,
    WinRate,
}

impl RankingMetric {
    fn value(&self, result: &BacktestResult) -> f64 {
        let m = &result.metrics;
        match self {
            Self::Sortino => m.sortino,
            Self::Sharpe => m.sharpe,
            Self::Calmar => m.calmar,
            Self::TotalReturn => m.total_return,
            Self::AnnualizedReturn => m.annualized_return,
            Self::WinRate => m.win_rate,
        }
    }
}

/// Ranked results of a multi-strategy comparison, best first.
#[derive(Debug, Serialize, Deserialize)]
pub struct ComparisonTable {
    pub metric: RankingMetric,
    pub results: Vec<BacktestResult>,
}

impl ComparisonTable {
    /// The winning run, if any strategy completed.
    pub fn best(&self) -> Option<&BacktestResult> {
        self.results.first()
    }
}

/// Run every strategy in the lineup against the same series, in parallel,
/// and rank by `metric` descending.
///
/// Each run operates on its own engine state; the input series is shared
/// read-only. A failure in any single run fails the whole comparison.
pub fn compare_strategies(
    lineup: &[StrategyConfig],
    engine: &EngineConfig,
    bars: &[Bar],
    metric: RankingMetric,
) -> Result<ComparisonTable, RunError> {
    let mut results: Vec<BacktestResult> = lineup
        .par_iter()
        .map(|strategy| {
            let config = BacktestConfig {
                strategy: strategy.clone(),
                engine: engine.clone(),
            };
            run_strategy_backtest(&config, bars)
        })
        .collect::<Result<Vec<_>, _>>()?;

    // total_cmp orders +inf above every finite value and NaN (which the
    // metrics layer never emits) deterministically last.
    results.sort_by(|a, b| metric.value(b).total_cmp(&metric.value(a)));

    Ok(ComparisonTable { metric, results })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_lineup;
    use chrono::{TimeZone, Utc};

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

    #[test]
    fn default_ranking_metric_is_sortino() {
        assert_eq!(RankingMetric::default(), RankingMetric::Sortino);
    }

    #[test]
    fn comparison_ranks_descending() {
        // Trending walk with noise so every variant has something to do.
        let closes: Vec<f64> = (0..400)
            .map(|i| 100.0 + i as f64 * 0.1 + ((i * 7) % 13) as f64 * 0.5)
            .collect();
        let bars = bars_from_closes(&closes);
        let table = compare_strategies(
            &default_lineup(),
            &EngineConfig::default(),
            &bars,
            RankingMetric::Sortino,
        )
        .unwrap();

        assert_eq!(table.results.len(), 5);
        for pair in table.results.windows(2) {
            assert!(
                metric_ge(pair[0].metrics.sortino, pair[1].metrics.sortino),
                "table not sorted descending"
            );
        }
        assert!(table.best().is_some());
    }

    fn metric_ge(a: f64, b: f64) -> bool {
        a.total_cmp(&b) != std::cmp::Ordering::Less
    }

    #[test]
    fn infinite_sortino_ranks_first() {
        // A do-nothing strategy on this series has a flat equity curve and
        // an infinite Sortino; any strategy that trades into noise and takes
        // a down bar ranks below it.
        let closes: Vec<f64> = (0..200)
            .map(|i| 100.0 + ((i * 11) % 17) as f64 - 8.0)
            .collect();
        let bars = bars_from_closes(&closes);
        // ma_cross with huge windows never warms up: always Flat.
        let lineup = vec![
            StrategyConfig::MaCross {
                short_window: 150,
                long_window: 500,
            },
            StrategyConfig::MeanReversion {
                window: 10,
                z_threshold: 0.5,
            },
        ];
        let table = compare_strategies(
            &lineup,
            &EngineConfig::default(),
            &bars,
            RankingMetric::Sortino,
        )
        .unwrap();

        let best = table.best().unwrap();
        assert!(best.metrics.sortino.is_infinite());
        assert_eq!(best.strategy_name, "ma_cross_150_500");
    }

    #[test]
    fn empty_series_fails_the_comparison() {
        let result = compare_strategies(
            &default_lineup(),
            &EngineConfig::default(),
            &[],
            RankingMetric::default(),
        );
        assert!(result.is_err());
    }
}
