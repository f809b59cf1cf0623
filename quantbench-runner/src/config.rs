//! Serializable backtest configuration.
//!
//! A `BacktestConfig` captures everything needed to reproduce a run: the
//! strategy variant with its parameters plus the engine's friction and
//! sizing settings. Configs load from TOML, serialize to JSON for run
//! artifacts, and hash to a content-addressed run id.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use quantbench_core::engine::EngineConfig;
use quantbench_core::strategies::{
    FactorWeights, MaCross, MeanReversion, MultiFactor, OpeningRangeBreakout, RsiThreshold,
    Strategy,
};

/// Unique identifier for a backtest run (content-addressable hash).
pub type RunId = String;

/// Errors from config loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete configuration for a single backtest run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BacktestConfig {
    pub strategy: StrategyConfig,

    /// Engine frictions and sizing. Defaults match the exchange conventions
    /// in `EngineConfig::default`.
    #[serde(default)]
    pub engine: EngineConfig,
}

impl BacktestConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.engine.initial_capital <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "initial_capital must be > 0, got {}",
                self.engine.initial_capital
            )));
        }
        if !(0.0..1.0).contains(&self.engine.position_pct) || self.engine.position_pct == 0.0 {
            return Err(ConfigError::Invalid(format!(
                "position_pct must be in (0, 1), got {}",
                self.engine.position_pct
            )));
        }
        self.strategy.validate()
    }

    /// Computes a deterministic hash ID for this configuration.
    ///
    /// Two runs with identical configs get the same RunId and can share
    /// cached artifacts.
    pub fn run_id(&self) -> RunId {
        let json = serde_json::to_string(self).expect("BacktestConfig serialization failed");
        let hash = blake3::hash(json.as_bytes());
        hash.to_hex().to_string()
    }

    /// Instantiate the configured strategy.
    pub fn build_strategy(&self) -> Box<dyn Strategy> {
        self.strategy.build()
    }
}

/// Strategy variant configuration (serializable tagged enum).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// Moving-average crossover: Long while the short SMA is above the long.
    MaCross { short_window: usize, long_window: usize },

    /// RSI thresholds: Long below oversold, Short above overbought.
    RsiThreshold {
        window: usize,
        oversold: f64,
        overbought: f64,
    },

    /// Mean-reversion z-score against a rolling mean/std band.
    MeanReversion { window: usize, z_threshold: f64 },

    /// Weighted multi-factor composite score.
    MultiFactor {
        #[serde(default)]
        weights: FactorWeights,
    },

    /// Opening-range breakout with ATR buffer and cooldown.
    OpeningRangeBreakout {
        lookback_minutes: i64,
        atr_period: usize,
        atr_multiplier: f64,
        cooldown_hours: i64,
    },
}

impl StrategyConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Self::MaCross {
                short_window,
                long_window,
            } => {
                if short_window >= long_window {
                    return Err(ConfigError::Invalid(format!(
                        "ma_cross short_window ({short_window}) must be < long_window ({long_window})"
                    )));
                }
            }
            Self::RsiThreshold {
                oversold,
                overbought,
                ..
            } => {
                if oversold >= overbought {
                    return Err(ConfigError::Invalid(format!(
                        "rsi_threshold oversold ({oversold}) must be < overbought ({overbought})"
                    )));
                }
            }
            Self::MeanReversion { z_threshold, .. } => {
                if *z_threshold <= 0.0 {
                    return Err(ConfigError::Invalid(format!(
                        "mean_reversion z_threshold must be > 0, got {z_threshold}"
                    )));
                }
            }
            Self::MultiFactor { .. } => {}
            Self::OpeningRangeBreakout {
                lookback_minutes,
                cooldown_hours,
                ..
            } => {
                if *lookback_minutes <= 0 {
                    return Err(ConfigError::Invalid(format!(
                        "opening_range_breakout lookback_minutes must be > 0, got {lookback_minutes}"
                    )));
                }
                if *cooldown_hours < 0 {
                    return Err(ConfigError::Invalid(format!(
                        "opening_range_breakout cooldown_hours must be >= 0, got {cooldown_hours}"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Instantiate the strategy this config describes.
    pub fn build(&self) -> Box<dyn Strategy> {
        match self {
            Self::MaCross {
                short_window,
                long_window,
            } => Box::new(MaCross::new(*short_window, *long_window)),
            Self::RsiThreshold {
                window,
                oversold,
                overbought,
            } => Box::new(RsiThreshold::new(*window, *oversold, *overbought)),
            Self::MeanReversion {
                window,
                z_threshold,
            } => Box::new(MeanReversion::new(*window, *z_threshold)),
            Self::MultiFactor { weights } => Box::new(MultiFactor::new(weights.clone())),
            Self::OpeningRangeBreakout {
                lookback_minutes,
                atr_period,
                atr_multiplier,
                cooldown_hours,
            } => Box::new(OpeningRangeBreakout::new(
                *lookback_minutes,
                *atr_period,
                *atr_multiplier,
                *cooldown_hours,
            )),
        }
    }
}

/// The stock comparison lineup: all five variants at their default
/// parameters from the exchange playbook.
pub fn default_lineup() -> Vec<StrategyConfig> {
    vec![
        StrategyConfig::MaCross {
            short_window: 5,
            long_window: 20,
        },
        StrategyConfig::RsiThreshold {
            window: 14,
            oversold: 30.0,
            overbought: 70.0,
        },
        StrategyConfig::MeanReversion {
            window: 20,
            z_threshold: 1.5,
        },
        StrategyConfig::MultiFactor {
            weights: FactorWeights::default(),
        },
        StrategyConfig::OpeningRangeBreakout {
            lookback_minutes: 90,
            atr_period: 10,
            atr_multiplier: 0.03,
            cooldown_hours: 2,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_config() -> BacktestConfig {
        BacktestConfig {
            strategy: StrategyConfig::MaCross {
                short_window: 5,
                long_window: 20,
            },
            engine: EngineConfig::default(),
        }
    }

    #[test]
    fn run_id_deterministic() {
        let config = sample_config();
        assert_eq!(config.run_id(), config.run_id());
        assert!(!config.run_id().is_empty());
    }

    #[test]
    fn run_id_changes_with_params() {
        let config1 = sample_config();
        let mut config2 = config1.clone();
        config2.strategy = StrategyConfig::MaCross {
            short_window: 10,
            long_window: 20,
        };
        assert_ne!(config1.run_id(), config2.run_id());
    }

    #[test]
    fn toml_round_trip() {
        let text = r#"
            [strategy]
            type = "rsi_threshold"
            window = 14
            oversold = 30.0
            overbought = 70.0

            [engine]
            initial_capital = 25000.0
            commission = 0.001
            slippage = 0.0005
            position_pct = 0.10
        "#;
        let config = BacktestConfig::from_toml_str(text).unwrap();
        assert_eq!(config.engine.initial_capital, 25_000.0);
        assert!(matches!(
            config.strategy,
            StrategyConfig::RsiThreshold { window: 14, .. }
        ));
        assert_eq!(config.build_strategy().name(), "rsi_14_30_70");
    }

    #[test]
    fn engine_section_defaults_when_omitted() {
        let text = r#"
            [strategy]
            type = "mean_reversion"
            window = 20
            z_threshold = 1.5
        "#;
        let config = BacktestConfig::from_toml_str(text).unwrap();
        assert_eq!(config.engine, EngineConfig::default());
    }

    #[test]
    fn multi_factor_weights_default_when_omitted() {
        let text = r#"
            [strategy]
            type = "multi_factor"
        "#;
        let config = BacktestConfig::from_toml_str(text).unwrap();
        match &config.strategy {
            StrategyConfig::MultiFactor { weights } => {
                assert_eq!(*weights, FactorWeights::default());
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn rejects_inverted_ma_windows() {
        let text = r#"
            [strategy]
            type = "ma_cross"
            short_window = 20
            long_window = 5
        "#;
        let err = BacktestConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn rejects_non_positive_capital() {
        let text = r#"
            [strategy]
            type = "ma_cross"
            short_window = 5
            long_window = 20

            [engine]
            initial_capital = 0.0
        "#;
        let err = BacktestConfig::from_toml_str(text).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn json_round_trip() {
        let config = sample_config();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let deserialized: BacktestConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn default_lineup_covers_all_variants() {
        let lineup = default_lineup();
        assert_eq!(lineup.len(), 5);
        let names: Vec<String> = lineup
            .iter()
            .map(|s| s.build().name().to_string())
            .collect();
        assert!(names.iter().all(|n| !n.is_empty()));
        // Every entry validates at its defaults.
        for strategy in &lineup {
            let config = BacktestConfig {
                strategy: strategy.clone(),
                engine: EngineConfig::default(),
            };
            assert!(config.run_id().len() == 64);
        }
    }
}
