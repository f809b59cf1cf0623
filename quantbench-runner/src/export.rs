//! Artifact export — JSON results and CSV trade/equity tapes.
//!
//! All persisted artifacts include a `schema_version` field. Unknown
//! versions are rejected on load.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use quantbench_core::domain::{EquityPoint, Trade};

use crate::runner::{BacktestResult, SCHEMA_VERSION};

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize a `BacktestResult` to pretty JSON.
pub fn export_json(result: &BacktestResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize BacktestResult to JSON")
}

/// Deserialize a `BacktestResult` from JSON, rejecting unknown schema versions.
pub fn import_json(json: &str) -> Result<BacktestResult> {
    let result: BacktestResult =
        serde_json::from_str(json).context("failed to deserialize BacktestResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

/// Write a result as pretty JSON to a file.
pub fn write_result_json(path: &Path, result: &BacktestResult) -> Result<()> {
    let json = export_json(result)?;
    std::fs::write(path, json)
        .with_context(|| format!("failed to write result JSON {}", path.display()))
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Write the equity curve as CSV: timestamp, cash, position, price, equity.
pub fn write_equity_csv(path: &Path, equity: &[EquityPoint]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create equity CSV {}", path.display()))?;
    writeln!(file, "timestamp,cash,position,price,equity")?;
    for point in equity {
        writeln!(
            file,
            "{},{:.4},{:.8},{:.4},{:.4}",
            point.timestamp.to_rfc3339(),
            point.cash,
            point.position,
            point.price,
            point.equity
        )?;
    }
    Ok(())
}

/// Write the trade tape as CSV: timestamp, action, price, quantity,
/// notional, commission, signal.
pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    let mut file = File::create(path)
        .with_context(|| format!("failed to create trades CSV {}", path.display()))?;
    writeln!(file, "timestamp,action,price,quantity,notional,commission,signal")?;
    for trade in trades {
        writeln!(
            file,
            "{},{:?},{:.4},{:.8},{:.4},{:.6},{}",
            trade.timestamp.to_rfc3339(),
            trade.action,
            trade.price,
            trade.quantity,
            trade.notional,
            trade.commission,
            trade.signal.as_i8()
        )?;
    }
    Ok(())
}
