//! Markdown report generation for single runs and comparison tables.

use crate::comparison::ComparisonTable;
use crate::runner::BacktestResult;

/// Format a possibly-infinite ratio for display.
fn fmt_ratio(value: f64) -> String {
    if value.is_infinite() {
        if value > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else {
        format!("{value:.3}")
    }
}

/// Generate a Markdown report for a single backtest run.
pub fn generate_report(result: &BacktestResult) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# Backtest Report\n\n");

    // Metadata
    md.push_str("## Metadata\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Strategy | {} |\n", result.strategy_name));
    md.push_str(&format!("| Run Id | {} |\n", result.run_id));
    md.push_str(&format!(
        "| Initial Capital | ${:.0} |\n",
        result.metrics.initial_capital
    ));
    md.push_str(&format!("| Bars | {} |\n", result.bar_count));
    if let (Some(first), Some(last)) =
        (result.equity_curve.first(), result.equity_curve.last())
    {
        md.push_str(&format!(
            "| Period | {} to {} |\n",
            first.timestamp.to_rfc3339(),
            last.timestamp.to_rfc3339()
        ));
    }
    md.push('\n');

    // Performance Summary
    let m = &result.metrics;
    md.push_str("## Performance Summary\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Final Equity | ${:.2} |\n", m.final_equity));
    md.push_str(&format!(
        "| Total Return | {:.2}% |\n",
        m.total_return * 100.0
    ));
    md.push_str(&format!(
        "| Annualized Return | {:.2}% |\n",
        m.annualized_return * 100.0
    ));
    md.push_str(&format!("| Sharpe | {} |\n", fmt_ratio(m.sharpe)));
    md.push_str(&format!("| Sortino | {} |\n", fmt_ratio(m.sortino)));
    md.push_str(&format!("| Calmar | {} |\n", fmt_ratio(m.calmar)));
    md.push_str(&format!(
        "| Max Drawdown | {:.2}% |\n",
        m.max_drawdown * 100.0
    ));
    md.push_str(&format!("| Win Rate | {:.1}% |\n", m.win_rate * 100.0));
    md.push_str(&format!("| Trades | {} |\n", m.trade_count));
    md.push('\n');

    md
}

/// Generate a Markdown table for a ranked multi-strategy comparison.
pub fn generate_comparison_report(table: &ComparisonTable) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# Strategy Comparison\n\n");
    md.push_str(&format!("Ranked by: {:?}\n\n", table.metric));
    md.push_str(
        "| Rank | Strategy | Total Return | Sharpe | Sortino | Calmar | Max DD | Win Rate | Trades |\n",
    );
    md.push_str("| --- | --- | --- | --- | --- | --- | --- | --- | --- |\n");

    for (rank, result) in table.results.iter().enumerate() {
        let m = &result.metrics;
        md.push_str(&format!(
            "| {} | {} | {:.2}% | {} | {} | {} | {:.2}% | {:.1}% | {} |\n",
            rank + 1,
            result.strategy_name,
            m.total_return * 100.0,
            fmt_ratio(m.sharpe),
            fmt_ratio(m.sortino),
            fmt_ratio(m.calmar),
            m.max_drawdown * 100.0,
            m.win_rate * 100.0,
            m.trade_count,
        ));
    }
    md.push('\n');

    if let Some(best) = table.best() {
        md.push_str(&format!("Best strategy: **{}**\n", best.strategy_name));
    }

    md
}
