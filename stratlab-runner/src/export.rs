//! Reporting and export: JSON, CSV, and Markdown artifact generation.
//!
//! - **JSON**: the full `RunResult` with schema versioning
//! - **CSV**: fill tape and equity curve
//! - **Markdown**: a human-readable run report
//!
//! Unknown schema versions are rejected on load.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::broker::Fill;
use crate::result::{EquityPoint, RunResult, SCHEMA_VERSION};

pub const MANIFEST_FILE: &str = "manifest.json";
pub const FILLS_FILE: &str = "fills.csv";
pub const EQUITY_FILE: &str = "equity.csv";
pub const REPORT_FILE: &str = "report.md";

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(result: &RunResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize RunResult to JSON")
}

/// Deserialize a `RunResult`, rejecting schema versions newer than this build.
pub fn import_json(json: &str) -> Result<RunResult> {
    let result: RunResult =
        serde_json::from_str(json).context("failed to deserialize RunResult from JSON")?;
    if result.schema_version > SCHEMA_VERSION {
        bail!(
            "unsupported schema version {} (max supported: {})",
            result.schema_version,
            SCHEMA_VERSION
        );
    }
    Ok(result)
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Columns: order_id, time, ticker, security_type, market, quantity, price,
/// notional, tag
pub fn export_fills_csv(fills: &[Fill]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "order_id",
        "time",
        "ticker",
        "security_type",
        "market",
        "quantity",
        "price",
        "notional",
        "tag",
    ])?;
    for f in fills {
        wtr.write_record([
            &f.order_id.to_string(),
            &f.time.to_rfc3339(),
            &f.symbol.ticker,
            f.symbol.security_type.as_str(),
            f.symbol.market.as_str(),
            &format!("{:.6}", f.quantity),
            &format!("{:.6}", f.price),
            &format!("{:.2}", f.notional()),
            f.tag.as_deref().unwrap_or(""),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

pub fn export_equity_csv(curve: &[EquityPoint]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["time", "cash", "holdings_value", "total"])?;
    for p in curve {
        wtr.write_record([
            &p.time.to_rfc3339(),
            &format!("{:.2}", p.cash),
            &format!("{:.2}", p.holdings_value),
            &format!("{:.2}", p.total),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── Artifact bundle ────────────────────────────────────────────────

/// Save the artifact set under `output_dir/<short config hash>/`.
///
/// Re-running the same config overwrites the previous artifacts. Returns the
/// directory path.
pub fn save_artifacts(result: &RunResult, output_dir: &Path) -> Result<PathBuf> {
    let short = &result.config_hash[..result.config_hash.len().min(12)];
    let run_dir = output_dir.join(short);
    std::fs::create_dir_all(&run_dir)
        .with_context(|| format!("failed to create artifact dir: {}", run_dir.display()))?;

    let files = [
        (MANIFEST_FILE, export_json(result)?),
        (FILLS_FILE, export_fills_csv(&result.fills)?),
        (EQUITY_FILE, export_equity_csv(&result.equity_curve)?),
        (REPORT_FILE, generate_report(result)),
    ];
    for (name, content) in files {
        let path = run_dir.join(name);
        std::fs::write(&path, content)
            .with_context(|| format!("failed to write {}", path.display()))?;
    }
    Ok(run_dir)
}

pub fn load_artifacts(dir: &Path) -> Result<RunResult> {
    let manifest_path = dir.join(MANIFEST_FILE);
    let json = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("failed to read {}", manifest_path.display()))?;
    import_json(&json)
}

// ─── Markdown report ────────────────────────────────────────────────

pub fn generate_report(result: &RunResult) -> String {
    let mut md = String::with_capacity(2048);

    md.push_str("# Simulation Report\n\n");

    md.push_str("## Run\n\n");
    md.push_str("| Field | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Config Hash | {} |\n", result.config_hash));
    md.push_str(&format!("| Mode | {} |\n", result.mode));
    md.push_str(&format!("| Period | {} to {} |\n", result.start, result.end));
    md.push_str(&format!(
        "| Ticks | {} ({} processed, {} refresh only, {} disabled) |\n",
        result.ticks.total(),
        result.ticks.processed,
        result.ticks.refresh_only,
        result.ticks.disabled
    ));
    md.push_str(&format!("| Universe Refreshes | {} |\n", result.universe_refreshes));
    md.push('\n');

    md.push_str("## Activity\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Insights | {} |\n", result.insights_generated));
    md.push_str(&format!("| Orders | {} |\n", result.orders_submitted));
    md.push_str(&format!("| Fills | {} |\n", result.fills.len()));
    md.push_str(&format!("| Rejections | {} |\n", result.rejections.len()));
    md.push_str(&format!("| Initial Cash | ${:.2} |\n", result.initial_cash));
    md.push_str(&format!("| Final Value | ${:.2} |\n", result.final_value));
    md.push_str(&format!(
        "| Total Return | {:.2}% |\n",
        result.total_return() * 100.0
    ));
    md.push('\n');

    if !result.positions.is_empty() {
        md.push_str("## Positions\n\n");
        md.push_str("| Symbol | Quantity | Mark | Value |\n");
        md.push_str("| --- | ---: | ---: | ---: |\n");
        for p in &result.positions {
            md.push_str(&format!(
                "| {} | {:.2} | {:.2} | {:.2} |\n",
                p.symbol,
                p.quantity,
                p.mark,
                p.market_value()
            ));
        }
        md.push('\n');
    }

    if !result.security_changes.is_empty() {
        md.push_str("## Security Changes\n\n");
        for change in &result.security_changes {
            let join = |symbols: &[stratlab_core::domain::Symbol]| {
                symbols
                    .iter()
                    .map(|s| s.ticker.as_str())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            md.push_str(&format!(
                "- {}: added [{}] removed [{}]\n",
                change.time,
                join(&change.added),
                join(&change.removed)
            ));
        }
        md.push('\n');
    }

    if !result.rejections.is_empty() {
        md.push_str("## Rejected Orders\n\n");
        for r in &result.rejections {
            md.push_str(&format!(
                "- {} {} {:.2}: {}\n",
                r.time, r.symbol, r.quantity, r.reason
            ));
        }
        md.push('\n');
    }

    md
}
