//! Inspect command implementation.
//! Hit-tests one pointer position and reports what a tooltip would show.

use super::models::InspectArgs;
use super::utils::load_flamebearer;
use crate::engine::{BarData, BarIndex, BarPosition, Flamegraph};
use crate::fit::FitMode;
use crate::interaction::{tooltip_content, TooltipContent};
use crate::output::write_report;
use anyhow::{Context, Result};
use colored::*;
use log::info;
use serde::Serialize;

/// Result of hit-testing one position
#[derive(Debug, Clone, Serialize)]
pub struct HitReport {
    pub x: f64,
    pub y: f64,
    /// `None` when nothing clickable is under the pointer
    pub bar: Option<BarIndex>,
    pub data: Option<BarData>,
    pub position: Option<BarPosition>,
    pub tooltip: Option<TooltipContent>,
    /// ISO 8601 timestamp
    pub generated_at: String,
}

/// Build the report for `(x, y)` against an engine
pub fn hit_report(engine: &Flamegraph, x: f64, y: f64) -> Result<HitReport> {
    let bar = engine
        .xy_to_bar(x, y)
        .with_context(|| format!("Cannot hit-test ({}, {})", x, y))?;
    let data = bar.and_then(|bar| engine.bar_data(bar));
    let position = bar.and_then(|_| engine.xy_to_bar_position(x, y));
    let tooltip = data.as_ref().map(|data| tooltip_content(engine, data));

    Ok(HitReport {
        x,
        y,
        bar,
        data,
        position,
        tooltip,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Execute the inspect command
pub fn execute_inspect(args: InspectArgs) -> Result<HitReport> {
    let fb = load_flamebearer(&args.input)?;
    let engine = Flamegraph::new(fb, args.width, FitMode::Head, None, args.zoom, args.focus)
        .context("Failed to apply initial view")?;

    let report = hit_report(&engine, args.x, args.y)?;

    match &args.output {
        Some(path) => {
            write_report(&report, path).context("Failed to write hit report JSON")?;
            println!("🔎 Hit report written to {}", path.display().to_string().cyan());
        }
        None => print_report(&report),
    }

    info!("Inspected ({}, {}): {:?}", args.x, args.y, report.bar);
    Ok(report)
}

fn print_report(report: &HitReport) {
    let (Some(bar), Some(tooltip)) = (report.bar, &report.tooltip) else {
        println!("{}", format!("No bar at ({}, {})", report.x, report.y).yellow());
        return;
    };

    println!("{} {}", tooltip.title.bold(), format!("[{}]", bar).dimmed());
    if let Some(diff) = &tooltip.diff {
        println!("  {}", diff.text);
    }
    for row in &tooltip.rows {
        match &row.comparison {
            Some(comparison) => println!("  {:<24} {:>16} {:>16}", row.title, row.baseline, comparison),
            None => println!("  {:<24} {:>16}", row.title, row.baseline),
        }
    }
    if let Some(position) = &report.position {
        println!(
            "  at x = {:.1}, y = {:.1}, width = {:.1}",
            position.x, position.y, position.width
        );
    }
}
