//! Render command implementation.
//!
//! The render command:
//! 1. Loads and decodes the profile
//! 2. Loads the render configuration
//! 3. Applies the initial focus and zoom
//! 4. Paints the flamegraph onto an SVG surface
//! 5. Writes the SVG file

use super::models::RenderArgs;
use super::utils::load_flamebearer;
use crate::engine::Flamegraph;
use crate::output::write_svg;
use crate::render::{FrameStats, SvgSurface};
use crate::utils::config::{load_render_config, RenderConfig};
use anyhow::{Context, Result};
use colored::*;
use log::{debug, info};
use std::time::Instant;

/// Execute the render command
///
/// **Public** - main entry point called from main.rs
///
/// # Errors
/// * Profile read or decode failures
/// * Invalid zoom/focus anchors
/// * File write errors
pub fn execute_render(args: RenderArgs) -> Result<FrameStats> {
    let start_time = Instant::now();

    info!("Rendering flamegraph for: {}", args.input.display());

    // Step 1: Load profile
    info!("Step 1/4: Loading profile...");
    let fb = load_flamebearer(&args.input)?;
    debug!(
        "Decoded {} levels, {} nodes, {} ticks",
        fb.depth(),
        fb.node_count(),
        fb.num_ticks()
    );

    // Step 2: Configuration
    let config = match &args.config {
        Some(path) => load_render_config(path)
            .with_context(|| format!("Failed to load render config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    // Step 3: Engine
    info!("Step 2/4: Applying view state...");
    let title = fb.metadata().name.clone();
    let engine = Flamegraph::new(
        fb,
        args.width,
        args.fit_mode,
        args.highlight.clone(),
        args.zoom,
        args.focus,
    )
    .context("Failed to apply initial view")?
    .with_config(config);

    // Step 4: Paint
    info!("Step 3/4: Painting...");
    let mut surface = SvgSurface::default();
    if let Some(title) = title {
        surface = surface.with_title(title);
    }
    let stats = engine.render(&mut surface).context("Failed to render flamegraph")?;

    // Step 5: Write
    info!("Step 4/4: Writing SVG...");
    write_svg(&surface.finish(), &args.output).context("Failed to write flamegraph SVG")?;
    info!("✓ Flamegraph written to: {}", args.output.display());

    if args.print_summary {
        print_summary(&engine, &stats);
    }

    info!("Render completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(stats)
}

fn print_summary(engine: &Flamegraph, stats: &FrameStats) {
    let state = engine.state();
    println!("\n{}", "=".repeat(60));
    println!("{}", "FLAMEGRAPH SUMMARY".bold());
    println!("{}", "=".repeat(60));
    println!("Format:          {:?}", engine.flamebearer().format());
    println!("Total Ticks:     {}", engine.flamebearer().num_ticks());
    println!("Range:           [{:.4}, {:.4}]", state.range_min, state.range_max);
    match state.zoom {
        Some(bar) => println!("Zoom:            {}", bar.to_string().cyan()),
        None => println!("Zoom:            -"),
    }
    match state.focused_node {
        Some(bar) => println!("Focus:           {}", bar.to_string().cyan()),
        None => println!("Focus:           -"),
    }
    println!("Rows Drawn:      {}", stats.rows);
    println!("Bars Drawn:      {}", stats.bars);
    println!("Collapsed Runs:  {}", stats.collapsed_runs);
    println!("Labels:          {}", stats.labels);
    if stats.culled > 0 {
        println!("Culled:          {}", stats.culled.to_string().yellow());
    }
    println!("{}", "=".repeat(60));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::BarIndex;
    use std::fs;

    const PROFILE: &str = r#"{
        "version": 1,
        "flamebearer": {
            "names": ["total", "main", "work"],
            "levels": [[0, 100, 0, 0], [0, 100, 20, 1], [0, 80, 80, 2]],
            "numTicks": 100,
            "maxSelf": 80
        },
        "metadata": {"format": "single", "spyName": "gospy", "sampleRate": 100, "units": "samples", "name": "app.cpu"}
    }"#;

    #[test]
    fn test_render_writes_svg() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("profile.json");
        fs::write(&input, PROFILE).unwrap();

        let args = RenderArgs {
            input,
            output: dir.path().join("out/flame.svg"),
            width: 400.0,
            ..Default::default()
        };
        let output = args.output.clone();

        let stats = execute_render(args).unwrap();
        assert_eq!(stats.rows, 3);

        let svg = fs::read_to_string(output).unwrap();
        assert!(svg.contains("<title>app.cpu</title>"));
        assert!(svg.contains("work"));
    }

    #[test]
    fn test_render_rejects_unknown_zoom() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("profile.json");
        fs::write(&input, PROFILE).unwrap();

        let args = RenderArgs {
            input,
            output: dir.path().join("flame.svg"),
            zoom: Some(BarIndex::new(5, 0)),
            ..Default::default()
        };

        assert!(execute_render(args).is_err());
    }
}
