use crate::model::Flamebearer;
use crate::output::read_profile;
use crate::utils::config::PROFILE_VERSION;
use anyhow::{Context, Result};
use colored::*;
use std::path::Path;

/// Read, decode and validate a profile file
pub fn load_flamebearer(path: &Path) -> Result<Flamebearer> {
    let profile = read_profile(path)
        .with_context(|| format!("Failed to read profile {}", path.display()))?;
    Flamebearer::from_profile(profile)
        .with_context(|| format!("Invalid flamebearer in {}", path.display()))
}

/// Validate a profile JSON file
pub fn validate_profile_file(file_path: &Path) -> Result<()> {
    println!("Validating profile: {}", file_path.display());

    let fb = load_flamebearer(file_path)?;

    println!("{}", "✓ Valid flamebearer profile".green());
    println!("  Format: {:?}", fb.format());
    println!("  Names: {}", fb.names().len());
    println!("  Levels: {}", fb.depth());
    println!("  Nodes: {}", fb.node_count());
    println!("  Total Ticks: {}", fb.num_ticks());
    println!("  Max Self: {}", fb.max_self());
    println!("  Units: {:?} @ {} Hz", fb.units(), fb.sample_rate());
    println!("  Spy: {}", fb.spy_name().as_str());

    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("flamebearer v{}", env!("CARGO_PKG_VERSION"));
    println!("Profile Format: v{}", PROFILE_VERSION);
    println!();
    println!("Flamegraph rendering and hit-testing for flamebearer profiles.");
}
