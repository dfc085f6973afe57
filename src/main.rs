//! flamebearer CLI
//!
//! Renders flamebearer profiles to SVG flamegraphs and answers
//! hit-test queries against them.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use flamebearer_canvas::commands::{
    display_version, execute_inspect, execute_render, validate_profile_file, InspectArgs,
    RenderArgs,
};
use flamebearer_canvas::engine::BarIndex;
use flamebearer_canvas::fit::FitMode;

/// flamebearer - flamegraph rendering for flamebearer profiles
#[derive(Parser, Debug)]
#[command(name = "flamebearer")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a profile to an SVG flamegraph
    Render {
        /// Path to profile JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Output path for SVG flamegraph
        #[arg(short, long, default_value = "flamegraph.svg")]
        output: PathBuf,

        /// Canvas width in pixels
        #[arg(long, default_value = "1200")]
        width: f64,

        /// Which end of a label to keep when it does not fit
        #[arg(long, value_enum, default_value = "head")]
        fit_mode: FitMode,

        /// Highlight frames whose name contains this text
        #[arg(long)]
        highlight: Option<String>,

        /// Zoom into a bar, as LEVEL,SLOT
        #[arg(long)]
        zoom: Option<BarIndex>,

        /// Focus on a bar, as LEVEL,SLOT
        #[arg(long)]
        focus: Option<BarIndex>,

        /// Render configuration TOML
        #[arg(short, long, env = "FLAMEBEARER_CONFIG")]
        config: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Report the bar under a pointer position
    Inspect {
        /// Path to profile JSON file
        #[arg(short, long)]
        input: PathBuf,

        /// Pointer x in pixels
        #[arg(short, allow_negative_numbers = true)]
        x: f64,

        /// Pointer y in pixels
        #[arg(short, allow_negative_numbers = true)]
        y: f64,

        /// Canvas width in pixels
        #[arg(long, default_value = "1200")]
        width: f64,

        /// Zoom into a bar, as LEVEL,SLOT
        #[arg(long)]
        zoom: Option<BarIndex>,

        /// Focus on a bar, as LEVEL,SLOT
        #[arg(long)]
        focus: Option<BarIndex>,

        /// Write the report as JSON instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Validate a profile JSON file
    Validate {
        /// Path to profile JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Render {
            input,
            output,
            width,
            fit_mode,
            highlight,
            zoom,
            focus,
            config,
            summary,
        } => {
            let args = RenderArgs {
                input,
                output,
                width,
                fit_mode,
                highlight,
                zoom,
                focus,
                config,
                print_summary: summary,
            };
            execute_render(args)?;
        }

        Commands::Inspect {
            input,
            x,
            y,
            width,
            zoom,
            focus,
            output,
        } => {
            let args = InspectArgs {
                input,
                x,
                y,
                width,
                zoom,
                focus,
                output,
            };
            execute_inspect(args)?;
        }

        Commands::Validate { file } => {
            validate_profile_file(&file)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
