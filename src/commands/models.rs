use crate::engine::BarIndex;
use crate::fit::FitMode;
use std::path::PathBuf;

/// Default canvas width in CSS pixels
pub const DEFAULT_WIDTH: f64 = 1200.0;

/// Arguments for the render command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct RenderArgs {
    /// Flamebearer profile JSON
    pub input: PathBuf,

    /// Output path for the SVG flamegraph
    pub output: PathBuf,

    /// Canvas width in CSS pixels
    pub width: f64,

    /// Label overflow strategy
    pub fit_mode: FitMode,

    /// Highlight frames whose name contains this text
    pub highlight: Option<String>,

    /// Initial zoom anchor
    pub zoom: Option<BarIndex>,

    /// Initial focus anchor
    pub focus: Option<BarIndex>,

    /// Render configuration TOML (optional)
    pub config: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for RenderArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("profile.json"),
            output: PathBuf::from("flamegraph.svg"),
            width: DEFAULT_WIDTH,
            fit_mode: FitMode::Head,
            highlight: None,
            zoom: None,
            focus: None,
            config: None,
            print_summary: false,
        }
    }
}

/// Arguments for the inspect command
#[derive(Debug, Clone)]
pub struct InspectArgs {
    pub input: PathBuf,

    /// Pointer position in CSS pixels
    pub x: f64,
    pub y: f64,

    pub width: f64,
    pub zoom: Option<BarIndex>,
    pub focus: Option<BarIndex>,

    /// Write the hit report here instead of stdout
    pub output: Option<PathBuf>,
}

impl Default for InspectArgs {
    fn default() -> Self {
        Self {
            input: PathBuf::from("profile.json"),
            x: 0.0,
            y: 0.0,
            width: DEFAULT_WIDTH,
            zoom: None,
            focus: None,
            output: None,
        }
    }
}
