//! Configuration and constants for rendering and hit-testing.

use crate::color::{Color, DiffPalette};
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current flamebearer profile format version
pub const PROFILE_VERSION: u32 = 1;

/// Vertical distance between two rows
pub const PX_PER_LEVEL: f64 = 18.0;

/// Horizontal gap left between expanded bars
pub const GAP: f64 = 0.5;

/// Height of a drawn bar (a row minus the gap)
pub const BAR_HEIGHT: f64 = PX_PER_LEVEL - GAP;

/// Bars at or below this width (px) are fused into collapsed runs and are not clickable
pub const COLLAPSE_THRESHOLD: f64 = 5.0;

/// Bars narrower than this (px) get no label
pub const LABEL_THRESHOLD: f64 = 20.0;

/// Left margin for labels that fit
pub const FIT_MARGIN: f64 = 3.0;

/// Alpha applied to rows above the zoomed level
pub const DIMMED_ALPHA: f64 = 0.33;

/// Label font; must be monospaced, label fitting measures a single glyph
pub const LABEL_FONT: &str = "400 11.5px SFMono-Regular, Consolas, Liberation Mono, Menlo, monospace";

/// Fill for bars matching the search query (#48CE73)
pub const HIGHLIGHT_COLOR: Color = Color::rgb(72, 206, 115);

/// Fill for collapsed runs and bars outside an active search
pub const COLLAPSED_COLOR: Color = Color::rgba(200, 200, 200, 0.66);

/// Fill for the synthetic "collapsed ancestors" bar shown while focused
pub const FOCUS_BAR_COLOR: Color = Color::rgb(200, 200, 200);

/// Label text color
pub const LABEL_COLOR: Color = Color::rgb(0, 0, 0);

/// Tunable rendering parameters.
///
/// Row geometry (`PX_PER_LEVEL`, `BAR_HEIGHT`) is fixed; everything here only
/// changes what is fused, labelled or how it is colored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Collapse threshold in CSS pixels
    pub collapse_threshold: f64,

    /// Minimum bar width in CSS pixels before a label is drawn
    pub label_threshold: f64,

    /// Device pixel ratio of the target surface (> 1 doubles the backing size)
    pub device_pixel_ratio: f64,

    /// Relative change (in percent) at which diff colors saturate
    pub max_diff_percent: f64,

    /// Palette used for diff flamegraphs
    pub diff_palette: DiffPalette,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            collapse_threshold: COLLAPSE_THRESHOLD,
            label_threshold: LABEL_THRESHOLD,
            device_pixel_ratio: 1.0,
            max_diff_percent: 100.0,
            diff_palette: DiffPalette::default(),
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collapse_threshold(mut self, threshold: f64) -> Self {
        self.collapse_threshold = threshold;
        self
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.device_pixel_ratio = ratio;
        self
    }

    pub fn with_diff_palette(mut self, palette: DiffPalette) -> Self {
        self.diff_palette = palette;
        self
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.collapse_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "collapse_threshold must be non-negative, got {}",
                self.collapse_threshold
            )));
        }
        if !(self.label_threshold >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "label_threshold must be non-negative, got {}",
                self.label_threshold
            )));
        }
        if !(self.device_pixel_ratio > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "device_pixel_ratio must be positive, got {}",
                self.device_pixel_ratio
            )));
        }
        if !(self.max_diff_percent > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "max_diff_percent must be positive, got {}",
                self.max_diff_percent
            )));
        }
        Ok(())
    }
}

/// Load a render configuration from a TOML file
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::Invalid` - If a value is out of range
///
/// # Example
/// ```ignore
/// let config = load_render_config("render.toml")?;
/// ```
pub fn load_render_config(path: impl AsRef<Path>) -> Result<RenderConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: RenderConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_bar_height_leaves_gap() {
        assert_eq!(BAR_HEIGHT, 17.5);
    }

    #[test]
    fn test_load_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
collapse_threshold = 2.5
max_diff_percent = 50.0

[diff_palette]
name = "mono"
good = {{ r = 255, g = 255, b = 255 }}
neutral = {{ r = 128, g = 128, b = 128 }}
bad = {{ r = 0, g = 0, b = 0 }}
"#
        )
        .unwrap();

        let config = load_render_config(file.path()).unwrap();
        assert_eq!(config.collapse_threshold, 2.5);
        assert_eq!(config.label_threshold, LABEL_THRESHOLD);
        assert_eq!(config.max_diff_percent, 50.0);
        assert_eq!(config.diff_palette.neutral, Color::rgb(128, 128, 128));
    }

    #[test]
    fn test_rejects_negative_threshold() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "collapse_threshold = -1.0").unwrap();

        assert!(matches!(
            load_render_config(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "collapse_threshold = [").unwrap();

        assert!(matches!(
            load_render_config(file.path()),
            Err(ConfigError::ParseFailed(_))
        ));
    }
}
