//! Diverging color scale for diff flamegraphs.

use super::rgba::Color;
use log::warn;
use serde::{Deserialize, Serialize};

/// Three-stop palette: improvement, no change, regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffPalette {
    pub name: String,
    pub good: Color,
    pub neutral: Color,
    pub bad: Color,
}

impl Default for DiffPalette {
    fn default() -> Self {
        Self {
            name: "default".to_string(),
            good: Color::rgb(0, 200, 0),
            neutral: Color::rgb(200, 200, 200),
            bad: Color::rgb(200, 0, 0),
        }
    }
}

/// Maps a relative change (percent) onto a palette
#[derive(Debug, Clone, PartialEq)]
pub struct DiffColorScale {
    pub palette: DiffPalette,
    /// Absolute change at which the color saturates
    pub max_percent: f64,
}

impl Default for DiffColorScale {
    fn default() -> Self {
        Self {
            palette: DiffPalette::default(),
            max_percent: 100.0,
        }
    }
}

impl DiffColorScale {
    pub fn new(palette: DiffPalette, max_percent: f64) -> Self {
        Self {
            palette,
            max_percent,
        }
    }

    /// Color for a relative change of `percent`; positive values are regressions
    pub fn color(&self, percent: f64, alpha: f64) -> Color {
        let t = if percent.is_nan() {
            0.0
        } else {
            (percent / self.max_percent).clamp(-1.0, 1.0)
        };

        let target = if t > 0.0 {
            self.palette.bad
        } else {
            self.palette.good
        };

        self.palette
            .neutral
            .with_alpha(1.0)
            .mix(target.with_alpha(1.0), t.abs())
            .with_alpha(alpha)
    }

    /// Color for a node whose share went from `left_percent` to `right_percent`
    pub fn color_for_shares(&self, left_percent: f64, right_percent: f64, alpha: f64) -> Color {
        match relative_change(left_percent, right_percent) {
            Some(percent) => self.color(percent, alpha),
            None if right_percent > 0.0 => {
                warn!(
                    "node absent from the baseline but present in the comparison ({:.2}%), coloring as maximal regression",
                    right_percent
                );
                self.palette.bad.with_alpha(alpha)
            }
            None => self.palette.neutral.with_alpha(alpha),
        }
    }
}

/// `(right - left) / left * 100`, or `None` when `left` is zero
pub fn relative_change(left: f64, right: f64) -> Option<f64> {
    if left == 0.0 {
        None
    } else {
        Some((right - left) / left * 100.0)
    }
}

/// Color for a relative change using the default palette and cap
pub fn color_from_percentage(percent: f64, alpha: f64) -> Color {
    DiffColorScale::default().color(percent, alpha)
}

/// Color for a left/right share pair using the default palette and cap
pub fn color_based_on_diff_percent(left_percent: f64, right_percent: f64, alpha: f64) -> Color {
    DiffColorScale::default().color_for_shares(left_percent, right_percent, alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_percentage_literals() {
        assert_eq!(
            color_from_percentage(0.0, 0.8).to_string(),
            "rgba(200,200,200,0.8)"
        );
        assert_eq!(
            color_from_percentage(100.0, 0.8).to_string(),
            "rgba(200,0,0,0.8)"
        );
        assert_eq!(
            color_from_percentage(-50.0, 0.8).to_string(),
            "rgba(100,200,100,0.8)"
        );
    }

    #[test]
    fn test_saturates_beyond_cap() {
        assert_eq!(color_from_percentage(400.0, 1.0), Color::rgb(200, 0, 0));
        assert_eq!(color_from_percentage(-100.0, 1.0), Color::rgb(0, 200, 0));
    }

    #[test]
    fn test_zero_baseline() {
        assert_eq!(
            color_based_on_diff_percent(0.0, 0.0, 1.0),
            Color::rgb(200, 200, 200)
        );
        assert_eq!(
            color_based_on_diff_percent(0.0, 12.0, 1.0),
            Color::rgb(200, 0, 0)
        );
    }

    #[test]
    fn test_shares_use_relative_change() {
        // 10% -> 15% is a 50% regression
        assert_eq!(
            color_based_on_diff_percent(10.0, 15.0, 1.0),
            Color::rgb(200, 100, 100)
        );
    }

    #[test]
    fn test_custom_palette() {
        let scale = DiffColorScale::new(
            DiffPalette {
                name: "mono".to_string(),
                good: Color::rgb(255, 255, 255),
                neutral: Color::rgb(128, 128, 128),
                bad: Color::rgb(0, 0, 0),
            },
            100.0,
        );
        assert_eq!(scale.color(-100.0, 1.0), Color::rgb(255, 255, 255));
        assert_eq!(scale.color(0.0, 1.0), Color::rgb(128, 128, 128));
        assert_eq!(scale.color(100.0, 1.0), Color::rgb(0, 0, 0));
    }
}
