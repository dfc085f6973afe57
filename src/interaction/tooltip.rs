//! Tooltip content for the node under the pointer.

use crate::color::Color;
use crate::engine::{BarData, Flamegraph};
use crate::format::{diff_percent, format_percent, get_formatter, number_with_commas, ratio_to_percent};
use crate::model::ProfileKind;
use serde::Serialize;

/// Signed change shown next to the title of a diff tooltip
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipDiff {
    pub text: String,
    /// `None` when the share did not change
    pub color: Option<Color>,
}

/// One table row: title, baseline value and, for diffs, the comparison value
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipRow {
    pub title: String,
    pub baseline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<TooltipDiff>,
    pub rows: Vec<TooltipRow>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    content: Option<TooltipContent>,
}

impl Tooltip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_mouse_move(&mut self, engine: &Flamegraph, x: f64, y: f64) {
        self.content = engine
            .xy_to_bar_data(x, y)
            .map(|data| tooltip_content(engine, &data));
    }

    pub fn on_mouse_out(&mut self) {
        self.content = None;
    }

    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&TooltipContent> {
        self.content.as_ref()
    }
}

/// Build the tooltip for `data`
pub fn tooltip_content(engine: &Flamegraph, data: &BarData) -> TooltipContent {
    let fb = engine.flamebearer();
    let sample_rate = f64::from(fb.sample_rate());
    let formatter = get_formatter(fb.num_ticks() as f64, sample_rate, fb.units());
    let (percent_title, value_title) = fb.units().titles();

    match (data, fb.kind()) {
        (
            BarData::Double {
                name,
                total_left,
                total_right,
                ..
            },
            ProfileKind::Double {
                left_ticks,
                right_ticks,
            },
        ) => {
            let left_percent = ratio_to_percent(*total_left as f64 / left_ticks.max(1) as f64);
            let right_percent = ratio_to_percent(*total_right as f64 / right_ticks.max(1) as f64);
            let change = diff_percent(left_percent, right_percent);

            let palette = &engine.config().diff_palette;
            let color = if change > 0.0 {
                Some(palette.bad)
            } else if change < 0.0 {
                Some(palette.good)
            } else {
                None
            };

            let text = if *total_left == 0 {
                "(new)".to_string()
            } else if *total_right == 0 {
                "(removed)".to_string()
            } else if change > 0.0 {
                format!("(+{:.2}%)", change)
            } else if change < 0.0 {
                format!("({:.2}%)", change)
            } else {
                String::new()
            };

            TooltipContent {
                title: name.clone(),
                diff: Some(TooltipDiff { text, color }),
                rows: vec![
                    TooltipRow {
                        title: percent_title.to_string(),
                        baseline: format!("{}%", left_percent),
                        comparison: Some(format!("{}%", right_percent)),
                    },
                    TooltipRow {
                        title: value_title.to_string(),
                        baseline: formatter.format(*total_left as f64, sample_rate),
                        comparison: Some(formatter.format(*total_right as f64, sample_rate)),
                    },
                    TooltipRow {
                        title: "Samples".to_string(),
                        baseline: number_with_commas(*total_left as i64),
                        comparison: Some(number_with_commas(*total_right as i64)),
                    },
                ],
            }
        }
        _ => {
            let (name, total) = match data {
                BarData::Single { name, total, .. } => (name, *total),
                BarData::Double { name, bar_total, .. } => (name, *bar_total),
            };
            let ratio = total as f64 / fb.num_ticks() as f64;

            TooltipContent {
                title: name.clone(),
                diff: None,
                rows: vec![
                    TooltipRow {
                        title: percent_title.to_string(),
                        baseline: format_percent(ratio),
                        comparison: None,
                    },
                    TooltipRow {
                        title: value_title.to_string(),
                        baseline: formatter.format(total as f64, sample_rate),
                        comparison: None,
                    },
                    TooltipRow {
                        title: "Samples".to_string(),
                        baseline: number_with_commas(total as i64),
                        comparison: None,
                    },
                ],
            }
        }
    }
}
