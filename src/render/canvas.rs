//! Canvas rasterization of the visible levels.
//!
//! Walks every level from the top row down, fuses narrow siblings into
//! collapsed runs, picks a fill per run and fits a label into the wide ones.

use super::surface::{Rect, Surface};
use crate::codec::{BarLayout, DoubleLayout, SingleLayout};
use crate::color::{color_based_on_package_name, package_name_from_stack_trace, Color, DiffColorScale, SpyName};
use crate::engine::collapse::{level_runs, CollapseRule};
use crate::engine::state::ViewState;
use crate::engine::viewport::{canvas_height, row_y, Viewport};
use crate::fit::{fit_to_canvas_rect, FitMode, FitRequest};
use crate::format::{bar_label, get_formatter, ratio_to_percent, Formatter};
use crate::model::{Flamebearer, ProfileKind};
use crate::utils::config::{
    RenderConfig, BAR_HEIGHT, COLLAPSED_COLOR, DIMMED_ALPHA, FOCUS_BAR_COLOR, GAP, HIGHLIGHT_COLOR,
    LABEL_COLOR, LABEL_FONT,
};
use crate::utils::error::RenderError;
use log::debug;

/// Everything one frame depends on
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub flamebearer: &'a Flamebearer,
    pub state: &'a ViewState,
    /// Canvas width in CSS pixels
    pub width: f64,
    pub fit_mode: FitMode,
    pub highlight_query: Option<&'a str>,
    pub config: &'a RenderConfig,
}

/// Counters for one painted frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub rows: usize,
    pub bars: usize,
    pub collapsed_runs: usize,
    pub labels: usize,
    /// Runs entirely outside the canvas
    pub culled: usize,
}

/// Fill for an expanded (non-collapsed) bar
pub trait BarColoring<L: BarLayout> {
    /// `highlight` is `None` without an active query, else the bar's membership
    fn color(&self, level: &[u64], j: usize, names: &[String], alpha: f64, highlight: Option<bool>) -> Color;
}

/// Hash color of the frame's package
pub struct PackageColoring {
    pub spy_name: SpyName,
}

impl<L: BarLayout> BarColoring<L> for PackageColoring {
    fn color(&self, level: &[u64], j: usize, names: &[String], alpha: f64, highlight: Option<bool>) -> Color {
        match highlight {
            Some(true) => HIGHLIGHT_COLOR,
            Some(false) => COLLAPSED_COLOR,
            None => {
                let name = names.get(L::name(level, j)).map(String::as_str).unwrap_or("");
                let package = package_name_from_stack_trace(self.spy_name, name);
                color_based_on_package_name(package, alpha)
            }
        }
    }
}

/// Diverging color from the change of a node's share between both sides
pub struct DiffColoring<'a> {
    pub scale: &'a DiffColorScale,
    pub left_ticks: u64,
    pub right_ticks: u64,
}

impl BarColoring<DoubleLayout> for DiffColoring<'_> {
    fn color(&self, level: &[u64], j: usize, _names: &[String], alpha: f64, _highlight: Option<bool>) -> Color {
        let left = DoubleLayout::total_left(level, j) as f64 / self.left_ticks.max(1) as f64;
        let right = DoubleLayout::total_right(level, j) as f64 / self.right_ticks.max(1) as f64;
        self.scale
            .color_for_shares(ratio_to_percent(left), ratio_to_percent(right), alpha)
    }
}

/// Paint one frame onto `surface`
///
/// # Errors
/// * `RenderError::ZeroWidth` - If the canvas width is not positive
/// * `RenderError::EmptyRange` - If the visible range is empty
pub fn render_canvas<S: Surface>(surface: &mut S, input: &RenderInput<'_>) -> Result<FrameStats, RenderError> {
    if !(input.width > 0.0 && input.width.is_finite()) {
        return Err(RenderError::ZeroWidth(input.width));
    }
    if input.state.range_min >= input.state.range_max {
        return Err(RenderError::EmptyRange {
            min: input.state.range_min,
            max: input.state.range_max,
        });
    }

    let fb = input.flamebearer;
    match fb.kind() {
        ProfileKind::Single => draw::<SingleLayout, _, _>(
            surface,
            input,
            &PackageColoring {
                spy_name: fb.spy_name(),
            },
        ),
        ProfileKind::Double {
            left_ticks,
            right_ticks,
        } => {
            let scale = DiffColorScale::new(
                input.config.diff_palette.clone(),
                input.config.max_diff_percent,
            );
            draw::<DoubleLayout, _, _>(
                surface,
                input,
                &DiffColoring {
                    scale: &scale,
                    left_ticks,
                    right_ticks,
                },
            )
        }
    }
}

fn draw<L, S, C>(surface: &mut S, input: &RenderInput<'_>, coloring: &C) -> Result<FrameStats, RenderError>
where
    L: BarLayout,
    S: Surface,
    C: BarColoring<L>,
{
    let fb = input.flamebearer;
    let state = input.state;
    let viewport = Viewport::new(input.width, fb.num_ticks(), state);
    let px_per_tick = viewport.px_per_tick();

    let height = canvas_height(fb.depth(), state);
    if input.config.device_pixel_ratio > 1.0 {
        surface.resize(input.width * 2.0, height * 2.0);
        surface.scale(2.0, 2.0);
    } else {
        surface.resize(input.width, height);
    }

    // Font first: the glyph width depends on it
    surface.set_font(LABEL_FONT);
    let char_size = surface.measure_text("a");

    let formatter = get_formatter(
        fb.num_ticks() as f64,
        f64::from(fb.sample_rate()),
        fb.units(),
    );
    let mut stats = FrameStats::default();

    if state.is_focused() {
        draw_focus_bar(surface, input, px_per_tick, char_size);
        stats.labels += 1;
    }

    let selected_level = state.selected_level();
    let query = input.highlight_query.filter(|q| !q.is_empty());
    let rule = CollapseRule::new(
        fb.names(),
        query,
        px_per_tick,
        input.config.collapse_threshold,
    );

    for (i, level) in fb.levels().iter().enumerate().skip(state.top_level) {
        stats.rows += 1;
        let y = row_y(i, state);
        let alpha = if selected_level > i { DIMMED_ALPHA } else { 1.0 };

        for run in level_runs::<L>(level, rule) {
            let x = viewport.tick_to_x(run.offset);
            let sw = run.ticks as f64 * px_per_tick - if run.collapsed { 0.0 } else { GAP };

            if x + sw < 0.0 || x > input.width {
                stats.culled += 1;
                continue;
            }

            let color = if run.collapsed {
                stats.collapsed_runs += 1;
                COLLAPSED_COLOR
            } else {
                coloring.color(level, run.start, fb.names(), alpha, query.map(|_| run.highlighted))
            };
            let rect = Rect::new(x, y, sw, BAR_HEIGHT);
            surface.fill_rect(rect, color);
            stats.bars += 1;

            if run.collapsed || sw < input.config.label_threshold {
                continue;
            }

            let short_name = fb
                .names()
                .get(L::name(level, run.start))
                .map(String::as_str)
                .unwrap_or("");
            let long_name = long_label(fb, short_name, run.ticks, &formatter);
            let fit = fit_to_canvas_rect(&FitRequest {
                mode: input.fit_mode,
                char_size,
                rect_width: sw,
                full_text: &long_name,
                short_text: short_name,
            });

            surface.fill_text_clipped(
                fit.text,
                x.max(0.0).round() + fit.margin_left,
                y + BAR_HEIGHT / 2.0 + 1.0,
                rect,
                LABEL_COLOR,
            );
            stats.labels += 1;
        }
    }

    debug!(
        "Rendered {} rows: {} bars ({} collapsed), {} labels, {} culled",
        stats.rows, stats.bars, stats.collapsed_runs, stats.labels, stats.culled
    );
    Ok(stats)
}

fn long_label(fb: &Flamebearer, name: &str, ticks: u64, formatter: &Formatter) -> String {
    let ratio = ticks as f64 / fb.num_ticks() as f64;
    bar_label(name, ratio, formatter, ticks, f64::from(fb.sample_rate()))
}

/// Label of the synthetic bar standing in for the ancestors above the focus
pub fn focus_bar_label(top_level: usize) -> String {
    format!("total ({} level(s) collapsed)", top_level.saturating_sub(1))
}

fn draw_focus_bar<S: Surface>(surface: &mut S, input: &RenderInput<'_>, px_per_tick: f64, char_size: f64) {
    let width = input.flamebearer.num_ticks() as f64 * px_per_tick;
    let rect = Rect::new(0.0, 0.0, width, BAR_HEIGHT);
    surface.fill_rect(rect, FOCUS_BAR_COLOR);

    let label = focus_bar_label(input.state.top_level);
    let fit = fit_to_canvas_rect(&FitRequest {
        mode: input.fit_mode,
        char_size,
        rect_width: width,
        full_text: &label,
        short_text: &label,
    });
    surface.fill_text_clipped(fit.text, fit.margin_left, BAR_HEIGHT / 2.0 + 1.0, rect, LABEL_COLOR);
}
