//! Stateful flamegraph engine.
//!
//! Owns one decoded [`Flamebearer`], the current [`ViewState`] and the canvas
//! width. Everything that maps between ticks and pixels goes through the same
//! [`Viewport`], so drawn bars and hit regions cannot drift apart.

use super::collapse::is_collapsed;
use super::state::{BarIndex, ViewState};
use super::viewport::{focus_offset, row_y, Viewport};
use crate::codec::DoubleLayout;
use crate::fit::FitMode;
use crate::model::{Flamebearer, ProfileKind};
use crate::render::canvas::{render_canvas, FrameStats, RenderInput};
use crate::render::surface::Surface;
use crate::utils::config::{RenderConfig, BAR_HEIGHT, PX_PER_LEVEL};
use crate::utils::error::{EngineError, RenderError};
use log::{debug, warn};
use serde::Serialize;

/// Box of a bar in CSS pixels, for hover overlays
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BarPosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// Summary of the node under the pointer, for tooltips
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "format", rename_all = "lowercase")]
pub enum BarData {
    Single {
        name: String,
        offset: u64,
        #[serde(rename = "self")]
        self_ticks: u64,
        total: u64,
    },
    #[serde(rename_all = "camelCase")]
    Double {
        name: String,
        bar_total: u64,
        total_left: u64,
        total_right: u64,
        /// `totalRight - totalLeft`
        total_diff: i64,
    },
}

impl BarData {
    pub fn name(&self) -> &str {
        match self {
            BarData::Single { name, .. } | BarData::Double { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Flamegraph {
    flamebearer: Flamebearer,
    state: ViewState,
    width: f64,
    fit_mode: FitMode,
    highlight_query: Option<String>,
    config: RenderConfig,
}

impl Flamegraph {
    /// Create an engine, applying the initial focus and zoom in that order
    ///
    /// # Errors
    /// * `EngineError::InvalidWidth` - If `width` is not positive and finite
    /// * `EngineError::UnknownBar` / `ZeroWidthBar` / `ZoomAboveFocus` - If
    ///   an initial anchor cannot be applied
    pub fn new(
        flamebearer: Flamebearer,
        width: f64,
        fit_mode: FitMode,
        highlight_query: Option<String>,
        zoom: Option<BarIndex>,
        focus: Option<BarIndex>,
    ) -> Result<Self, EngineError> {
        check_width(width)?;

        let mut state = ViewState::identity();
        if let Some(bar) = focus {
            state = state.focus(&flamebearer, bar)?;
        }
        if let Some(bar) = zoom {
            state = state.zoom(&flamebearer, bar)?;
        }

        Ok(Self {
            flamebearer,
            state,
            width,
            fit_mode,
            highlight_query,
            config: RenderConfig::default(),
        })
    }

    pub fn with_config(mut self, config: RenderConfig) -> Self {
        self.config = config;
        self
    }

    pub fn flamebearer(&self) -> &Flamebearer {
        &self.flamebearer
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn fit_mode(&self) -> FitMode {
        self.fit_mode
    }

    pub fn highlight_query(&self) -> Option<&str> {
        self.highlight_query.as_deref()
    }

    pub fn set_fit_mode(&mut self, fit_mode: FitMode) {
        self.fit_mode = fit_mode;
    }

    pub fn set_highlight_query(&mut self, query: Option<String>) {
        self.highlight_query = query;
    }

    /// Swap in new profile data.
    ///
    /// The anchors survive when they still address nodes of the new data,
    /// and the window is recomputed from their new spans; otherwise the view
    /// resets.
    pub fn set_flamebearer(&mut self, flamebearer: Flamebearer) {
        self.state = if self.state.is_valid_for(&flamebearer) {
            self.state.rebase(&flamebearer).unwrap_or_else(|e| {
                warn!("View state does not fit the new profile ({}), resetting", e);
                ViewState::identity()
            })
        } else {
            warn!("View state does not fit the new profile, resetting");
            ViewState::identity()
        };
        self.flamebearer = flamebearer;
    }

    /// Change the canvas width; the caller debounces
    pub fn resize(&mut self, width: f64) -> Result<(), EngineError> {
        check_width(width)?;
        self.width = width;
        Ok(())
    }

    pub fn zoom(&mut self, bar: BarIndex) -> Result<(), EngineError> {
        self.state = self.state.zoom(&self.flamebearer, bar)?;
        debug!("Zoomed to {}: [{}, {}]", bar, self.state.range_min, self.state.range_max);
        Ok(())
    }

    pub fn focus(&mut self, bar: BarIndex) -> Result<(), EngineError> {
        self.state = self.state.focus(&self.flamebearer, bar)?;
        debug!("Focused on {} (top level {})", bar, self.state.top_level);
        Ok(())
    }

    pub fn clear_zoom(&mut self) {
        self.state = self.state.clear_zoom(&self.flamebearer);
    }

    pub fn reset(&mut self) {
        self.state = self.state.reset();
    }

    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.flamebearer.num_ticks(), &self.state)
    }

    pub fn px_per_tick(&self) -> f64 {
        self.viewport().px_per_tick()
    }

    pub fn tick_to_x(&self, tick: u64) -> f64 {
        self.viewport().tick_to_x(tick)
    }

    /// Paint the current view
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<FrameStats, RenderError> {
        render_canvas(
            surface,
            &RenderInput {
                flamebearer: &self.flamebearer,
                state: &self.state,
                width: self.width,
                fit_mode: self.fit_mode,
                highlight_query: self.highlight_query.as_deref(),
                config: &self.config,
            },
        )
    }

    /// Bar under `(x, y)`.
    ///
    /// `Ok(None)` when the point misses every clickable bar: beyond the right
    /// edge, below the last level, in a gap, on a collapsed run, or NaN.
    ///
    /// # Errors
    /// * `EngineError::NegativeCoordinate` - Callers must clamp before asking
    pub fn xy_to_bar(&self, x: f64, y: f64) -> Result<Option<BarIndex>, EngineError> {
        if x < 0.0 || y < 0.0 {
            return Err(EngineError::NegativeCoordinate { x, y });
        }
        if x.is_nan() || y.is_nan() || x > self.width {
            return Ok(None);
        }

        // The synthetic bar above a focus stands for the root
        if self.state.is_focused() && y <= BAR_HEIGHT {
            return Ok(Some(BarIndex::ROOT));
        }

        let row = ((y - focus_offset(&self.state)) / PX_PER_LEVEL).floor();
        if row < 0.0 {
            return Ok(None);
        }
        let Some(level) = (row as usize).checked_add(self.state.top_level) else {
            return Ok(None);
        };
        let Some(nodes) = self.flamebearer.level(level) else {
            return Ok(None);
        };

        Ok(self
            .binary_search_level(x, nodes)
            .map(|slot| BarIndex::new(level, slot)))
    }

    /// Never-failing variant of [`Self::xy_to_bar`] for pointer collaborators
    pub fn hit_test(&self, x: f64, y: f64) -> Option<BarIndex> {
        self.xy_to_bar(x, y).ok().flatten()
    }

    pub fn is_within_bounds(&self, x: f64, y: f64) -> bool {
        self.hit_test(x, y).is_some()
    }

    fn binary_search_level(&self, x: f64, nodes: &[u64]) -> Option<usize> {
        let layout = self.flamebearer.layout();
        let stride = layout.stride();
        let viewport = self.viewport();
        let px_per_tick = viewport.px_per_tick();

        let count = nodes.len() / stride;
        if count == 0 {
            return None;
        }
        let (mut lo, mut hi) = (0isize, count as isize - 1);

        while lo <= hi {
            let mid = (lo + hi) / 2;
            let j = mid as usize * stride;
            let offset = layout.offset(nodes, j);
            let total = layout.total(nodes, j);
            let x0 = viewport.tick_to_x(offset);
            let x1 = viewport.tick_to_x(offset + total);

            if x0 <= x && x <= x1 {
                return if is_collapsed(total, px_per_tick, self.config.collapse_threshold) {
                    None
                } else {
                    Some(j)
                };
            }
            if x0 > x {
                hi = mid - 1;
            } else {
                lo = mid + 1;
            }
        }
        None
    }

    /// Box of the bar under `(x, y)`, clamped to the canvas
    pub fn xy_to_bar_position(&self, x: f64, y: f64) -> Option<BarPosition> {
        let bar = self.hit_test(x, y)?;

        if bar.is_root() && self.state.is_focused() {
            return Some(BarPosition {
                x: 0.0,
                y: 0.0,
                width: self.width,
            });
        }

        let (offset, total) = self.flamebearer.bar_span(bar.level, bar.slot)?;
        let viewport = self.viewport();
        let x0 = viewport.tick_to_x(offset).max(0.0);
        let x1 = viewport.tick_to_x(offset + total);

        Some(BarPosition {
            x: x0,
            y: row_y(bar.level, &self.state),
            width: (x1 - x0).min(self.width),
        })
    }

    /// Node summary for the bar under `(x, y)`
    pub fn xy_to_bar_data(&self, x: f64, y: f64) -> Option<BarData> {
        self.hit_test(x, y).and_then(|bar| self.bar_data(bar))
    }

    /// Node summary for `bar`
    pub fn bar_data(&self, bar: BarIndex) -> Option<BarData> {
        let fb = &self.flamebearer;
        let nodes = fb.level(bar.level)?;
        if !fb.contains_bar(bar.level, bar.slot) {
            return None;
        }
        let name = fb.bar_name(bar.level, bar.slot).to_string();
        let layout = fb.layout();
        let j = bar.slot;

        Some(match fb.kind() {
            ProfileKind::Single => BarData::Single {
                name,
                offset: layout.offset(nodes, j),
                self_ticks: layout.self_ticks(nodes, j),
                total: layout.total(nodes, j),
            },
            ProfileKind::Double { .. } => BarData::Double {
                name,
                bar_total: DoubleLayout::total_left(nodes, j) + DoubleLayout::total_right(nodes, j),
                total_left: DoubleLayout::total_left(nodes, j),
                total_right: DoubleLayout::total_right(nodes, j),
                total_diff: DoubleLayout::total_diff(nodes, j),
            },
        })
    }
}

fn check_width(width: f64) -> Result<(), EngineError> {
    if width > 0.0 && width.is_finite() {
        Ok(())
    } else {
        Err(EngineError::InvalidWidth(width))
    }
}
