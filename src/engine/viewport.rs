//! Tick to pixel transform for one view state and canvas width.

use super::state::ViewState;
use crate::utils::config::{BAR_HEIGHT, PX_PER_LEVEL};

/// The single place where scale and pan combine; drawing and hit-testing
/// both go through it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub num_ticks: f64,
    pub range_min: f64,
    pub range_max: f64,
}

impl Viewport {
    pub fn new(width: f64, num_ticks: u64, state: &ViewState) -> Self {
        Self {
            width,
            num_ticks: num_ticks as f64,
            range_min: state.range_min,
            range_max: state.range_max,
        }
    }

    /// `width / numTicks / (rangeMax - rangeMin)`
    pub fn px_per_tick(&self) -> f64 {
        self.width / self.num_ticks / (self.range_max - self.range_min)
    }

    /// `(tick - numTicks * rangeMin) * pxPerTick`
    pub fn tick_to_x(&self, tick: u64) -> f64 {
        (tick as f64 - self.num_ticks * self.range_min) * self.px_per_tick()
    }
}

/// Height taken by the synthetic "collapsed ancestors" bar while focused
pub fn focus_offset(state: &ViewState) -> f64 {
    if state.is_focused() {
        BAR_HEIGHT
    } else {
        0.0
    }
}

/// Top edge of the row showing `level`
pub fn row_y(level: usize, state: &ViewState) -> f64 {
    (level.saturating_sub(state.top_level)) as f64 * PX_PER_LEVEL + focus_offset(state)
}

/// CSS height needed to draw `depth` levels under `state`
pub fn canvas_height(depth: usize, state: &ViewState) -> f64 {
    PX_PER_LEVEL * depth.saturating_sub(state.top_level) as f64 + focus_offset(state)
}
