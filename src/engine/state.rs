//! Zoom/focus view state and its transitions.
//!
//! Transitions are pure: each takes the current state by reference and
//! returns the next one, leaving the caller to decide when to commit it.

use crate::model::Flamebearer;
use crate::utils::error::EngineError;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Address of a node: depth and flat-array position within that level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarIndex {
    pub level: usize,
    pub slot: usize,
}

impl BarIndex {
    /// The synthetic "total" node
    pub const ROOT: BarIndex = BarIndex { level: 0, slot: 0 };

    pub const fn new(level: usize, slot: usize) -> Self {
        Self { level, slot }
    }

    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }
}

impl fmt::Display for BarIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.level, self.slot)
    }
}

impl FromStr for BarIndex {
    type Err = String;

    /// Parses `"level,slot"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (level, slot) = s
            .split_once(',')
            .ok_or_else(|| format!("expected LEVEL,SLOT, got '{}'", s))?;
        let level = level
            .trim()
            .parse()
            .map_err(|e| format!("invalid level '{}': {}", level, e))?;
        let slot = slot
            .trim()
            .parse()
            .map_err(|e| format!("invalid slot '{}': {}", slot, e))?;
        Ok(Self { level, slot })
    }
}

/// Visible window of the flamegraph
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub zoom: Option<BarIndex>,
    pub focused_node: Option<BarIndex>,
    /// Left edge of the window as a fraction of `numTicks`
    pub range_min: f64,
    /// Right edge of the window as a fraction of `numTicks`
    pub range_max: f64,
    /// First rendered level
    pub top_level: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::identity()
    }
}

fn span_of(fb: &Flamebearer, bar: BarIndex) -> Result<(u64, u64), EngineError> {
    let (offset, total) = fb.bar_span(bar.level, bar.slot).ok_or(EngineError::UnknownBar {
        level: bar.level,
        slot: bar.slot,
    })?;
    if total == 0 {
        return Err(EngineError::ZeroWidthBar {
            level: bar.level,
            slot: bar.slot,
        });
    }
    Ok((offset, total))
}

fn range_of(fb: &Flamebearer, offset: u64, total: u64) -> (f64, f64) {
    let num_ticks = fb.num_ticks() as f64;
    (
        offset as f64 / num_ticks,
        (offset + total) as f64 / num_ticks,
    )
}

impl ViewState {
    pub const fn identity() -> Self {
        Self {
            zoom: None,
            focused_node: None,
            range_min: 0.0,
            range_max: 1.0,
            top_level: 0,
        }
    }

    /// Differs from identity; drives the "reset view" affordance
    pub fn is_dirty(&self) -> bool {
        *self != Self::identity()
    }

    pub fn is_focused(&self) -> bool {
        self.focused_node.is_some()
    }

    pub fn reset(&self) -> Self {
        Self::identity()
    }

    /// Level of the zoom anchor, 0 when not zoomed
    pub fn selected_level(&self) -> usize {
        self.zoom.map_or(0, |z| z.level)
    }

    /// Rescale the window to `bar`'s span
    pub fn zoom(&self, fb: &Flamebearer, bar: BarIndex) -> Result<Self, EngineError> {
        if bar.is_root() {
            return Ok(Self::identity());
        }

        let (offset, total) = span_of(fb, bar)?;
        if let Some(focus) = self.focused_node {
            if bar.level < focus.level {
                return Err(EngineError::ZoomAboveFocus {
                    zoom: bar.level,
                    focus: focus.level,
                });
            }
        }

        let (range_min, range_max) = range_of(fb, offset, total);
        Ok(Self {
            zoom: Some(bar),
            range_min,
            range_max,
            ..*self
        })
    }

    /// Make `bar` the topmost rendered row.
    ///
    /// A zoom anchored at or above the new focus is dropped, as is a deeper
    /// anchor that lies outside the focused span. The window becomes the
    /// focused span unless a zoom survives.
    pub fn focus(&self, fb: &Flamebearer, bar: BarIndex) -> Result<Self, EngineError> {
        if bar.is_root() {
            return Ok(Self::identity());
        }

        let (offset, total) = span_of(fb, bar)?;

        let zoom = self.zoom.and_then(|z| {
            if z.level <= bar.level {
                debug!("Focus on {} clears zoom anchored at {}", bar, z);
                return None;
            }
            match fb.bar_span(z.level, z.slot) {
                Some((z_offset, z_total))
                    if offset <= z_offset && z_offset + z_total <= offset + total =>
                {
                    Some((z, z_offset, z_total))
                }
                _ => {
                    warn!("Zoom anchor {} lies outside focused node {}, dropping it", z, bar);
                    None
                }
            }
        });

        let (anchor, (range_min, range_max)) = match zoom {
            Some((z, z_offset, z_total)) => (Some(z), range_of(fb, z_offset, z_total)),
            None => (None, range_of(fb, offset, total)),
        };

        Ok(Self {
            zoom: anchor,
            focused_node: Some(bar),
            range_min,
            range_max,
            top_level: bar.level,
        })
    }

    /// Drop the zoom, falling back to the focused span (or identity)
    pub fn clear_zoom(&self, fb: &Flamebearer) -> Self {
        match self.focused_node {
            Some(bar) => match fb.bar_span(bar.level, bar.slot) {
                Some((offset, total)) if total > 0 => {
                    let (range_min, range_max) = range_of(fb, offset, total);
                    Self {
                        zoom: None,
                        range_min,
                        range_max,
                        ..*self
                    }
                }
                _ => Self::identity(),
            },
            None => Self::identity(),
        }
    }

    /// Recompute the window from the anchors against `fb`, focus first
    pub fn rebase(&self, fb: &Flamebearer) -> Result<Self, EngineError> {
        let mut state = Self::identity();
        if let Some(bar) = self.focused_node {
            state = state.focus(fb, bar)?;
        }
        if let Some(bar) = self.zoom {
            state = state.zoom(fb, bar)?;
        }
        Ok(state)
    }

    /// Check that every anchor still addresses a node of `fb`
    pub fn is_valid_for(&self, fb: &Flamebearer) -> bool {
        let valid = |bar: Option<BarIndex>| {
            bar.map_or(true, |b| {
                fb.bar_span(b.level, b.slot).is_some_and(|(_, total)| total > 0)
            })
        };
        valid(self.zoom) && valid(self.focused_node) && self.top_level < fb.depth()
    }
}
