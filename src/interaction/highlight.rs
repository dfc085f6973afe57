//! Hover box drawn over the bar under the pointer.

use crate::engine::{BarPosition, Flamegraph};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlight {
    position: Option<BarPosition>,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Follow the pointer; hides itself when nothing clickable is hit
    pub fn on_mouse_move(&mut self, engine: &Flamegraph, x: f64, y: f64) {
        self.position = engine.xy_to_bar_position(x, y);
    }

    pub fn on_mouse_out(&mut self) {
        self.position = None;
    }

    pub fn is_visible(&self) -> bool {
        self.position.is_some()
    }

    pub fn position(&self) -> Option<BarPosition> {
        self.position
    }
}
