//! Pointer-driven observers of the engine: hover highlight, tooltip,
//! context menu and click-to-zoom. None of them own flamegraph state.

pub mod context_menu;
pub mod highlight;
pub mod tooltip;

pub use context_menu::{ContextMenu, MenuAction, MenuEntry, MenuItem};
pub use highlight::Highlight;
pub use tooltip::{tooltip_content, Tooltip, TooltipContent, TooltipDiff, TooltipRow};

use crate::engine::Flamegraph;
use crate::utils::error::EngineError;

/// Zoom into the clicked bar; clicking the zoomed bar again undoes the zoom.
///
/// Returns whether the view changed.
pub fn on_click(engine: &mut Flamegraph, x: f64, y: f64) -> Result<bool, EngineError> {
    let Some(bar) = engine.hit_test(x, y) else {
        return Ok(false);
    };

    if engine.state().zoom == Some(bar) {
        engine.clear_zoom();
    } else {
        engine.zoom(bar)?;
    }
    Ok(true)
}
