//! Right-click menu over the flamegraph.

use crate::engine::{BarIndex, Flamegraph};
use crate::fit::FitMode;
use crate::utils::error::EngineError;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    ResetView,
    FocusOnNode,
    CopyFunctionName,
    HighlightSimilarNodes,
    ToggleFitMode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub item: MenuItem,
    pub label: String,
    pub enabled: bool,
}

/// What the caller must do after an item was applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// The engine state changed; repaint
    Redraw,
    /// Put this text on the clipboard
    CopyToClipboard(String),
    /// Disabled entry, nothing happened
    Ignored,
}

/// Menu built for one pointer position
#[derive(Debug, Clone, PartialEq)]
pub struct ContextMenu {
    target: Option<BarIndex>,
    name: String,
    entries: Vec<MenuEntry>,
}

impl ContextMenu {
    /// Build the menu for `(x, y)`; node items are disabled off-node
    pub fn open(engine: &Flamegraph, x: f64, y: f64) -> Self {
        let target = engine.hit_test(x, y);
        let name = target
            .map(|bar| engine.flamebearer().bar_name(bar.level, bar.slot).to_string())
            .unwrap_or_default();
        let on_node = target.is_some();

        let highlight_label = if on_node && engine.highlight_query() == Some(name.as_str()) {
            "Clear highlight"
        } else {
            "Highlight similar nodes"
        };
        let fit_label = match engine.fit_mode() {
            FitMode::Head => "Show text tail first",
            FitMode::Tail => "Show text head first",
        };

        let entries = vec![
            MenuEntry {
                item: MenuItem::ResetView,
                label: "Reset View".to_string(),
                enabled: engine.is_dirty(),
            },
            MenuEntry {
                item: MenuItem::FocusOnNode,
                label: "Collapse nodes above".to_string(),
                enabled: on_node,
            },
            MenuEntry {
                item: MenuItem::CopyFunctionName,
                label: "Copy function name".to_string(),
                enabled: on_node,
            },
            MenuEntry {
                item: MenuItem::HighlightSimilarNodes,
                label: highlight_label.to_string(),
                enabled: on_node,
            },
            MenuEntry {
                item: MenuItem::ToggleFitMode,
                label: fit_label.to_string(),
                enabled: true,
            },
        ];

        Self {
            target,
            name,
            entries,
        }
    }

    pub fn target(&self) -> Option<BarIndex> {
        self.target
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn entry(&self, item: MenuItem) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.item == item)
    }

    /// Perform `item` against `engine`
    pub fn apply(&self, item: MenuItem, engine: &mut Flamegraph) -> Result<MenuAction, EngineError> {
        if !self.entry(item).is_some_and(|e| e.enabled) {
            return Ok(MenuAction::Ignored);
        }
        debug!("Context menu: {:?} on {:?}", item, self.target);

        match (item, self.target) {
            (MenuItem::ResetView, _) => {
                engine.reset();
                Ok(MenuAction::Redraw)
            }
            (MenuItem::FocusOnNode, Some(bar)) => {
                engine.focus(bar)?;
                Ok(MenuAction::Redraw)
            }
            (MenuItem::CopyFunctionName, Some(_)) => Ok(MenuAction::CopyToClipboard(self.name.clone())),
            (MenuItem::HighlightSimilarNodes, Some(_)) => {
                if engine.highlight_query() == Some(self.name.as_str()) {
                    engine.set_highlight_query(None);
                } else {
                    engine.set_highlight_query(Some(self.name.clone()));
                }
                Ok(MenuAction::Redraw)
            }
            (MenuItem::ToggleFitMode, _) => {
                let next = match engine.fit_mode() {
                    FitMode::Head => FitMode::Tail,
                    FitMode::Tail => FitMode::Head,
                };
                engine.set_fit_mode(next);
                Ok(MenuAction::Redraw)
            }
            _ => Ok(MenuAction::Ignored),
        }
    }
}
