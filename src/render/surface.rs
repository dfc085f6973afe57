//! 2D raster surface the renderer draws onto.

use crate::color::Color;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The subset of a canvas 2D context the renderer needs
pub trait Surface {
    /// Set the backing size in device pixels; clears the surface
    fn resize(&mut self, width: f64, height: f64);

    /// Scale every following draw
    fn scale(&mut self, sx: f64, sy: f64);

    fn set_font(&mut self, font: &str);

    /// Advance width of `text` in the current font
    fn measure_text(&self, text: &str) -> f64;

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw `text` with its baseline centred at `y`, clipped to `clip`
    fn fill_text_clipped(&mut self, text: &str, x: f64, y: f64, clip: Rect, color: Color);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Resize { width: f64, height: f64 },
    Scale { sx: f64, sy: f64 },
    SetFont(String),
    FillRect { rect: Rect, color: Color },
    FillText {
        text: String,
        x: f64,
        y: f64,
        clip: Rect,
        color: Color,
    },
}

/// Surface that keeps every draw call, with a fixed glyph width
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    pub char_width: f64,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(char_width: f64) -> Self {
        Self {
            char_width,
            commands: Vec::new(),
        }
    }

    pub fn rects(&self) -> impl Iterator<Item = (&Rect, &Color)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillRect { rect, color } => Some((rect, color)),
            _ => None,
        })
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::FillText { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Backing size set by the last `resize`
    pub fn size(&self) -> Option<(f64, f64)> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::Resize { width, height } => Some((*width, *height)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.commands.clear();
        self.commands.push(DrawCommand::Resize { width, height });
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.commands.push(DrawCommand::Scale { sx, sy });
    }

    fn set_font(&mut self, font: &str) {
        self.commands.push(DrawCommand::SetFont(font.to_string()));
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn fill_text_clipped(&mut self, text: &str, x: f64, y: f64, clip: Rect, color: Color) {
        self.commands.push(DrawCommand::FillText {
            text: text.to_string(),
            x,
            y,
            clip,
            color,
        });
    }
}
