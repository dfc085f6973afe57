//! SVG backend for the raster surface.
//!
//! Every draw call is appended to an in-memory document; `finish` closes it.
//! Labels get their own clip path so text never spills out of its bar.

use super::surface::{Rect, Surface};
use crate::color::Color;

/// Approximate advance of one glyph of the label font at 11.5px
pub const DEFAULT_CHAR_WIDTH: f64 = 6.9;

/// Surface that serializes draws to an SVG document
#[derive(Debug, Clone)]
pub struct SvgSurface {
    width: f64,
    height: f64,
    scale: f64,
    font: String,
    char_width: f64,
    body: String,
    clips: usize,
    title: Option<String>,
}

impl Default for SvgSurface {
    fn default() -> Self {
        Self::new(DEFAULT_CHAR_WIDTH)
    }
}

impl SvgSurface {
    pub fn new(char_width: f64) -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            scale: 1.0,
            font: String::new(),
            char_width,
            body: String::new(),
            clips: 0,
            title: None,
        }
    }

    /// Add a `<title>` element to the document
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Close the document and return it
    pub fn finish(self) -> String {
        let mut svg = String::with_capacity(self.body.len() + 512);

        // Header
        svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
        svg.push('\n');
        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            fmt_num(self.width),
            fmt_num(self.height),
            fmt_num(self.width),
            fmt_num(self.height)
        ));
        svg.push('\n');

        if let Some(title) = &self.title {
            svg.push_str(&format!("<title>{}</title>\n", escape_xml(title)));
        }

        if self.scale != 1.0 {
            svg.push_str(&format!("<g transform=\"scale({})\">\n", fmt_num(self.scale)));
            svg.push_str(&self.body);
            svg.push_str("</g>\n");
        } else {
            svg.push_str(&self.body);
        }

        svg.push_str("</svg>\n");
        svg
    }
}

impl Surface for SvgSurface {
    fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
        self.scale = 1.0;
        self.body.clear();
        self.clips = 0;
    }

    fn scale(&mut self, sx: f64, _sy: f64) {
        self.scale *= sx;
    }

    fn set_font(&mut self, font: &str) {
        self.font = font.to_string();
    }

    fn measure_text(&self, text: &str) -> f64 {
        text.chars().count() as f64 * self.char_width
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.body.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            fmt_num(rect.x),
            fmt_num(rect.y),
            fmt_num(rect.width.max(0.0)),
            fmt_num(rect.height),
            color
        ));
        self.body.push('\n');
    }

    fn fill_text_clipped(&mut self, text: &str, x: f64, y: f64, clip: Rect, color: Color) {
        let id = self.clips;
        self.clips += 1;

        self.body.push_str(&format!(
            r#"<clipPath id="c{}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
            id,
            fmt_num(clip.x),
            fmt_num(clip.y),
            fmt_num(clip.width.max(0.0)),
            fmt_num(clip.height)
        ));
        self.body.push('\n');
        self.body.push_str(&format!(
            r#"<text x="{}" y="{}" dominant-baseline="middle" clip-path="url(#c{})" style="font: {}" fill="{}">{}</text>"#,
            fmt_num(x),
            fmt_num(y),
            id,
            escape_xml(&self.font),
            color,
            escape_xml(text)
        ));
        self.body.push('\n');
    }
}

/// Two decimals without trailing zeros
fn fmt_num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

/// Escape the five XML special characters
pub fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
