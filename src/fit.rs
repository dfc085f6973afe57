//! Label fitting for bars narrower than their text.

use crate::utils::config::FIT_MARGIN;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How an oversized label is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum FitMode {
    /// Keep the beginning of the full label, clip the end
    #[default]
    Head,
    /// Keep the end of the label visible, shortening it first
    Tail,
}

#[derive(Debug, Clone, Copy)]
pub struct FitRequest<'a> {
    pub mode: FitMode,
    /// Width of one glyph of the monospaced label font
    pub char_size: f64,
    pub rect_width: f64,
    pub full_text: &'a str,
    pub short_text: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitCalc<'a> {
    pub text: &'a str,
    pub margin_left: f64,
}

fn text_width(text: &str, char_size: f64) -> f64 {
    text.chars().count() as f64 * char_size
}

/// Pick the label text and its left margin inside a bar of `rect_width`
pub fn fit_to_canvas_rect<'a>(req: &FitRequest<'a>) -> FitCalc<'a> {
    match req.mode {
        FitMode::Head => FitCalc {
            text: req.full_text,
            margin_left: FIT_MARGIN,
        },
        FitMode::Tail => {
            if text_width(req.full_text, req.char_size) <= req.rect_width {
                return FitCalc {
                    text: req.full_text,
                    margin_left: FIT_MARGIN,
                };
            }

            let short_width = text_width(req.short_text, req.char_size);
            if short_width <= req.rect_width {
                return FitCalc {
                    text: req.short_text,
                    margin_left: FIT_MARGIN,
                };
            }

            // Push the head off the left edge so the tail stays visible
            FitCalc {
                text: req.short_text,
                margin_left: -(short_width - req.rect_width + FIT_MARGIN),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(mode: FitMode, rect_width: f64, short_text: &'a str) -> FitRequest<'a> {
        FitRequest {
            mode,
            char_size: 1.0,
            rect_width,
            full_text: "full_long_text",
            short_text,
        }
    }

    #[test]
    fn test_head_always_uses_full_text() {
        let calc = fit_to_canvas_rect(&request(FitMode::Head, 10.0, "short_text"));
        assert_eq!(
            calc,
            FitCalc {
                text: "full_long_text",
                margin_left: 3.0
            }
        );
    }

    #[test]
    fn test_tail_prefers_full_text_when_it_fits() {
        let calc = fit_to_canvas_rect(&request(FitMode::Tail, 99.0, "short_text"));
        assert_eq!(
            calc,
            FitCalc {
                text: "full_long_text",
                margin_left: 3.0
            }
        );
    }

    #[test]
    fn test_tail_falls_back_to_short_text() {
        let calc = fit_to_canvas_rect(&request(FitMode::Tail, 10.0, "short_text"));
        assert_eq!(
            calc,
            FitCalc {
                text: "short_text",
                margin_left: 3.0
            }
        );
    }

    #[test]
    fn test_tail_shifts_oversized_short_text() {
        let calc = fit_to_canvas_rect(&request(FitMode::Tail, 10.0, "short_text_"));
        assert_eq!(
            calc,
            FitCalc {
                text: "short_text_",
                margin_left: -4.0
            }
        );
    }
}
