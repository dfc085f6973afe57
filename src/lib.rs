//! flamebearer canvas
//!
//! Flamegraph engine for flamebearer profiles: decoding of the flat,
//! delta-encoded level arrays, zoom/focus view state, greedy collapse of
//! sub-pixel bars, rasterization onto a pluggable surface and pixel to node
//! hit-testing.
//!
//! This crate also provides the `flamebearer` CLI, which renders profiles to
//! SVG and reports hit-tests.
//!
//! ## Getting Started
//!
//! ```ignore
//! use flamebearer_canvas::engine::Flamegraph;
//! use flamebearer_canvas::fit::FitMode;
//! use flamebearer_canvas::output::parse_flamebearer;
//! use flamebearer_canvas::render::SvgSurface;
//!
//! let fb = parse_flamebearer(&json)?;
//! let engine = Flamegraph::new(fb, 1200.0, FitMode::Head, None, None, None)?;
//! let mut surface = SvgSurface::default();
//! engine.render(&mut surface)?;
//! let svg = surface.finish();
//! ```

pub mod codec;
pub mod color;
pub mod commands;
pub mod engine;
pub mod fit;
pub mod format;
pub mod interaction;
pub mod model;
pub mod output;
pub mod render;
pub mod search;
pub mod utils;
