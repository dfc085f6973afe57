//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors raised while decoding or validating the flat level encoding
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    #[error("profile has no levels")]
    Empty,

    #[error("profile has zero ticks")]
    ZeroTicks,

    #[error("level {level} has {len} values, which is not a multiple of the stride {stride}")]
    Misaligned {
        level: usize,
        len: usize,
        stride: usize,
    },

    #[error("level 0 must contain exactly one root node, found {0}")]
    InvalidRoot(usize),

    #[error("root node spans [{offset}, {end}) but numTicks is {num_ticks}")]
    RootMismatch { offset: u64, end: u64, num_ticks: u64 },

    #[error("offsets at level {level} overlap or decrease at slot {slot}")]
    NonMonotonic { level: usize, slot: usize },

    #[error("node at level {level}, slot {slot} is not contained in any parent node")]
    Orphan { level: usize, slot: usize },

    #[error("name index {index} at level {level}, slot {slot} is outside the names table ({names} entries)")]
    UnknownName {
        level: usize,
        slot: usize,
        index: u64,
        names: usize,
    },

    #[error("diff profiles require leftTicks and rightTicks")]
    MissingDiffTicks,

    #[error("offset overflow while decoding level {0}")]
    Overflow(usize),
}

/// Errors raised by engine state transitions and hit-testing
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("x and y must be non-negative, got x = {x}, y = {y}")]
    NegativeCoordinate { x: f64, y: f64 },

    #[error("no bar at level {level}, slot {slot}")]
    UnknownBar { level: usize, slot: usize },

    #[error("bar at level {level}, slot {slot} has no ticks")]
    ZeroWidthBar { level: usize, slot: usize },

    #[error("zoom level {zoom} is above the focused level {focus}")]
    ZoomAboveFocus { zoom: usize, focus: usize },

    #[error("canvas width must be positive and finite, got {0}")]
    InvalidWidth(f64),
}

/// Errors raised while painting a frame
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    #[error("'rangeMin' ({min}) should be strictly smaller than 'rangeMax' ({max})")]
    EmptyRange { min: f64, max: f64 },

    #[error("could not infer canvas width (got {0})")]
    ZeroWidth(f64),
}

/// Errors that can occur while parsing a flamebearer profile
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("JSON deserialization failed: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid flamebearer encoding: {0}")]
    InvalidEncoding(#[from] CodecError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),

    #[error("SVG document is not closed ({0} bytes written so far)")]
    UnfinishedDocument(usize),
}

/// Errors that can occur while loading a render configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config TOML parse error: {0}")]
    ParseFailed(#[from] toml::de::Error),

    #[error("Invalid render configuration: {0}")]
    Invalid(String),
}
