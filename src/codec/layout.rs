//! Field layout of the flat per-level arrays.
//!
//! A level is a flat `[u64]` holding one node every `STRIDE` values. The
//! single layout is `offset, total, self, name`; the double (diff) layout is
//! `offsetLeft, totalLeft, selfLeft, offsetRight, totalRight, selfRight, name`.
//! Node positions (`j`) are indices into the flat array, always a multiple of
//! the stride.

use serde::{Deserialize, Serialize};

/// Profile encoding discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Single,
    Double,
}

/// Accessors shared by every layout
pub trait BarLayout {
    const STRIDE: usize;
    const NAME_FIELD: usize;
    const FORMAT: Format;

    fn offset(level: &[u64], j: usize) -> u64;
    fn total(level: &[u64], j: usize) -> u64;
    fn self_ticks(level: &[u64], j: usize) -> u64;

    fn name(level: &[u64], j: usize) -> usize {
        level[j + Self::NAME_FIELD] as usize
    }

    /// Fields holding delta-encoded offsets, each followed by its total
    fn offset_fields() -> &'static [usize];

    fn node_count(level: &[u64]) -> usize {
        level.len() / Self::STRIDE
    }
}

/// `offset, total, self, name`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleLayout;

impl BarLayout for SingleLayout {
    const STRIDE: usize = 4;
    const NAME_FIELD: usize = 3;
    const FORMAT: Format = Format::Single;

    fn offset(level: &[u64], j: usize) -> u64 {
        level[j]
    }

    fn total(level: &[u64], j: usize) -> u64 {
        level[j + 1]
    }

    fn self_ticks(level: &[u64], j: usize) -> u64 {
        level[j + 2]
    }

    fn offset_fields() -> &'static [usize] {
        &[0]
    }
}

/// Left and right triples followed by the name.
///
/// Combined accessors sum both sides; the per-side and diff accessors only
/// exist on this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoubleLayout;

impl BarLayout for DoubleLayout {
    const STRIDE: usize = 7;
    const NAME_FIELD: usize = 6;
    const FORMAT: Format = Format::Double;

    fn offset(level: &[u64], j: usize) -> u64 {
        Self::offset_left(level, j) + Self::offset_right(level, j)
    }

    fn total(level: &[u64], j: usize) -> u64 {
        Self::total_left(level, j) + Self::total_right(level, j)
    }

    fn self_ticks(level: &[u64], j: usize) -> u64 {
        Self::self_left(level, j) + Self::self_right(level, j)
    }

    fn offset_fields() -> &'static [usize] {
        &[0, 3]
    }
}

impl DoubleLayout {
    pub fn offset_left(level: &[u64], j: usize) -> u64 {
        level[j]
    }

    pub fn total_left(level: &[u64], j: usize) -> u64 {
        level[j + 1]
    }

    pub fn self_left(level: &[u64], j: usize) -> u64 {
        level[j + 2]
    }

    pub fn offset_right(level: &[u64], j: usize) -> u64 {
        level[j + 3]
    }

    pub fn total_right(level: &[u64], j: usize) -> u64 {
        level[j + 4]
    }

    pub fn self_right(level: &[u64], j: usize) -> u64 {
        level[j + 5]
    }

    /// `totalRight - totalLeft`
    pub fn total_diff(level: &[u64], j: usize) -> i64 {
        Self::total_right(level, j) as i64 - Self::total_left(level, j) as i64
    }

    /// `selfRight - selfLeft`
    pub fn self_diff(level: &[u64], j: usize) -> i64 {
        Self::self_right(level, j) as i64 - Self::self_left(level, j) as i64
    }
}

/// Layout selected at runtime from a [`Format`].
///
/// Used where a single branch per call is cheaper to read than threading a
/// type parameter (hit-testing, summaries). Hot loops dispatch once and run
/// generic over [`BarLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    Single,
    Double,
}

impl From<Format> for Layout {
    fn from(format: Format) -> Self {
        match format {
            Format::Single => Layout::Single,
            Format::Double => Layout::Double,
        }
    }
}

impl Layout {
    pub fn stride(self) -> usize {
        match self {
            Layout::Single => SingleLayout::STRIDE,
            Layout::Double => DoubleLayout::STRIDE,
        }
    }

    pub fn offset(self, level: &[u64], j: usize) -> u64 {
        match self {
            Layout::Single => SingleLayout::offset(level, j),
            Layout::Double => DoubleLayout::offset(level, j),
        }
    }

    pub fn total(self, level: &[u64], j: usize) -> u64 {
        match self {
            Layout::Single => SingleLayout::total(level, j),
            Layout::Double => DoubleLayout::total(level, j),
        }
    }

    pub fn self_ticks(self, level: &[u64], j: usize) -> u64 {
        match self {
            Layout::Single => SingleLayout::self_ticks(level, j),
            Layout::Double => DoubleLayout::self_ticks(level, j),
        }
    }

    pub fn name(self, level: &[u64], j: usize) -> usize {
        match self {
            Layout::Single => SingleLayout::name(level, j),
            Layout::Double => DoubleLayout::name(level, j),
        }
    }
}

/// Number of values per node for `format`
pub fn stride(format: Format) -> usize {
    Layout::from(format).stride()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides() {
        assert_eq!(stride(Format::Single), 4);
        assert_eq!(stride(Format::Double), 7);
    }

    #[test]
    fn test_single_accessors() {
        let level = [0, 214, 0, 5, 214, 3, 2, 4];
        assert_eq!(SingleLayout::offset(&level, 4), 214);
        assert_eq!(SingleLayout::total(&level, 4), 3);
        assert_eq!(SingleLayout::self_ticks(&level, 4), 2);
        assert_eq!(SingleLayout::name(&level, 4), 4);
    }

    #[test]
    fn test_double_accessors() {
        let level = [245, 1, 0, 985, 0, 0, 2];
        assert_eq!(DoubleLayout::offset(&level, 0), 1230);
        assert_eq!(DoubleLayout::total(&level, 0), 1);
        assert_eq!(DoubleLayout::total_diff(&level, 0), -1);
        assert_eq!(DoubleLayout::name(&level, 0), 2);
        assert_eq!(Layout::Double.total(&level, 0), 1);
    }
}
