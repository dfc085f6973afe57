//! Color model: package hash colors for single profiles, a diverging
//! scale for diff profiles.

pub mod diff;
pub mod murmur;
pub mod package;
pub mod rgba;

pub use diff::{
    color_based_on_diff_percent, color_from_percentage, relative_change, DiffColorScale,
    DiffPalette,
};
pub use murmur::murmur3_32;
pub use package::{color_based_on_package_name, package_name_from_stack_trace, SpyName};
pub use rgba::Color;
