//! Level codec: stride layouts, the delta transform and structural
//! validation of the flat per-level arrays.

pub mod delta;
pub mod layout;
pub mod validate;

pub use delta::{decode_deltas, encode_deltas};
pub use layout::{stride, BarLayout, DoubleLayout, Format, Layout, SingleLayout};
pub use validate::validate_levels;
