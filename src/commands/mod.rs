//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod inspect;
pub mod models;
pub mod render;
pub mod utils;

// Re-export main command functions
pub use inspect::{execute_inspect, hit_report, HitReport};
pub use models::{InspectArgs, RenderArgs, DEFAULT_WIDTH};
pub use render::execute_render;
pub use utils::{display_version, load_flamebearer, validate_profile_file};
