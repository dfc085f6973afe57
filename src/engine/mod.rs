//! Flamegraph engine: view state, coordinate transforms and hit-testing.

pub mod collapse;
pub mod flamegraph;
pub mod state;
pub mod viewport;

pub use collapse::{is_collapsed, level_runs, BarRun, CollapseRule};
pub use flamegraph::{BarData, BarPosition, Flamegraph};
pub use state::{BarIndex, ViewState};
pub use viewport::Viewport;
