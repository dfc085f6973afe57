//! Canvas renderer and the surfaces it draws onto.

pub mod canvas;
pub mod surface;
pub mod svg;

pub use canvas::{
    focus_bar_label, render_canvas, BarColoring, DiffColoring, FrameStats, PackageColoring,
    RenderInput,
};
pub use surface::{DrawCommand, RecordingSurface, Rect, Surface};
pub use svg::SvgSurface;
