pub mod canvas_surface;
pub mod recording_surface;

pub use canvas_surface::{Canvas2dSurface, ChartScale};
pub use recording_surface::{RecordingSurface, SurfaceOp};
