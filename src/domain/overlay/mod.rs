pub mod reconciler;
pub mod surface;

pub use reconciler::OverlayReconciler;
pub use surface::{ChartSurface, OverlayGeometry, OverlayKey, overlay_geometry};
