use crate::domain::annotations::{Anchor, Annotation, AnnotationId, AnnotationKind, MarkupStyle};
use crate::domain::errors::SurfaceResult;

/// Key of one rendered overlay. The transient preview gets its own variant
/// instead of a reserved magic id, so it can never collide with a committed
/// annotation no matter what ids the server hands out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKey {
    Committed(AnnotationId),
    Preview,
}

/// Two-point path geometry handed to the chart surface. Every kind renders
/// as a segment between two (time, price) anchors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayGeometry {
    pub kind: AnnotationKind,
    pub a: Anchor,
    pub b: Anchor,
}

/// Geometry for one annotation, or `None` when the required first anchor is
/// missing (such an annotation is never rendered).
///
/// A horizontal line is anchored purely by price: its second time
/// coordinate falls back to `now_ms`. Other kinds with a missing second
/// anchor degenerate to a point at the first.
pub fn overlay_geometry(annotation: &Annotation, now_ms: f64) -> Option<OverlayGeometry> {
    let a = annotation.first_anchor()?;
    let b = match annotation.kind {
        AnnotationKind::HorizontalLine => Anchor::new(annotation.x2.unwrap_or(now_ms), a.y),
        _ => Anchor::new(annotation.x2.unwrap_or(a.x), annotation.y2.unwrap_or(a.y)),
    };
    Some(OverlayGeometry { kind: annotation.kind, a, b })
}

/// Port to the charting library's imperative overlay API.
///
/// Every call is fallible: the surface may already be torn down when an
/// update arrives (component unmount mid-pass). The reconciler treats such
/// failures as harmless races - implementations should report them as
/// `AppError::Surface` and must tolerate `destroy_overlay` after teardown.
pub trait ChartSurface {
    /// Opaque per-overlay resource owned by the reconciler's handle map.
    type Handle;

    fn create_overlay(
        &mut self,
        geometry: &OverlayGeometry,
        style: &MarkupStyle,
    ) -> SurfaceResult<Self::Handle>;

    fn update_overlay(
        &mut self,
        handle: &mut Self::Handle,
        geometry: &OverlayGeometry,
        style: &MarkupStyle,
    ) -> SurfaceResult<()>;

    /// Hide or show in place; geometry stays untouched.
    fn set_overlay_visible(&mut self, handle: &mut Self::Handle, visible: bool) -> SurfaceResult<()>;

    fn destroy_overlay(&mut self, handle: Self::Handle) -> SurfaceResult<()>;
}
