use chart_annotations_wasm::domain::annotations::{
    Annotation, AnnotationId, AnnotationKind, Color, LineStyle, LineWidth, Symbol,
};
use chart_annotations_wasm::domain::overlay::OverlayReconciler;
use chart_annotations_wasm::infrastructure::rendering::{RecordingSurface, SurfaceOp};

fn sample(id: i64, visible: bool) -> Annotation {
    Annotation {
        id: AnnotationId::from(id),
        symbol: Symbol::from("RELIANCE"),
        kind: AnnotationKind::Trendline,
        title: None,
        notes: None,
        x1: Some(1000.0),
        y1: Some(2400.0),
        x2: Some(2000.0),
        y2: Some(2450.0),
        color: Color::default(),
        line_style: LineStyle::Solid,
        line_width: LineWidth::Normal,
        visible,
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn global_toggle_hides_in_place_and_restores_without_recreating() {
    let annotations = vec![sample(1, true), sample(2, true)];
    let mut reconciler = OverlayReconciler::new(RecordingSurface::new());
    reconciler.sync(&annotations, true, None);
    assert_eq!(reconciler.surface().created(), 2);

    // Master switch off: handles stay, hidden in place.
    reconciler.surface_mut().take_ops();
    reconciler.sync(&annotations, false, None);
    let ops = reconciler.surface_mut().take_ops();
    assert_eq!(reconciler.handle_count(), 2);
    assert!(ops.iter().all(|op| matches!(op, SurfaceOp::SetVisible { visible: false, .. })));
    assert_eq!(ops.len(), 2);

    // Back on: prior geometry comes back without any re-creation.
    reconciler.sync(&annotations, true, None);
    let ops = reconciler.surface_mut().take_ops();
    assert!(!ops.iter().any(|op| matches!(op, SurfaceOp::Create { .. } | SurfaceOp::Destroy { .. })));
    assert!(ops.iter().any(|op| matches!(op, SurfaceOp::SetVisible { visible: true, .. })));
}

#[test]
fn per_annotation_visibility_is_independent_of_the_master_switch() {
    let annotations = vec![sample(1, true), sample(2, false)];
    let mut reconciler = OverlayReconciler::new(RecordingSurface::new());
    reconciler.sync(&annotations, true, None);

    // The individually hidden annotation never got an overlay; the visible
    // one did.
    assert_eq!(reconciler.surface().created(), 1);
    assert_eq!(reconciler.handle_count(), 1);
}

#[test]
fn hiding_an_existing_overlay_keeps_its_handle() {
    let mut reconciler = OverlayReconciler::new(RecordingSurface::new());
    reconciler.sync(&[sample(1, true)], true, None);
    reconciler.surface_mut().take_ops();

    reconciler.sync(&[sample(1, false)], true, None);
    let ops = reconciler.surface_mut().take_ops();
    assert_eq!(ops, vec![SurfaceOp::SetVisible { handle: 1, visible: false }]);
    assert_eq!(reconciler.handle_count(), 1);
}
