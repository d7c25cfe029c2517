use chart_annotations_wasm::domain::annotations::{
    Annotation, AnnotationId, AnnotationKind, Color, LineStyle, LineWidth, Symbol,
};
use chart_annotations_wasm::domain::overlay::OverlayReconciler;
use chart_annotations_wasm::infrastructure::rendering::{RecordingSurface, SurfaceOp};

fn sample(id: i64, kind: AnnotationKind) -> Annotation {
    Annotation {
        id: AnnotationId::from(id),
        symbol: Symbol::from("RELIANCE"),
        kind,
        title: None,
        notes: None,
        x1: Some(1000.0),
        y1: Some(2400.0),
        x2: Some(2000.0),
        y2: Some(2450.0),
        color: Color::default(),
        line_style: LineStyle::Solid,
        line_width: LineWidth::Normal,
        visible: true,
        created_at: None,
        updated_at: None,
    }
}

#[test]
fn second_pass_over_unchanged_state_creates_and_destroys_nothing() {
    let annotations =
        vec![sample(1, AnnotationKind::Trendline), sample(2, AnnotationKind::HorizontalLine)];
    let mut reconciler = OverlayReconciler::new(RecordingSurface::new());

    reconciler.sync(&annotations, true, None);
    assert_eq!(reconciler.surface().created(), 2);
    assert_eq!(reconciler.handle_count(), 2);

    reconciler.surface_mut().take_ops();
    reconciler.sync(&annotations, true, None);

    let ops = reconciler.surface().ops();
    assert!(
        !ops.iter().any(|op| matches!(op, SurfaceOp::Create { .. } | SurfaceOp::Destroy { .. })),
        "second pass must converge without create/destroy, got {ops:?}"
    );
    assert_eq!(reconciler.handle_count(), 2);
}

#[test]
fn annotations_without_anchors_are_never_rendered() {
    let mut missing = sample(5, AnnotationKind::Trendline);
    missing.x1 = None;
    missing.y1 = None;

    let mut reconciler = OverlayReconciler::new(RecordingSurface::new());
    reconciler.sync(&[missing, sample(6, AnnotationKind::Trendline)], true, None);

    assert_eq!(reconciler.surface().created(), 1);
    assert_eq!(reconciler.handle_count(), 1);
}

struct FixedNow;

impl chart_annotations_wasm::domain::logging::TimeProvider for FixedNow {
    fn current_timestamp(&self) -> u64 {
        5_000_000
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        timestamp.to_string()
    }
}

#[test]
fn horizontal_line_geometry_extends_to_now() {
    chart_annotations_wasm::domain::logging::init_time_provider(Box::new(FixedNow));

    let mut level = sample(9, AnnotationKind::HorizontalLine);
    level.x2 = None;
    level.y2 = None;

    let mut reconciler = OverlayReconciler::new(RecordingSurface::new());
    reconciler.sync(&[level], true, None);

    match &reconciler.surface().ops()[0] {
        SurfaceOp::Create { y1, y2, x2, .. } => {
            // Constant price, time extent synthesized out to "now".
            assert_eq!(y1, y2);
            assert_eq!(*x2, 5_000_000.0);
        }
        other => panic!("expected create, got {other:?}"),
    }
}
