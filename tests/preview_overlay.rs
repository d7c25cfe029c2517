use chart_annotations_wasm::domain::annotations::{
    Anchor, Annotation, AnnotationId, AnnotationKind, DrawingSession, DrawingTool, Symbol,
};
use chart_annotations_wasm::domain::overlay::{OverlayKey, OverlayReconciler};
use chart_annotations_wasm::infrastructure::rendering::RecordingSurface;

fn committed(id: i64, draft: &chart_annotations_wasm::domain::annotations::AnnotationDraft) -> Annotation {
    let mut annotation = draft.as_preview();
    annotation.id = AnnotationId::from(id);
    annotation.created_at = Some("2024-01-15T10:30:00".to_string());
    annotation
}

/// Arm TRENDLINE on RELIANCE, place (100, 200) then (110, 220): one
/// annotation committed with both anchors, preview handle removed, one
/// committed handle created.
#[test]
fn trendline_drawing_commits_and_swaps_preview_for_committed_overlay() {
    let mut session = DrawingSession::new();
    let mut reconciler = OverlayReconciler::new(RecordingSurface::new());
    session.arm(DrawingTool::Trendline, Symbol::from("RELIANCE"));

    assert_eq!(session.place(Anchor::new(100.0, 200.0)), None);
    let cursor = Anchor::new(110.0, 220.0);
    let preview = session.preview(cursor);
    reconciler.sync(&[], true, preview.as_ref());
    assert!(reconciler.has_handle(OverlayKey::Preview));

    let draft = session.place(cursor).expect("second placement commits");
    assert_eq!(draft.kind, AnnotationKind::Trendline);
    assert_eq!((draft.x1, draft.y1, draft.x2, draft.y2), (Some(100.0), Some(200.0), Some(110.0), Some(220.0)));

    // The session is idle again; the canonical set now holds the server echo.
    let annotation = committed(1, &draft);
    reconciler.sync(std::slice::from_ref(&annotation), true, session.preview(cursor).as_ref());

    assert!(!reconciler.has_handle(OverlayKey::Preview));
    assert!(reconciler.has_handle(OverlayKey::Committed(AnnotationId::from(1))));
    assert_eq!(reconciler.handle_count(), 1);
}

#[test]
fn preview_updates_in_place_while_the_cursor_moves() {
    let mut session = DrawingSession::new();
    let mut reconciler = OverlayReconciler::new(RecordingSurface::new());
    session.arm(DrawingTool::Trendline, Symbol::from("TCS"));
    session.place(Anchor::new(10.0, 20.0));

    reconciler.sync(&[], true, session.preview(Anchor::new(11.0, 21.0)).as_ref());
    reconciler.sync(&[], true, session.preview(Anchor::new(12.0, 22.0)).as_ref());

    // One create for the sentinel handle, then updates only.
    assert_eq!(reconciler.surface().created(), 1);
    assert_eq!(reconciler.handle_count(), 1);
}

#[test]
fn cancelling_a_drawing_tears_the_preview_down() {
    let mut session = DrawingSession::new();
    let mut reconciler = OverlayReconciler::new(RecordingSurface::new());
    session.arm(DrawingTool::Rectangle, Symbol::from("TCS"));
    session.place(Anchor::new(10.0, 20.0));
    reconciler.sync(&[], true, session.preview(Anchor::new(11.0, 21.0)).as_ref());
    assert!(reconciler.has_handle(OverlayKey::Preview));

    session.cancel();
    reconciler.sync(&[], true, session.preview(Anchor::new(11.0, 21.0)).as_ref());

    assert!(!reconciler.has_handle(OverlayKey::Preview));
    assert_eq!(reconciler.surface().destroyed(), 1);
}
