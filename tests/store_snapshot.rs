use chart_annotations_wasm::domain::annotations::{
    Annotation, AnnotationId, AnnotationKind, AnnotationStore, Color, LineStyle, LineWidth,
    StoredAnnotations, Symbol,
};
use chart_annotations_wasm::domain::errors::AppError;

fn sample(id: i64, symbol: &str) -> Annotation {
    Annotation {
        id: AnnotationId::from(id),
        symbol: Symbol::from(symbol),
        kind: AnnotationKind::SupportResistance,
        title: Some("S/R zone".to_string()),
        notes: None,
        x1: Some(1000.0),
        y1: Some(2400.0),
        x2: Some(2000.0),
        y2: Some(2400.0),
        color: Color::from(Color::GREEN),
        line_style: LineStyle::Dashed,
        line_width: LineWidth::Thick,
        visible: true,
        created_at: Some("2024-01-15T10:30:00".to_string()),
        updated_at: None,
    }
}

#[test]
fn snapshot_excludes_transient_state() {
    let mut store = AnnotationStore::new();
    let symbol = Symbol::from("RELIANCE");
    store.activate(&symbol);
    let ticket = store.begin_load(&symbol);
    store.complete_load(&symbol, ticket, Ok(vec![sample(1, "RELIANCE")]));
    store.set_global_visible(false);
    store.select(Some(AnnotationId::from(1)));
    store.record_error(&AppError::Network("flaky wifi".to_string()));

    let snapshot = store.snapshot();

    let mut restored = AnnotationStore::new();
    restored.restore(snapshot);
    assert_eq!(restored.annotations(&symbol).len(), 1);
    assert!(!restored.global_visible());
    // Selection, error and loading status reset every session.
    assert_eq!(restored.selected(), None);
    assert_eq!(restored.last_error(), None);
    assert!(!restored.is_loading());
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut store = AnnotationStore::new();
    let symbol = Symbol::from("TCS");
    let ticket = store.begin_load(&symbol);
    store.complete_load(&symbol, ticket, Ok(vec![sample(7, "TCS"), sample(8, "TCS")]));

    let json = serde_json::to_string(&store.snapshot()).unwrap();
    let decoded: StoredAnnotations = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded.global_visible, true);
    let restored_list = &decoded.by_symbol[&symbol];
    assert_eq!(restored_list.len(), 2);
    assert_eq!(restored_list[0].id, AnnotationId::from(7));
    assert_eq!(restored_list[0].color.value(), "#00FF00");
}
