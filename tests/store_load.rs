use chart_annotations_wasm::domain::annotations::{
    Annotation, AnnotationId, AnnotationKind, AnnotationStore, Color, LineStyle, LineWidth, Symbol,
};
use chart_annotations_wasm::domain::errors::AppError;

fn sample(id: i64, symbol: &str) -> Annotation {
    Annotation {
        id: AnnotationId::from(id),
        symbol: Symbol::from(symbol),
        kind: AnnotationKind::Trendline,
        title: None,
        notes: None,
        x1: Some(1000.0),
        y1: Some(100.0),
        x2: Some(2000.0),
        y2: Some(110.0),
        color: Color::default(),
        line_style: LineStyle::Solid,
        line_width: LineWidth::Normal,
        visible: true,
        created_at: Some("2024-01-15T10:30:00".to_string()),
        updated_at: Some("2024-01-15T10:30:00".to_string()),
    }
}

#[test]
fn load_replaces_the_collection_wholesale() {
    let mut store = AnnotationStore::new();
    let symbol = Symbol::from("RELIANCE");

    let ticket = store.begin_load(&symbol);
    store.complete_load(&symbol, ticket, Ok(vec![sample(1, "RELIANCE"), sample(2, "RELIANCE")]));
    assert_eq!(store.annotations(&symbol).len(), 2);

    // A later load with fewer rows wins completely - no merging.
    let ticket = store.begin_load(&symbol);
    store.complete_load(&symbol, ticket, Ok(vec![sample(3, "RELIANCE")]));
    let annotations = store.annotations(&symbol);
    assert_eq!(annotations.len(), 1);
    assert_eq!(annotations[0].id, AnnotationId::from(3));
}

#[test]
fn failed_load_keeps_state_and_records_the_error() {
    let mut store = AnnotationStore::new();
    let symbol = Symbol::from("RELIANCE");

    let ticket = store.begin_load(&symbol);
    store.complete_load(&symbol, ticket, Ok(vec![sample(1, "RELIANCE")]));

    let ticket = store.begin_load(&symbol);
    assert_eq!(store.last_error(), None);
    store.complete_load(
        &symbol,
        ticket,
        Err(AppError::Http { status: 500, message: "Internal Server Error".to_string() }),
    );

    assert_eq!(store.annotations(&symbol).len(), 1);
    assert!(store.last_error().unwrap().contains("500"));
    assert!(!store.is_loading());

    // Starting the next load clears the stale error.
    store.begin_load(&symbol);
    assert_eq!(store.last_error(), None);
}

#[test]
fn loads_for_different_symbols_do_not_interfere() {
    let mut store = AnnotationStore::new();
    let reliance = Symbol::from("RELIANCE");
    let tcs = Symbol::from("TCS");

    let t_reliance = store.begin_load(&reliance);
    let t_tcs = store.begin_load(&tcs);

    assert!(store.complete_load(&tcs, t_tcs, Ok(vec![sample(10, "TCS")])));
    assert!(store.complete_load(&reliance, t_reliance, Ok(vec![sample(20, "RELIANCE")])));

    assert_eq!(store.annotations(&tcs)[0].id, AnnotationId::from(10));
    assert_eq!(store.annotations(&reliance)[0].id, AnnotationId::from(20));
}
