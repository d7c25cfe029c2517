#![cfg(target_arch = "wasm32")]

use chart_annotations_wasm::domain::annotations::{
    Annotation, AnnotationId, AnnotationKind, AnnotationStorage, AnnotationStore, Color, LineStyle,
    LineWidth, Symbol,
};
use chart_annotations_wasm::infrastructure::persistence::LocalAnnotationCache;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn sample(id: i64) -> Annotation {
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
        visible: true,
        created_at: Some("2024-01-15T10:30:00".to_string()),
        updated_at: None,
    }
}

#[wasm_bindgen_test]
fn snapshot_round_trips_through_local_storage() {
    let symbol = Symbol::from("RELIANCE");
    let mut store = AnnotationStore::new();
    let ticket = store.begin_load(&symbol);
    store.complete_load(&symbol, ticket, Ok(vec![sample(1)]));
    store.set_global_visible(false);

    let cache = LocalAnnotationCache::new();
    cache.persist(&store.snapshot());

    let loaded = cache.load().expect("cached snapshot");
    assert_eq!(loaded, store.snapshot());
    assert!(!loaded.global_visible);
}
