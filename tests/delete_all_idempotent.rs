use chart_annotations_wasm::application::AnnotationService;
use chart_annotations_wasm::domain::annotations::{
    AnnotationDraft, AnnotationKind, AnnotationStore, Color, LineStyle, LineWidth, Symbol,
};
use chart_annotations_wasm::infrastructure::InMemoryAnnotationRepository;
use futures::executor::block_on;
use leptos::*;

fn draft(symbol: &str, y: f64) -> AnnotationDraft {
    AnnotationDraft {
        symbol: Symbol::from(symbol),
        kind: AnnotationKind::HorizontalLine,
        title: None,
        notes: None,
        x1: Some(1000.0),
        y1: Some(y),
        x2: None,
        y2: None,
        color: Color::default(),
        line_style: LineStyle::Dotted,
        line_width: LineWidth::Thin,
    }
}

#[test]
fn delete_all_twice_succeeds_both_times() {
    let service = AnnotationService::new(
        InMemoryAnnotationRepository::new(),
        create_rw_signal(AnnotationStore::new()),
    );
    let symbol = Symbol::from("RELIANCE");
    block_on(service.load(&symbol));
    block_on(service.create(draft("RELIANCE", 2400.0)));
    block_on(service.create(draft("RELIANCE", 2500.0)));

    assert!(block_on(service.delete_all(&symbol)));
    service.store().with_untracked(|s| assert!(s.annotations(&symbol).is_empty()));

    // The backend 404s on an already-empty symbol; that still counts as
    // "already in the desired state" and must not surface as an error.
    assert!(block_on(service.delete_all(&symbol)));
    service.store().with_untracked(|s| {
        assert!(s.annotations(&symbol).is_empty());
        assert_eq!(s.last_error(), None);
        assert!(!s.is_saving());
    });
}

#[test]
fn delete_all_targets_the_named_symbol_not_the_active_one() {
    let service = AnnotationService::new(
        InMemoryAnnotationRepository::new(),
        create_rw_signal(AnnotationStore::new()),
    );
    block_on(service.create(draft("TCS", 3600.0)));
    block_on(service.load(&Symbol::from("RELIANCE")));
    block_on(service.create(draft("RELIANCE", 2400.0)));

    assert!(block_on(service.delete_all(&Symbol::from("TCS"))));

    service.store().with_untracked(|s| {
        assert!(s.annotations(&Symbol::from("TCS")).is_empty());
        assert_eq!(s.annotations(&Symbol::from("RELIANCE")).len(), 1);
    });
}
