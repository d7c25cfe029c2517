use chart_annotations_wasm::domain::annotations::{
    Anchor, AnnotationId, AnnotationKind, AnnotationPatch, DrawingSession, DrawingTool, LineStyle,
    LineWidth, Symbol,
};
use chart_annotations_wasm::infrastructure::http::dto::AnnotationListResponse;

#[test]
fn backend_annotation_payload_deserializes() {
    let json = r##"{
        "id": 1,
        "symbol": "RELIANCE",
        "annotation_type": "TRENDLINE",
        "title": "Uptrend support",
        "notes": "Strong support line",
        "x1": 1705305600000,
        "y1": 2400.0,
        "x2": 1707897600000,
        "y2": 2450.0,
        "color": "#00FF00",
        "line_style": "SOLID",
        "line_width": "2",
        "visible": true,
        "created_at": "2024-01-15T10:30:00",
        "updated_at": "2024-01-15T10:30:00"
    }"##;

    let annotation: chart_annotations_wasm::domain::annotations::Annotation =
        serde_json::from_str(json).unwrap();
    assert_eq!(annotation.id, AnnotationId::from(1));
    assert_eq!(annotation.symbol, Symbol::from("RELIANCE"));
    assert_eq!(annotation.kind, AnnotationKind::Trendline);
    assert_eq!(annotation.x1, Some(1705305600000.0));
    assert_eq!(annotation.line_style, LineStyle::Solid);
    assert_eq!(annotation.line_width, LineWidth::Normal);
    assert_eq!(annotation.color.value(), "#00FF00");
    assert!(annotation.visible);
}

#[test]
fn list_response_preserves_arrival_order() {
    let json = r##"{
        "symbol": "RELIANCE",
        "count": 2,
        "annotations": [
            {"id": 5, "symbol": "RELIANCE", "annotation_type": "HORIZONTAL_LINE",
             "x1": 1.0, "y1": 2400.0, "color": "#0000FF", "line_style": "DASHED",
             "line_width": "1", "visible": true},
            {"id": 3, "symbol": "RELIANCE", "annotation_type": "TEXT",
             "x1": 2.0, "y1": 2500.0, "color": "#FFA500", "line_style": "SOLID",
             "line_width": "2", "visible": false}
        ]
    }"##;

    let list: AnnotationListResponse = serde_json::from_str(json).unwrap();
    assert_eq!(list.count, 2);
    let ids: Vec<i64> = list.annotations.iter().map(|a| a.id.value()).collect();
    assert_eq!(ids, vec![5, 3]);
    assert_eq!(list.annotations[0].x2, None);
    assert!(!list.annotations[1].visible);
}

#[test]
fn horizontal_draft_serializes_without_a_second_anchor() {
    let mut session = DrawingSession::new();
    session.arm(DrawingTool::HorizontalLine, Symbol::from("RELIANCE"));
    session.place(Anchor::new(1705305600000.0, 2400.0));
    let draft = session.place(Anchor::new(1707897600000.0, 2450.0)).unwrap();

    let value = serde_json::to_value(&draft).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object["annotation_type"], "HORIZONTAL_LINE");
    assert_eq!(object["x1"], 1705305600000.0);
    assert_eq!(object["y1"], 2400.0);
    assert_eq!(object["line_width"], "2");
    assert!(!object.contains_key("x2"));
    assert!(!object.contains_key("y2"));
}

#[test]
fn patch_serializes_only_the_set_fields() {
    let patch = AnnotationPatch { y2: Some(2460.0), visible: Some(false), ..Default::default() };
    let value = serde_json::to_value(&patch).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 2);
    assert_eq!(object["y2"], 2460.0);
    assert_eq!(object["visible"], false);
}
