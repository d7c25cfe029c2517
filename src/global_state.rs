use leptos::*;
use once_cell::sync::OnceCell;

use crate::domain::annotations::{Anchor, AnnotationStore, DrawingSession, Symbol};
use crate::global_signals;

pub struct Globals {
    /// Canonical annotation model - the single source every consumer reads.
    pub annotations: RwSignal<AnnotationStore>,
    /// In-progress pointer input.
    pub drawing: RwSignal<DrawingSession>,
    /// Last pointer position in data coordinates, drives the live preview.
    pub cursor: RwSignal<Option<Anchor>>,
    /// Instrument shown on the chart.
    pub active_symbol: RwSignal<Symbol>,
}

static GLOBALS: OnceCell<Globals> = OnceCell::new();

pub fn globals() -> &'static Globals {
    GLOBALS.get_or_init(|| Globals {
        annotations: create_rw_signal(AnnotationStore::new()),
        drawing: create_rw_signal(DrawingSession::new()),
        cursor: create_rw_signal(None),
        active_symbol: create_rw_signal(Symbol::from("RELIANCE")),
    })
}

global_signals! {
    pub annotation_store => annotations: crate::domain::annotations::AnnotationStore,
    pub drawing_session => drawing: crate::domain::annotations::DrawingSession,
    pub cursor_position => cursor: Option<crate::domain::annotations::Anchor>,
    pub active_symbol => active_symbol: crate::domain::annotations::Symbol,
}
