use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::errors::AppError;

use super::entities::Annotation;
use super::value_objects::{AnnotationId, Symbol};

/// Ticket identifying one issued load request. Responses carrying a ticket
/// that is no longer the latest issued for their symbol are discarded, so a
/// slow response can never overwrite a newer one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    symbol_seq: u64,
}

/// The canonical in-process model: every symbol's persisted annotations,
/// the master visibility switch, and the transient request status.
///
/// The store owns the annotation objects exclusively; the overlay reconciler
/// only ever reads them. All methods are synchronous - network orchestration
/// lives in the application service.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationStore {
    by_symbol: HashMap<Symbol, Vec<Annotation>>,
    global_visible: bool,
    active_symbol: Option<Symbol>,

    // Transient - never cached across sessions.
    loading: bool,
    pending_writes: u32,
    last_error: Option<String>,
    selected: Option<AnnotationId>,
    latest_load: HashMap<Symbol, u64>,
    next_seq: u64,
}

impl Default for AnnotationStore {
    fn default() -> Self {
        Self {
            by_symbol: HashMap::new(),
            global_visible: true,
            active_symbol: None,
            loading: false,
            pending_writes: 0,
            last_error: None,
            selected: None,
            latest_load: HashMap::new(),
            next_seq: 0,
        }
    }
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Annotations for `symbol` in arrival order, then append order for
    /// creations made this session.
    pub fn annotations(&self, symbol: &Symbol) -> &[Annotation] {
        self.by_symbol.get(symbol).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn active_symbol(&self) -> Option<&Symbol> {
        self.active_symbol.as_ref()
    }

    /// Annotations of the currently active symbol.
    pub fn active_annotations(&self) -> &[Annotation] {
        match &self.active_symbol {
            Some(symbol) => self.annotations(symbol),
            None => &[],
        }
    }

    /// Whether `id` belongs to the active symbol's collection. Updates and
    /// deletes only ever touch the active symbol.
    pub fn contains_active(&self, id: AnnotationId) -> bool {
        self.active_annotations().iter().any(|a| a.id == id)
    }

    pub fn global_visible(&self) -> bool {
        self.global_visible
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// True while at least one write is pending. Backed by a counter, so two
    /// overlapping writes cannot clear each other's state.
    pub fn is_saving(&self) -> bool {
        self.pending_writes > 0
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn selected(&self) -> Option<AnnotationId> {
        self.selected
    }

    pub fn select(&mut self, id: Option<AnnotationId>) {
        self.selected = id;
    }

    /// Make `symbol` the one whose annotations are shown and edited.
    pub fn activate(&mut self, symbol: &Symbol) {
        if self.active_symbol.as_ref() != Some(symbol) {
            self.active_symbol = Some(symbol.clone());
            self.selected = None;
        }
    }

    // --- load lifecycle -----------------------------------------------------

    /// Start a load for `symbol`: clears the prior error and issues a fresh
    /// fence ticket. Does not touch the active symbol - prefetching another
    /// symbol's annotations is fine.
    pub fn begin_load(&mut self, symbol: &Symbol) -> LoadTicket {
        self.next_seq += 1;
        self.latest_load.insert(symbol.clone(), self.next_seq);
        self.loading = true;
        self.last_error = None;
        LoadTicket { symbol_seq: self.next_seq }
    }

    /// Apply a finished load. Returns false when the response is stale
    /// (a newer load for the same symbol was issued meanwhile) - stale
    /// responses are dropped without touching any state.
    pub fn complete_load(
        &mut self,
        symbol: &Symbol,
        ticket: LoadTicket,
        result: Result<Vec<Annotation>, AppError>,
    ) -> bool {
        if self.latest_load.get(symbol) != Some(&ticket.symbol_seq) {
            return false;
        }
        self.loading = false;
        match result {
            // Wholesale replace, never a merge.
            Ok(annotations) => {
                self.by_symbol.insert(symbol.clone(), annotations);
            }
            Err(err) => {
                self.last_error = Some(err.to_string());
            }
        }
        true
    }

    // --- write lifecycle ----------------------------------------------------

    pub fn begin_write(&mut self) {
        self.pending_writes += 1;
        self.last_error = None;
    }

    pub fn finish_write(&mut self) {
        self.pending_writes = self.pending_writes.saturating_sub(1);
    }

    pub fn record_error(&mut self, err: &AppError) {
        self.last_error = Some(err.to_string());
    }

    // --- canonical-set mutations (post-confirmation only) --------------------

    /// Append a server-confirmed creation to its symbol's collection.
    pub fn apply_created(&mut self, annotation: Annotation) {
        self.by_symbol.entry(annotation.symbol.clone()).or_default().push(annotation);
    }

    /// Replace the entry for a server-confirmed update. No-op when the id is
    /// not in its symbol's collection.
    pub fn apply_updated(&mut self, annotation: Annotation) -> bool {
        let Some(list) = self.by_symbol.get_mut(&annotation.symbol) else {
            return false;
        };
        match list.iter_mut().find(|a| a.id == annotation.id) {
            Some(slot) => {
                *slot = annotation;
                true
            }
            None => false,
        }
    }

    /// Remove a server-confirmed deletion from the active symbol's
    /// collection, clearing a matching selection.
    pub fn apply_removed(&mut self, id: AnnotationId) -> bool {
        let Some(symbol) = self.active_symbol.clone() else {
            return false;
        };
        let Some(list) = self.by_symbol.get_mut(&symbol) else {
            return false;
        };
        let before = list.len();
        list.retain(|a| a.id != id);
        let removed = list.len() != before;
        if removed && self.selected == Some(id) {
            self.selected = None;
        }
        removed
    }

    /// Empty the named symbol's collection, regardless of the active symbol.
    pub fn apply_cleared(&mut self, symbol: &Symbol) {
        self.by_symbol.insert(symbol.clone(), Vec::new());
        if let Some(sel) = self.selected {
            if self.active_symbol.as_ref() == Some(symbol) && !self.contains_active(sel) {
                self.selected = None;
            }
        }
    }

    // --- visibility ---------------------------------------------------------

    /// Pure local flip, no network call.
    pub fn toggle_global_visible(&mut self) -> bool {
        self.global_visible = !self.global_visible;
        self.global_visible
    }

    pub fn set_global_visible(&mut self, visible: bool) {
        self.global_visible = visible;
    }

    // --- durable snapshot ---------------------------------------------------

    /// Durable part of the store: the per-symbol map and the master
    /// visibility flag. Loading/error/selection state is deliberately
    /// excluded and resets every session.
    pub fn snapshot(&self) -> StoredAnnotations {
        StoredAnnotations {
            by_symbol: self.by_symbol.clone(),
            global_visible: self.global_visible,
        }
    }

    pub fn restore(&mut self, snapshot: StoredAnnotations) {
        self.by_symbol = snapshot.by_symbol;
        self.global_visible = snapshot.global_visible;
    }
}

/// Client-side durable cache payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredAnnotations {
    pub by_symbol: HashMap<Symbol, Vec<Annotation>>,
    pub global_visible: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_load_is_discarded() {
        let mut store = AnnotationStore::new();
        let symbol = Symbol::from("TCS");
        let first = store.begin_load(&symbol);
        let second = store.begin_load(&symbol);
        assert!(!store.complete_load(&symbol, first, Ok(Vec::new())));
        assert!(store.complete_load(&symbol, second, Ok(Vec::new())));
    }

    #[test]
    fn overlapping_writes_share_one_counter() {
        let mut store = AnnotationStore::new();
        store.begin_write();
        store.begin_write();
        store.finish_write();
        assert!(store.is_saving());
        store.finish_write();
        assert!(!store.is_saving());
    }
}
