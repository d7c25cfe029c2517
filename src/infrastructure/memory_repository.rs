use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use crate::domain::annotations::{
    AnalysisNote, Annotation, AnnotationDraft, AnnotationId, AnnotationPatch, AnnotationRepository,
    NoteDraft, NotePatch, NoteRepository, Symbol,
};
use crate::domain::errors::{ApiResult, AppError};

fn not_found(message: &str) -> AppError {
    AppError::Http { status: 404, message: message.to_string() }
}

/// In-memory stand-in for the remote annotation collection, mirroring the
/// backend's observable behavior (id assignment, 404s, delete-all on an
/// empty symbol reporting 404). Used by tests and offline demos.
#[derive(Default)]
pub struct InMemoryAnnotationRepository {
    annotations: RefCell<Vec<Annotation>>,
    next_id: Cell<i64>,
    fail_next: RefCell<Option<AppError>>,
}

impl InMemoryAnnotationRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next call fail with `err`, once.
    pub fn fail_next(&self, err: AppError) {
        *self.fail_next.borrow_mut() = Some(err);
    }

    pub fn len(&self) -> usize {
        self.annotations.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.borrow().is_empty()
    }

    fn take_failure(&self) -> ApiResult<()> {
        match self.fail_next.borrow_mut().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl AnnotationRepository for InMemoryAnnotationRepository {
    async fn list(&self, symbol: &Symbol) -> ApiResult<Vec<Annotation>> {
        self.take_failure()?;
        Ok(self
            .annotations
            .borrow()
            .iter()
            .filter(|a| &a.symbol == symbol)
            .cloned()
            .collect())
    }

    async fn create(&self, draft: &AnnotationDraft) -> ApiResult<Annotation> {
        self.take_failure()?;
        self.next_id.set(self.next_id.get() + 1);
        let annotation = Annotation {
            id: AnnotationId::from(self.next_id.get()),
            symbol: draft.symbol.clone(),
            kind: draft.kind,
            title: draft.title.clone(),
            notes: draft.notes.clone(),
            x1: draft.x1,
            y1: draft.y1,
            x2: draft.x2,
            y2: draft.y2,
            color: draft.color.clone(),
            line_style: draft.line_style,
            line_width: draft.line_width,
            visible: true,
            created_at: Some("1970-01-01T00:00:00".to_string()),
            updated_at: Some("1970-01-01T00:00:00".to_string()),
        };
        self.annotations.borrow_mut().push(annotation.clone());
        Ok(annotation)
    }

    async fn get(&self, id: AnnotationId) -> ApiResult<Annotation> {
        self.take_failure()?;
        self.annotations
            .borrow()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| not_found("Annotation not found"))
    }

    async fn update(&self, id: AnnotationId, patch: &AnnotationPatch) -> ApiResult<Annotation> {
        self.take_failure()?;
        let mut annotations = self.annotations.borrow_mut();
        let slot = annotations
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| not_found("Annotation not found"))?;

        if let Some(title) = &patch.title {
            slot.title = Some(title.clone());
        }
        if let Some(notes) = &patch.notes {
            slot.notes = Some(notes.clone());
        }
        if let Some(x1) = patch.x1 {
            slot.x1 = Some(x1);
        }
        if let Some(y1) = patch.y1 {
            slot.y1 = Some(y1);
        }
        if let Some(x2) = patch.x2 {
            slot.x2 = Some(x2);
        }
        if let Some(y2) = patch.y2 {
            slot.y2 = Some(y2);
        }
        if let Some(color) = &patch.color {
            slot.color = color.clone();
        }
        if let Some(line_style) = patch.line_style {
            slot.line_style = line_style;
        }
        if let Some(line_width) = patch.line_width {
            slot.line_width = line_width;
        }
        if let Some(visible) = patch.visible {
            slot.visible = visible;
        }
        Ok(slot.clone())
    }

    async fn delete(&self, id: AnnotationId) -> ApiResult<()> {
        self.take_failure()?;
        let mut annotations = self.annotations.borrow_mut();
        let before = annotations.len();
        annotations.retain(|a| a.id != id);
        if annotations.len() == before {
            return Err(not_found("Annotation not found"));
        }
        Ok(())
    }

    async fn delete_all(&self, symbol: &Symbol) -> ApiResult<()> {
        self.take_failure()?;
        let mut annotations = self.annotations.borrow_mut();
        let before = annotations.len();
        annotations.retain(|a| &a.symbol != symbol);
        if annotations.len() == before {
            // The backend 404s when the symbol had nothing to delete.
            return Err(not_found("No annotations found for symbol"));
        }
        Ok(())
    }
}

/// In-memory one-note-per-symbol resource.
#[derive(Default)]
pub struct InMemoryNoteRepository {
    notes: RefCell<HashMap<Symbol, AnalysisNote>>,
    next_id: Cell<i64>,
}

impl InMemoryNoteRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl NoteRepository for InMemoryNoteRepository {
    async fn get(&self, symbol: &Symbol) -> ApiResult<AnalysisNote> {
        self.notes
            .borrow()
            .get(symbol)
            .cloned()
            .ok_or_else(|| not_found("Note not found for this symbol"))
    }

    async fn put(&self, symbol: &Symbol, draft: &NoteDraft) -> ApiResult<AnalysisNote> {
        let mut notes = self.notes.borrow_mut();
        let id = match notes.get(symbol) {
            Some(existing) => existing.id,
            None => {
                self.next_id.set(self.next_id.get() + 1);
                self.next_id.get()
            }
        };
        let note = AnalysisNote {
            id,
            symbol: symbol.clone(),
            title: draft.title.clone(),
            content: draft.content.clone(),
            tags: draft.tags.clone(),
            category: draft.category.clone(),
            created_at: Some("1970-01-01T00:00:00".to_string()),
            updated_at: Some("1970-01-01T00:00:00".to_string()),
        };
        notes.insert(symbol.clone(), note.clone());
        Ok(note)
    }

    async fn patch(&self, symbol: &Symbol, patch: &NotePatch) -> ApiResult<AnalysisNote> {
        let mut notes = self.notes.borrow_mut();
        let note = notes
            .get_mut(symbol)
            .ok_or_else(|| not_found("Note not found for this symbol"))?;
        if let Some(title) = &patch.title {
            note.title = title.clone();
        }
        if let Some(content) = &patch.content {
            note.content = content.clone();
        }
        if let Some(tags) = &patch.tags {
            note.tags = Some(tags.clone());
        }
        if let Some(category) = &patch.category {
            note.category = Some(category.clone());
        }
        Ok(note.clone())
    }

    async fn delete(&self, symbol: &Symbol) -> ApiResult<()> {
        match self.notes.borrow_mut().remove(symbol) {
            Some(_) => Ok(()),
            None => Err(not_found("Note not found for this symbol")),
        }
    }
}
