use crate::domain::annotations::{AnalysisNote, NoteDraft, NotePatch, NoteRepository, Symbol};
use crate::domain::errors::ApiResult;

/// Thin orchestration over the one-note-per-symbol resource.
///
/// The repository reports a missing note as a plain HTTP 404; this is where
/// that status becomes the explicit "no note exists" state instead of an
/// error.
pub struct NoteService<N: NoteRepository> {
    repo: N,
}

impl<N: NoteRepository> NoteService<N> {
    pub fn new(repo: N) -> Self {
        Self { repo }
    }

    /// `Ok(None)` when no note exists for the symbol; every other failure is
    /// a real error.
    pub async fn fetch(&self, symbol: &Symbol) -> ApiResult<Option<AnalysisNote>> {
        match self.repo.get(symbol).await {
            Ok(note) => Ok(Some(note)),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Create-or-replace the note for a symbol.
    pub async fn upsert(&self, symbol: &Symbol, draft: &NoteDraft) -> ApiResult<AnalysisNote> {
        self.repo.put(symbol, draft).await
    }

    pub async fn amend(&self, symbol: &Symbol, patch: &NotePatch) -> ApiResult<AnalysisNote> {
        self.repo.patch(symbol, patch).await
    }

    /// Deleting an absent note is already the desired end state.
    pub async fn remove(&self, symbol: &Symbol) -> ApiResult<()> {
        match self.repo.delete(symbol).await {
            Ok(()) => Ok(()),
            Err(err) if err.is_not_found() => Ok(()),
            Err(err) => Err(err),
        }
    }
}
