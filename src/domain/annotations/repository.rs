use crate::domain::errors::ApiResult;

use super::entities::{AnalysisNote, Annotation, AnnotationDraft, AnnotationPatch, NoteDraft, NotePatch};
use super::value_objects::{AnnotationId, Symbol};

/// Port to the remote annotation collection. Stateless request wrappers:
/// one call, one typed outcome, failures carry the HTTP status where the
/// server answered.
#[allow(async_fn_in_trait)]
pub trait AnnotationRepository {
    /// All annotations for a symbol, in the store's arrival order.
    async fn list(&self, symbol: &Symbol) -> ApiResult<Vec<Annotation>>;

    /// Persist a draft; the server assigns `id` and `created_at`.
    async fn create(&self, draft: &AnnotationDraft) -> ApiResult<Annotation>;

    async fn get(&self, id: AnnotationId) -> ApiResult<Annotation>;

    /// Partial patch; the server echoes the updated annotation.
    async fn update(&self, id: AnnotationId, patch: &AnnotationPatch) -> ApiResult<Annotation>;

    async fn delete(&self, id: AnnotationId) -> ApiResult<()>;

    /// Delete every annotation of a symbol. The backend reports 404 when
    /// there was nothing to delete; callers decide what that means.
    async fn delete_all(&self, symbol: &Symbol) -> ApiResult<()>;
}

/// Port to the client-side durable cache for the per-symbol annotation map
/// and the master visibility flag. Best effort: failures are logged by the
/// implementation, never surfaced - a cold cache just means an extra fetch.
pub trait AnnotationStorage {
    fn persist(&self, snapshot: &super::store::StoredAnnotations);
    fn load(&self) -> Option<super::store::StoredAnnotations>;
}

/// Port to the one-note-per-symbol resource. A 404 from `get` is surfaced
/// as-is - mapping it to "no note exists" is the caller's job, not the
/// repository's.
#[allow(async_fn_in_trait)]
pub trait NoteRepository {
    async fn get(&self, symbol: &Symbol) -> ApiResult<AnalysisNote>;

    /// Create-or-replace.
    async fn put(&self, symbol: &Symbol, draft: &NoteDraft) -> ApiResult<AnalysisNote>;

    async fn patch(&self, symbol: &Symbol, patch: &NotePatch) -> ApiResult<AnalysisNote>;

    async fn delete(&self, symbol: &Symbol) -> ApiResult<()>;
}
