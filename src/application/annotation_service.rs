use leptos::*;

use crate::domain::annotations::{
    Annotation, AnnotationDraft, AnnotationId, AnnotationPatch, AnnotationRepository,
    AnnotationStorage, AnnotationStore, Symbol,
};
use crate::domain::logging::LogComponent;
use crate::{log_debug, log_error, log_info};

/// Coordinates the annotation store with the remote repository.
///
/// Every operation follows the same contract: the canonical set only changes
/// after server confirmation, failures degrade to "state unchanged, error
/// recorded", and nothing here ever panics or propagates an error to the UI
/// event loop.
pub struct AnnotationService<R: AnnotationRepository> {
    repo: R,
    store: RwSignal<AnnotationStore>,
    cache: Option<Box<dyn AnnotationStorage>>,
}

impl<R: AnnotationRepository> AnnotationService<R> {
    pub fn new(repo: R, store: RwSignal<AnnotationStore>) -> Self {
        Self { repo, store, cache: None }
    }

    pub fn with_cache(repo: R, store: RwSignal<AnnotationStore>, cache: Box<dyn AnnotationStorage>) -> Self {
        Self { repo, store, cache: Some(cache) }
    }

    pub fn store(&self) -> RwSignal<AnnotationStore> {
        self.store
    }

    pub fn repo(&self) -> &R {
        &self.repo
    }

    /// Restore the durable snapshot (per-symbol map + visibility flag) from
    /// the client-side cache, typically once at startup.
    pub fn hydrate(&self) {
        if let Some(snapshot) = self.cache.as_ref().and_then(|c| c.load()) {
            log_info!(LogComponent::Application("Annotations"), "📦 Hydrated annotation cache");
            self.store.update(|s| s.restore(snapshot));
        }
    }

    fn persist(&self) {
        if let Some(cache) = &self.cache {
            cache.persist(&self.store.with_untracked(|s| s.snapshot()));
        }
    }

    /// Fetch all annotations for `symbol`, replacing that symbol's
    /// collection wholesale. Responses superseded by a newer load for the
    /// same symbol are discarded; loads for different symbols never
    /// interfere. Returns whether the response was applied.
    pub async fn load(&self, symbol: &Symbol) -> bool {
        let Some(ticket) = self.store.try_update(|s| {
            s.activate(symbol);
            s.begin_load(symbol)
        }) else {
            return false;
        };
        log_info!(
            LogComponent::Application("Annotations"),
            "📥 Loading annotations for {}",
            symbol.value()
        );

        let result = self.repo.list(symbol).await;
        let fetched_ok = result.is_ok();
        if let Err(err) = &result {
            log_error!(
                LogComponent::Application("Annotations"),
                "load {} failed: {}",
                symbol.value(),
                err
            );
        }

        let applied = self
            .store
            .try_update(|s| s.complete_load(symbol, ticket, result))
            .unwrap_or(false);
        if applied && fetched_ok {
            self.persist();
        }
        applied
    }

    /// Persist a finished drawing. Waits for the server id, appends on
    /// success; on failure records the error and leaves the collection
    /// unchanged. Never propagates past this boundary.
    pub async fn create(&self, draft: AnnotationDraft) -> Option<Annotation> {
        self.store.update(|s| s.begin_write());
        let created = match self.repo.create(&draft).await {
            Ok(annotation) => {
                log_debug!(
                    LogComponent::Application("Annotations"),
                    "✅ Created annotation {} on {}",
                    annotation.id,
                    annotation.symbol.value()
                );
                self.store.update(|s| s.apply_created(annotation.clone()));
                Some(annotation)
            }
            Err(err) => {
                log_error!(LogComponent::Application("Annotations"), "create failed: {}", err);
                self.store.update(|s| s.record_error(&err));
                None
            }
        };
        self.store.update(|s| s.finish_write());
        if created.is_some() {
            self.persist();
        }
        created
    }

    /// Patch an annotation of the *active* symbol. An id belonging to a
    /// non-active symbol is a no-op - no request is even issued.
    pub async fn update(&self, id: AnnotationId, patch: AnnotationPatch) -> Option<Annotation> {
        if !self.store.with_untracked(|s| s.contains_active(id)) {
            return None;
        }
        self.store.update(|s| s.begin_write());
        let updated = match self.repo.update(id, &patch).await {
            Ok(annotation) => {
                self.store.update(|s| { s.apply_updated(annotation.clone()); });
                Some(annotation)
            }
            Err(err) => {
                log_error!(LogComponent::Application("Annotations"), "update {} failed: {}", id, err);
                self.store.update(|s| s.record_error(&err));
                None
            }
        };
        self.store.update(|s| s.finish_write());
        if updated.is_some() {
            self.persist();
        }
        updated
    }

    /// Remove an annotation after server confirmation; a matching selection
    /// is cleared with it.
    pub async fn delete(&self, id: AnnotationId) -> bool {
        self.store.update(|s| s.begin_write());
        let removed = match self.repo.delete(id).await {
            Ok(()) => {
                self.store.update(|s| {
                    s.apply_removed(id);
                });
                true
            }
            Err(err) => {
                log_error!(LogComponent::Application("Annotations"), "delete {} failed: {}", id, err);
                self.store.update(|s| s.record_error(&err));
                false
            }
        };
        self.store.update(|s| s.finish_write());
        if removed {
            self.persist();
        }
        removed
    }

    /// Clear the named symbol's collection after server confirmation,
    /// regardless of which symbol is active. The backend reports 404 when
    /// the symbol was already empty; that counts as success, which keeps the
    /// operation idempotent.
    pub async fn delete_all(&self, symbol: &Symbol) -> bool {
        self.store.update(|s| s.begin_write());
        let cleared = match self.repo.delete_all(symbol).await {
            Ok(()) => true,
            Err(err) if err.is_not_found() => true,
            Err(err) => {
                log_error!(
                    LogComponent::Application("Annotations"),
                    "delete-all {} failed: {}",
                    symbol.value(),
                    err
                );
                self.store.update(|s| s.record_error(&err));
                false
            }
        };
        if cleared {
            self.store.update(|s| s.apply_cleared(symbol));
        }
        self.store.update(|s| s.finish_write());
        if cleared {
            self.persist();
        }
        cleared
    }

    /// Local flip of the master visibility switch, persisted to the durable
    /// cache but never sent over the network.
    pub fn toggle_global_visible(&self) -> bool {
        let visible = self.store.try_update(|s| s.toggle_global_visible()).unwrap_or(true);
        self.persist();
        visible
    }

    pub fn set_global_visible(&self, visible: bool) {
        self.store.update(|s| s.set_global_visible(visible));
        self.persist();
    }

    pub fn select(&self, id: Option<AnnotationId>) {
        self.store.update(|s| s.select(id));
    }
}
