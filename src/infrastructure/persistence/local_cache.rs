use gloo::storage::{LocalStorage, Storage};

use crate::domain::annotations::{AnnotationStorage, StoredAnnotations};
use crate::domain::logging::LogComponent;
use crate::log_warn;

/// Fixed namespace for the durable client-side cache. Bump the suffix when
/// the snapshot shape changes.
pub const STORAGE_KEY: &str = "stock-dash::annotations::v1";

/// localStorage-backed snapshot cache. Best effort by contract: quota or
/// serialization failures are logged and dropped, a cold cache only costs an
/// extra fetch.
#[derive(Clone, Default)]
pub struct LocalAnnotationCache;

impl LocalAnnotationCache {
    pub fn new() -> Self {
        Self
    }
}

impl AnnotationStorage for LocalAnnotationCache {
    fn persist(&self, snapshot: &StoredAnnotations) {
        if let Err(err) = LocalStorage::set(STORAGE_KEY, snapshot) {
            log_warn!(
                LogComponent::Infrastructure("AnnotationCache"),
                "persist failed: {err:?}"
            );
        }
    }

    fn load(&self) -> Option<StoredAnnotations> {
        LocalStorage::get(STORAGE_KEY).ok()
    }
}
