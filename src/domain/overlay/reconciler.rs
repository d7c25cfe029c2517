use std::collections::{HashMap, HashSet};

use crate::domain::annotations::Annotation;
use crate::domain::logging::{LogComponent, get_time_provider};
use crate::log_warn;

use super::surface::{ChartSurface, OverlayKey, overlay_geometry};

/// Maps the canonical annotation set (plus the live drawing preview) onto
/// the chart surface's overlay handles.
///
/// The reconciler is the single writer of the handle map; no other
/// component creates or destroys handles. Each `sync` pass is synchronous
/// and run-to-completion, so overlays are never observed half-applied, and
/// surface failures (teardown races) are swallowed at the call site rather
/// than aborting the pass.
pub struct OverlayReconciler<S: ChartSurface> {
    surface: S,
    handles: HashMap<OverlayKey, S::Handle>,
}

impl<S: ChartSurface> OverlayReconciler<S> {
    pub fn new(surface: S) -> Self {
        Self { surface, handles: HashMap::new() }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn handle_count(&self) -> usize {
        self.handles.len()
    }

    pub fn has_handle(&self, key: OverlayKey) -> bool {
        self.handles.contains_key(&key)
    }

    /// One reconciliation pass over the active symbol's annotations.
    pub fn sync(&mut self, annotations: &[Annotation], global_visible: bool, preview: Option<&Annotation>) {
        let now_ms = get_time_provider().current_timestamp() as f64;

        let mut valid = HashSet::with_capacity(annotations.len());
        for annotation in annotations {
            valid.insert(annotation.id);
            let key = OverlayKey::Committed(annotation.id);

            if !annotation.visible || !global_visible {
                // Hidden in place - geometry untouched, handle kept.
                if let Some(handle) = self.handles.get_mut(&key) {
                    swallow("hide", self.surface.set_overlay_visible(handle, false));
                }
                continue;
            }

            // Missing required anchors: renderer-skip. Patches can set but
            // never clear anchors, so a handle cannot exist for this id.
            let Some(geometry) = overlay_geometry(annotation, now_ms) else {
                continue;
            };
            let style = annotation.style();

            if let Some(handle) = self.handles.get_mut(&key) {
                swallow("update", self.surface.update_overlay(handle, &geometry, &style));
                swallow("show", self.surface.set_overlay_visible(handle, true));
            } else {
                match self.surface.create_overlay(&geometry, &style) {
                    Ok(handle) => {
                        self.handles.insert(key, handle);
                    }
                    Err(err) => {
                        log_warn!(
                            LogComponent::Domain("OverlayReconciler"),
                            "create overlay failed: {err}"
                        );
                    }
                }
            }
        }

        // The preview rides under its own key with the same geometry rules;
        // absence tears its handle down.
        match preview.and_then(|p| overlay_geometry(p, now_ms).map(|g| (g, p.style()))) {
            Some((geometry, style)) => {
                if let Some(handle) = self.handles.get_mut(&OverlayKey::Preview) {
                    swallow("update preview", self.surface.update_overlay(handle, &geometry, &style));
                } else {
                    match self.surface.create_overlay(&geometry, &style) {
                        Ok(handle) => {
                            self.handles.insert(OverlayKey::Preview, handle);
                        }
                        Err(err) => {
                            log_warn!(
                                LogComponent::Domain("OverlayReconciler"),
                                "create preview overlay failed: {err}"
                            );
                        }
                    }
                }
            }
            None => {
                if let Some(handle) = self.handles.remove(&OverlayKey::Preview) {
                    swallow("destroy preview", self.surface.destroy_overlay(handle));
                }
            }
        }

        // Orphan sweep: drop every committed handle whose id left the
        // canonical set.
        let stale: Vec<OverlayKey> = self
            .handles
            .keys()
            .filter(|key| match key {
                OverlayKey::Committed(id) => !valid.contains(id),
                OverlayKey::Preview => false,
            })
            .copied()
            .collect();
        for key in stale {
            if let Some(handle) = self.handles.remove(&key) {
                swallow("destroy", self.surface.destroy_overlay(handle));
            }
        }
    }

    /// Tear down every handle, e.g. on component unmount. Surface errors are
    /// ignored - the surface may already be gone.
    pub fn clear(&mut self) {
        for (_, handle) in self.handles.drain() {
            swallow("clear", self.surface.destroy_overlay(handle));
        }
    }
}

fn swallow(op: &str, result: Result<(), crate::domain::errors::AppError>) {
    if let Err(err) = result {
        log_warn!(LogComponent::Domain("OverlayReconciler"), "{op} overlay failed: {err}");
    }
}
