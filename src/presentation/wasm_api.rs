use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use js_sys::Promise;
use leptos::*;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use crate::application::{AnnotationService, NoteService};
use crate::domain::annotations::{
    Anchor, AnnotationId, Color, DrawingTool, LineStyle, LineWidth, MarkupStyle, NoteDraft, Symbol,
};
use crate::domain::logging::{LogComponent, get_logger};
use crate::domain::overlay::OverlayReconciler;
use crate::global_state::{active_symbol, annotation_store, cursor_position, drawing_session};
use crate::infrastructure::http::{AnnotationRestClient, NoteRestClient};
use crate::infrastructure::persistence::LocalAnnotationCache;
use crate::infrastructure::rendering::{Canvas2dSurface, ChartScale};

type SharedReconciler = Rc<RefCell<Option<OverlayReconciler<Canvas2dSurface>>>>;

/// One reconciliation pass against the current global state. Synchronous and
/// run-to-completion; called after every observed change.
fn reconcile(reconciler: &SharedReconciler) {
    let mut slot = reconciler.borrow_mut();
    let Some(rec) = slot.as_mut() else {
        return;
    };
    let preview = cursor_position()
        .get_untracked()
        .and_then(|cursor| drawing_session().with_untracked(|d| d.preview(cursor)));
    annotation_store().with_untracked(|store| {
        rec.sync(store.active_annotations(), store.global_visible(), preview.as_ref());
    });
}

/// WASM bridge for JavaScript hosts. Minimal logic - every call forwards to
/// the application layer and follows up with a reconcile pass.
#[wasm_bindgen]
pub struct AnnotationChartApi {
    canvas_id: String,
    service: Rc<AnnotationService<AnnotationRestClient>>,
    notes: Rc<NoteService<NoteRestClient>>,
    reconciler: SharedReconciler,
}

#[wasm_bindgen]
impl AnnotationChartApi {
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: String) -> Self {
        let service = AnnotationService::with_cache(
            AnnotationRestClient::new(),
            annotation_store(),
            Box::new(LocalAnnotationCache::new()),
        );
        service.hydrate();
        Self {
            canvas_id,
            service: Rc::new(service),
            notes: Rc::new(NoteService::new(NoteRestClient::new())),
            reconciler: Rc::new(RefCell::new(None)),
        }
    }

    /// Attach to the canvas and set the visible time/price window.
    #[wasm_bindgen(js_name = attach)]
    pub fn attach(
        &self,
        width: u32,
        height: u32,
        time_start_ms: f64,
        time_end_ms: f64,
        price_min: f64,
        price_max: f64,
    ) -> Result<(), JsValue> {
        let scale = ChartScale { time_start_ms, time_end_ms, price_min, price_max };
        let surface = Canvas2dSurface::attach(&self.canvas_id, width, height, scale)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;
        *self.reconciler.borrow_mut() = Some(OverlayReconciler::new(surface));
        reconcile(&self.reconciler);
        Ok(())
    }

    /// Pan/zoom: move the visible window and re-render.
    #[wasm_bindgen(js_name = setWindow)]
    pub fn set_window(
        &self,
        time_start_ms: f64,
        time_end_ms: f64,
        price_min: f64,
        price_max: f64,
    ) {
        if let Some(rec) = &mut *self.reconciler.borrow_mut() {
            rec.surface_mut().set_window(ChartScale { time_start_ms, time_end_ms, price_min, price_max });
        }
        reconcile(&self.reconciler);
    }

    /// Switch the chart to `symbol` and load its annotations.
    #[wasm_bindgen(js_name = loadSymbol)]
    pub fn load_symbol(&self, symbol: String) -> Promise {
        let symbol = Symbol::from(symbol.as_str());
        active_symbol().set(symbol.clone());
        let service = Rc::clone(&self.service);
        let reconciler = Rc::clone(&self.reconciler);
        future_to_promise(async move {
            let applied = service.load(&symbol).await;
            reconcile(&reconciler);
            let count = annotation_store().with_untracked(|s| s.annotations(&symbol).len());
            get_logger().info(
                LogComponent::Presentation("Api"),
                &format!("📈 {} annotations on {} (applied: {})", count, symbol.value(), applied),
            );
            Ok(JsValue::from_f64(count as f64))
        })
    }

    /// Arm a drawing tool by wire name, e.g. "TRENDLINE". Re-arming the
    /// active tool toggles back to select.
    #[wasm_bindgen(js_name = armTool)]
    pub fn arm_tool(&self, tool: String) -> Result<(), JsValue> {
        let tool = DrawingTool::from_str(&tool)
            .map_err(|_| JsValue::from_str(&format!("unknown tool: {tool}")))?;
        let symbol = active_symbol().get_untracked();
        drawing_session().update(|d| d.arm(tool, symbol));
        reconcile(&self.reconciler);
        Ok(())
    }

    #[wasm_bindgen(js_name = cancelDrawing)]
    pub fn cancel_drawing(&self) {
        drawing_session().update(|d| d.cancel());
        reconcile(&self.reconciler);
    }

    /// Stroke style for subsequently drawn annotations, e.g.
    /// ("#FFA500", "DASHED", "3").
    #[wasm_bindgen(js_name = setDrawStyle)]
    pub fn set_draw_style(
        &self,
        color: String,
        line_style: String,
        line_width: String,
    ) -> Result<(), JsValue> {
        let style = MarkupStyle {
            color: Color::from(color.as_str()),
            line_style: LineStyle::from_str(&line_style)
                .map_err(|_| JsValue::from_str(&format!("unknown line style: {line_style}")))?,
            line_width: LineWidth::from_str(&line_width)
                .map_err(|_| JsValue::from_str(&format!("unknown line width: {line_width}")))?,
        };
        drawing_session().update(|d| d.set_style(style));
        Ok(())
    }

    /// One pointer placement in data coordinates. The second placement of a
    /// drawing resolves with the created annotation id (or null when the
    /// create failed or nothing was committed).
    #[wasm_bindgen(js_name = placePoint)]
    pub fn place_point(&self, time_ms: f64, price: f64) -> Promise {
        let point = Anchor::new(time_ms, price);
        cursor_position().set(Some(point));
        let draft = drawing_session().try_update(|d| d.place(point)).flatten();
        // The session is already back at step zero; the preview disappears
        // with this pass no matter how the create turns out.
        reconcile(&self.reconciler);

        match draft {
            Some(draft) => {
                let service = Rc::clone(&self.service);
                let reconciler = Rc::clone(&self.reconciler);
                future_to_promise(async move {
                    let created = service.create(draft).await;
                    reconcile(&reconciler);
                    Ok(created
                        .map(|a| JsValue::from_f64(a.id.value() as f64))
                        .unwrap_or(JsValue::NULL))
                })
            }
            None => future_to_promise(async { Ok(JsValue::NULL) }),
        }
    }

    /// Cursor motion in data coordinates; drives the preview overlay.
    #[wasm_bindgen(js_name = moveCursor)]
    pub fn move_cursor(&self, time_ms: f64, price: f64) {
        cursor_position().set(Some(Anchor::new(time_ms, price)));
        if drawing_session().with_untracked(|d| d.step() == crate::domain::annotations::DrawStep::FirstPointSet) {
            reconcile(&self.reconciler);
        }
    }

    /// Master visibility switch - local state only, no network call.
    #[wasm_bindgen(js_name = toggleVisible)]
    pub fn toggle_visible(&self) -> bool {
        let visible = self.service.toggle_global_visible();
        reconcile(&self.reconciler);
        visible
    }

    #[wasm_bindgen(js_name = selectAnnotation)]
    pub fn select_annotation(&self, id: i64) {
        self.service.select(Some(AnnotationId::from(id)));
    }

    #[wasm_bindgen(js_name = clearSelection)]
    pub fn clear_selection(&self) {
        self.service.select(None);
    }

    #[wasm_bindgen(js_name = deleteSelected)]
    pub fn delete_selected(&self) -> Promise {
        let selected = annotation_store().with_untracked(|s| s.selected());
        let service = Rc::clone(&self.service);
        let reconciler = Rc::clone(&self.reconciler);
        future_to_promise(async move {
            let Some(id) = selected else {
                return Ok(JsValue::from_bool(false));
            };
            let removed = service.delete(id).await;
            reconcile(&reconciler);
            Ok(JsValue::from_bool(removed))
        })
    }

    /// Delete every annotation of the active symbol.
    #[wasm_bindgen(js_name = clearAnnotations)]
    pub fn clear_annotations(&self) -> Promise {
        let symbol = active_symbol().get_untracked();
        let service = Rc::clone(&self.service);
        let reconciler = Rc::clone(&self.reconciler);
        future_to_promise(async move {
            let cleared = service.delete_all(&symbol).await;
            reconcile(&reconciler);
            Ok(JsValue::from_bool(cleared))
        })
    }

    /// Active symbol's annotations as a JSON string, for host-side panels.
    #[wasm_bindgen(js_name = annotationsJson)]
    pub fn annotations_json(&self) -> String {
        annotation_store()
            .with_untracked(|s| serde_json::to_string(s.active_annotations()))
            .unwrap_or_else(|_| "[]".to_string())
    }

    /// Resolves with the note JSON, or null when no note exists (404).
    #[wasm_bindgen(js_name = loadNote)]
    pub fn load_note(&self, symbol: String) -> Promise {
        let symbol = Symbol::from(symbol.as_str());
        let notes = Rc::clone(&self.notes);
        future_to_promise(async move {
            match notes.fetch(&symbol).await {
                Ok(Some(note)) => serde_json::to_string(&note)
                    .map(|json| JsValue::from_str(&json))
                    .map_err(|err| JsValue::from_str(&err.to_string())),
                Ok(None) => Ok(JsValue::NULL),
                Err(err) => Err(JsValue::from_str(&err.to_string())),
            }
        })
    }

    #[wasm_bindgen(js_name = saveNote)]
    pub fn save_note(&self, symbol: String, title: String, content: String) -> Promise {
        let symbol = Symbol::from(symbol.as_str());
        let draft = NoteDraft { symbol: symbol.clone(), title, content, tags: None, category: None };
        let notes = Rc::clone(&self.notes);
        future_to_promise(async move {
            notes
                .upsert(&symbol, &draft)
                .await
                .map(|note| JsValue::from_f64(note.id as f64))
                .map_err(|err| JsValue::from_str(&err.to_string()))
        })
    }

    #[wasm_bindgen(js_name = deleteNote)]
    pub fn delete_note(&self, symbol: String) -> Promise {
        let symbol = Symbol::from(symbol.as_str());
        let notes = Rc::clone(&self.notes);
        future_to_promise(async move {
            notes
                .remove(&symbol)
                .await
                .map(|_| JsValue::TRUE)
                .map_err(|err| JsValue::from_str(&err.to_string()))
        })
    }
}
