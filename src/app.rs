use std::cell::RefCell;
use std::rc::Rc;

use leptos::*;
use strum::IntoEnumIterator;

use crate::application::AnnotationService;
use crate::domain::annotations::{DrawingTool, Symbol};
use crate::domain::logging::get_time_provider;
use crate::domain::overlay::OverlayReconciler;
use crate::global_state::{active_symbol, annotation_store, cursor_position, drawing_session};
use crate::infrastructure::http::AnnotationRestClient;
use crate::infrastructure::persistence::LocalAnnotationCache;
use crate::infrastructure::rendering::{Canvas2dSurface, ChartScale};

const CANVAS_ID: &str = "annotation-canvas";
const CANVAS_WIDTH: u32 = 960;
const CANVAS_HEIGHT: u32 = 480;

fn default_window() -> ChartScale {
    let now_ms = get_time_provider().current_timestamp() as f64;
    ChartScale {
        time_start_ms: now_ms - 30.0 * 24.0 * 60.0 * 60.0 * 1000.0,
        time_end_ms: now_ms,
        price_min: 0.0,
        price_max: 5000.0,
    }
}

/// 🦀 Annotation dashboard shell.
///
/// The reconcile effect below is the render driver: it reruns once per
/// observed change to the canonical set, the visibility flag or the drawing
/// preview, and each run is one complete reconciliation pass.
#[component]
pub fn App() -> impl IntoView {
    let service = Rc::new(AnnotationService::with_cache(
        AnnotationRestClient::new(),
        annotation_store(),
        Box::new(LocalAnnotationCache::new()),
    ));
    service.hydrate();

    let reconciler: Rc<RefCell<Option<OverlayReconciler<Canvas2dSurface>>>> =
        Rc::new(RefCell::new(None));

    {
        let reconciler = Rc::clone(&reconciler);
        create_effect(move |_| {
            let preview = cursor_position()
                .get()
                .and_then(|cursor| drawing_session().with(|d| d.preview(cursor)));
            annotation_store().with(|store| {
                let mut slot = reconciler.borrow_mut();
                if slot.is_none() {
                    if let Ok(surface) =
                        Canvas2dSurface::attach(CANVAS_ID, CANVAS_WIDTH, CANVAS_HEIGHT, default_window())
                    {
                        *slot = Some(OverlayReconciler::new(surface));
                    }
                }
                if let Some(rec) = slot.as_mut() {
                    rec.sync(store.active_annotations(), store.global_visible(), preview.as_ref());
                }
            });
        });
    }

    let symbol_input = create_rw_signal(active_symbol().get_untracked().value().to_string());

    let load_symbol = {
        let service = Rc::clone(&service);
        move |_| {
            let symbol = Symbol::from(symbol_input.get_untracked().as_str());
            active_symbol().set(symbol.clone());
            let service = Rc::clone(&service);
            spawn_local(async move {
                service.load(&symbol).await;
            });
        }
    };

    let clear_all = {
        let service = Rc::clone(&service);
        move |_| {
            let symbol = active_symbol().get_untracked();
            let service = Rc::clone(&service);
            spawn_local(async move {
                service.delete_all(&symbol).await;
            });
        }
    };

    let toggle_visible = {
        let service = Rc::clone(&service);
        move |_| {
            service.toggle_global_visible();
        }
    };

    let tool_buttons = DrawingTool::iter()
        .filter(|tool| *tool != DrawingTool::Select)
        .map(|tool| {
            view! {
                <button
                    class="tool"
                    class:active=move || drawing_session().with(|d| d.tool() == tool)
                    on:click=move |_| {
                        let symbol = active_symbol().get_untracked();
                        drawing_session().update(|d| d.arm(tool, symbol));
                    }
                >
                    {tool.as_ref().replace('_', " ")}
                </button>
            }
        })
        .collect_view();

    let status = move || {
        annotation_store().with(|s| {
            let mut parts = vec![format!("{} annotations", s.active_annotations().len())];
            if s.is_loading() {
                parts.push("loading…".to_string());
            }
            if s.is_saving() {
                parts.push("saving…".to_string());
            }
            parts.join(" · ")
        })
    };

    view! {
        <style>
            {r#"
            .annotation-app { font-family: -apple-system, sans-serif; padding: 16px; color: #e7e7e7; background: #15181f; }
            .annotation-app .toolbar { display: flex; gap: 6px; margin-bottom: 10px; flex-wrap: wrap; }
            .annotation-app button { background: #242936; color: inherit; border: 1px solid #39404f; border-radius: 4px; padding: 6px 10px; cursor: pointer; }
            .annotation-app button.active { background: #3b82f6; border-color: #3b82f6; }
            .annotation-app .error { background: #7f1d1d; padding: 8px; border-radius: 4px; margin: 8px 0; }
            .annotation-app canvas { background: #0c0e13; border: 1px solid #39404f; }
            .annotation-app .status { margin-top: 8px; opacity: 0.8; font-size: 13px; }
            "#}
        </style>
        <div class="annotation-app">
            <div class="toolbar">
                <input
                    prop:value=move || symbol_input.get()
                    on:input=move |ev| symbol_input.set(event_target_value(&ev))
                />
                <button on:click=load_symbol>"Load"</button>
                {tool_buttons}
                <button on:click=move |_| drawing_session().update(|d| d.cancel())>"Cancel"</button>
                <button on:click=toggle_visible>
                    {move || {
                        if annotation_store().with(|s| s.global_visible()) { "Hide all" } else { "Show all" }
                    }}
                </button>
                <button on:click=clear_all>"Clear symbol"</button>
            </div>
            {move || {
                annotation_store()
                    .with(|s| s.last_error().map(str::to_string))
                    .map(|err| view! { <div class="error">{err}</div> })
            }}
            <canvas id=CANVAS_ID width=CANVAS_WIDTH height=CANVAS_HEIGHT></canvas>
            <div class="status">{status}</div>
        </div>
    }
}
