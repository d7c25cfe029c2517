use std::collections::HashMap;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::CanvasRenderingContext2d;

use crate::domain::annotations::{AnnotationKind, LineStyle, MarkupStyle};
use crate::domain::errors::{AppError, SurfaceResult};
use crate::domain::overlay::{ChartSurface, OverlayGeometry};

/// Linear mapping from (time-ms, price) data coordinates to canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScale {
    pub time_start_ms: f64,
    pub time_end_ms: f64,
    pub price_min: f64,
    pub price_max: f64,
}

impl ChartScale {
    fn x_px(&self, time_ms: f64, width: f64) -> f64 {
        let span = (self.time_end_ms - self.time_start_ms).max(1.0);
        (time_ms - self.time_start_ms) / span * width
    }

    fn y_px(&self, price: f64, height: f64) -> f64 {
        let span = (self.price_max - self.price_min).max(f64::EPSILON);
        // Price axis grows upwards, canvas y grows downwards.
        height - (price - self.price_min) / span * height
    }
}

struct OverlayDrawState {
    geometry: OverlayGeometry,
    style: MarkupStyle,
    visible: bool,
}

/// Retained Canvas-2D chart surface: overlays live in a draw list that is
/// replayed in full after every mutation.
pub struct Canvas2dSurface {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    scale: ChartScale,
    overlays: HashMap<u32, OverlayDrawState>,
    next_handle: u32,
}

impl Canvas2dSurface {
    /// Attach to a canvas element by id and size it.
    pub fn attach(canvas_id: &str, width: u32, height: u32, scale: ChartScale) -> SurfaceResult<Self> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| AppError::Surface("document not available".to_string()))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| AppError::Surface(format!("canvas element '{canvas_id}' not found")))?
            .dyn_into::<web_sys::HtmlCanvasElement>()
            .map_err(|_| AppError::Surface("element is not a canvas".to_string()))?;

        canvas.set_width(width);
        canvas.set_height(height);

        let context = canvas
            .get_context("2d")
            .map_err(|_| AppError::Surface("failed to get 2D context".to_string()))?
            .ok_or_else(|| AppError::Surface("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::Surface("failed to cast to 2D context".to_string()))?;

        Ok(Self {
            context,
            width: width as f64,
            height: height as f64,
            scale,
            overlays: HashMap::new(),
            next_handle: 0,
        })
    }

    /// Move the visible time/price window, e.g. after a pan or zoom.
    pub fn set_window(&mut self, scale: ChartScale) {
        self.scale = scale;
        self.redraw();
    }

    fn redraw(&self) {
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
        for state in self.overlays.values().filter(|s| s.visible) {
            self.draw(state);
        }
    }

    fn draw(&self, state: &OverlayDrawState) {
        let ctx = &self.context;
        ctx.set_stroke_style(&JsValue::from_str(state.style.color.value()));
        ctx.set_line_width(state.style.line_width.pixels());

        let dash = match state.style.line_style {
            LineStyle::Solid => js_sys::Array::new(),
            LineStyle::Dashed => js_sys::Array::of2(&JsValue::from_f64(8.0), &JsValue::from_f64(4.0)),
            LineStyle::Dotted => js_sys::Array::of2(&JsValue::from_f64(2.0), &JsValue::from_f64(3.0)),
        };
        let _ = ctx.set_line_dash(&dash);

        let x1 = self.scale.x_px(state.geometry.a.x, self.width);
        let y1 = self.scale.y_px(state.geometry.a.y, self.height);
        let x2 = self.scale.x_px(state.geometry.b.x, self.width);
        let y2 = self.scale.y_px(state.geometry.b.y, self.height);

        match state.geometry.kind {
            AnnotationKind::Rectangle => {
                ctx.stroke_rect(x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs());
            }
            _ => {
                ctx.begin_path();
                ctx.move_to(x1, y1);
                ctx.line_to(x2, y2);
                ctx.stroke();
            }
        }
    }
}

impl ChartSurface for Canvas2dSurface {
    type Handle = u32;

    fn create_overlay(&mut self, geometry: &OverlayGeometry, style: &MarkupStyle) -> SurfaceResult<u32> {
        self.next_handle += 1;
        let handle = self.next_handle;
        self.overlays.insert(
            handle,
            OverlayDrawState { geometry: *geometry, style: style.clone(), visible: true },
        );
        self.redraw();
        Ok(handle)
    }

    fn update_overlay(
        &mut self,
        handle: &mut u32,
        geometry: &OverlayGeometry,
        style: &MarkupStyle,
    ) -> SurfaceResult<()> {
        let state = self
            .overlays
            .get_mut(handle)
            .ok_or_else(|| AppError::Surface(format!("unknown overlay handle {handle}")))?;
        state.geometry = *geometry;
        state.style = style.clone();
        self.redraw();
        Ok(())
    }

    fn set_overlay_visible(&mut self, handle: &mut u32, visible: bool) -> SurfaceResult<()> {
        let state = self
            .overlays
            .get_mut(handle)
            .ok_or_else(|| AppError::Surface(format!("unknown overlay handle {handle}")))?;
        if state.visible != visible {
            state.visible = visible;
            self.redraw();
        }
        Ok(())
    }

    fn destroy_overlay(&mut self, handle: u32) -> SurfaceResult<()> {
        // Destroying after teardown must stay safe; a missing entry is fine.
        if self.overlays.remove(&handle).is_some() {
            self.redraw();
        }
        Ok(())
    }
}
