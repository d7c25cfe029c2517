use serde::Serialize;

use crate::domain::annotations::MarkupStyle;
use crate::domain::errors::{AppError, SurfaceResult};
use crate::domain::overlay::{ChartSurface, OverlayGeometry};

/// One recorded surface call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SurfaceOp {
    Create { handle: u32, kind: String, x1: f64, y1: f64, x2: f64, y2: f64, color: String },
    Update { handle: u32, x1: f64, y1: f64, x2: f64, y2: f64 },
    SetVisible { handle: u32, visible: bool },
    Destroy { handle: u32 },
}

/// Chart-surface double that records every call, for reconciler tests and
/// headless debugging. `torn_down()` makes every call fail the way a surface
/// disposed mid-update would.
#[derive(Default)]
pub struct RecordingSurface {
    next_handle: u32,
    ops: Vec<SurfaceOp>,
    torn_down: bool,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface that was already disposed: every call errors.
    pub fn torn_down() -> Self {
        Self { torn_down: true, ..Self::default() }
    }

    /// Simulate a teardown race mid-session: every call from now on errors.
    pub fn tear_down(&mut self) {
        self.torn_down = true;
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn created(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, SurfaceOp::Create { .. })).count()
    }

    pub fn destroyed(&self) -> usize {
        self.ops.iter().filter(|op| matches!(op, SurfaceOp::Destroy { .. })).count()
    }

    fn guard(&self) -> SurfaceResult<()> {
        if self.torn_down {
            return Err(AppError::Surface("surface already torn down".to_string()));
        }
        Ok(())
    }
}

impl ChartSurface for RecordingSurface {
    type Handle = u32;

    fn create_overlay(&mut self, geometry: &OverlayGeometry, style: &MarkupStyle) -> SurfaceResult<u32> {
        self.guard()?;
        self.next_handle += 1;
        self.ops.push(SurfaceOp::Create {
            handle: self.next_handle,
            kind: geometry.kind.to_string(),
            x1: geometry.a.x,
            y1: geometry.a.y,
            x2: geometry.b.x,
            y2: geometry.b.y,
            color: style.color.value().to_string(),
        });
        Ok(self.next_handle)
    }

    fn update_overlay(
        &mut self,
        handle: &mut u32,
        geometry: &OverlayGeometry,
        _style: &MarkupStyle,
    ) -> SurfaceResult<()> {
        self.guard()?;
        self.ops.push(SurfaceOp::Update {
            handle: *handle,
            x1: geometry.a.x,
            y1: geometry.a.y,
            x2: geometry.b.x,
            y2: geometry.b.y,
        });
        Ok(())
    }

    fn set_overlay_visible(&mut self, handle: &mut u32, visible: bool) -> SurfaceResult<()> {
        self.guard()?;
        self.ops.push(SurfaceOp::SetVisible { handle: *handle, visible });
        Ok(())
    }

    fn destroy_overlay(&mut self, handle: u32) -> SurfaceResult<()> {
        self.guard()?;
        self.ops.push(SurfaceOp::Destroy { handle });
        Ok(())
    }
}
