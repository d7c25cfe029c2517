use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

use super::entities::{Annotation, AnnotationDraft, MarkupStyle};
use super::value_objects::{Anchor, AnnotationKind, Symbol};

/// The armed drawing tool. `Select` is the neutral value: no drawing in
/// progress, pointer input falls through to the chart.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum DrawingTool {
    #[default]
    #[strum(serialize = "SELECT")]
    #[serde(rename = "SELECT")]
    Select,

    #[strum(serialize = "TRENDLINE")]
    #[serde(rename = "TRENDLINE")]
    Trendline,

    #[strum(serialize = "HORIZONTAL_LINE")]
    #[serde(rename = "HORIZONTAL_LINE")]
    HorizontalLine,

    #[strum(serialize = "RECTANGLE")]
    #[serde(rename = "RECTANGLE")]
    Rectangle,

    #[strum(serialize = "TEXT")]
    #[serde(rename = "TEXT")]
    Text,

    #[strum(serialize = "ARROW")]
    #[serde(rename = "ARROW")]
    Arrow,

    #[strum(serialize = "FIBONACCI")]
    #[serde(rename = "FIBONACCI")]
    Fibonacci,

    #[strum(serialize = "SUPPORT_RESISTANCE")]
    #[serde(rename = "SUPPORT_RESISTANCE")]
    SupportResistance,
}

impl DrawingTool {
    /// The single tool-to-kind mapping. Everything that needs the kind of an
    /// in-progress drawing (commit payload, preview overlay) goes through
    /// here.
    pub fn kind(&self) -> Option<AnnotationKind> {
        match self {
            Self::Select => None,
            Self::Trendline => Some(AnnotationKind::Trendline),
            Self::HorizontalLine => Some(AnnotationKind::HorizontalLine),
            Self::Rectangle => Some(AnnotationKind::Rectangle),
            Self::Text => Some(AnnotationKind::Text),
            Self::Arrow => Some(AnnotationKind::Arrow),
            Self::Fibonacci => Some(AnnotationKind::Fibonacci),
            Self::SupportResistance => Some(AnnotationKind::SupportResistance),
        }
    }
}

/// Drawing protocol step. Completion is an instantaneous transition back to
/// `Idle` that hands the finished payload to the caller; there is no "done"
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawStep {
    #[default]
    Idle = 0,
    FirstPointSet = 1,
}

/// Ephemeral state machine for in-progress pointer input. Owns no persisted
/// data; the canonical set lives in the annotation store.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrawingSession {
    tool: DrawingTool,
    step: DrawStep,
    symbol: Option<Symbol>,
    first_point: Option<Anchor>,
    style: MarkupStyle,
}

impl DrawingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tool(&self) -> DrawingTool {
        self.tool
    }

    pub fn step(&self) -> DrawStep {
        self.step
    }

    pub fn symbol(&self) -> Option<&Symbol> {
        self.symbol.as_ref()
    }

    /// Armed means a non-select tool is active, whether or not a first point
    /// has been placed yet.
    pub fn is_armed(&self) -> bool {
        self.tool != DrawingTool::Select
    }

    /// Stroke style applied to the next committed drawing.
    pub fn style(&self) -> &MarkupStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: MarkupStyle) {
        self.style = style;
    }

    /// Arm a tool for `symbol`. Re-arming the tool that is already active
    /// toggles back to select; arming select is a cancel.
    pub fn arm(&mut self, tool: DrawingTool, symbol: Symbol) {
        if tool == DrawingTool::Select || tool == self.tool {
            self.cancel();
            return;
        }
        self.tool = tool;
        self.symbol = Some(symbol);
        self.step = DrawStep::Idle;
        self.first_point = None;
    }

    /// Discard any in-progress drawing and disarm.
    pub fn cancel(&mut self) {
        self.tool = DrawingTool::Select;
        self.symbol = None;
        self.step = DrawStep::Idle;
        self.first_point = None;
    }

    /// Advance the drawing protocol by one pointer placement.
    ///
    /// The first placement records the anchor; the second returns the
    /// finished commit payload and resets to step zero *synchronously* - the
    /// create round-trip is fire-and-forget from the state machine's point
    /// of view, and a failed create never resurrects the drawing state.
    pub fn place(&mut self, point: Anchor) -> Option<AnnotationDraft> {
        let kind = self.tool.kind()?;
        let symbol = self.symbol.clone()?;

        match self.step {
            DrawStep::Idle => {
                self.first_point = Some(point);
                self.step = DrawStep::FirstPointSet;
                None
            }
            DrawStep::FirstPointSet => {
                let first = self.first_point.take()?;
                self.step = DrawStep::Idle;
                Some(AnnotationDraft::from_points(kind, symbol, first, point, self.style.clone()))
            }
        }
    }

    /// Synthetic, never-persisted annotation for the drawing in progress.
    ///
    /// `None` until the first point is placed; afterwards the current cursor
    /// position stands in for the second anchor, using the same kind mapping
    /// as the commit path.
    pub fn preview(&self, cursor: Anchor) -> Option<Annotation> {
        if self.step != DrawStep::FirstPointSet {
            return None;
        }
        let kind = self.tool.kind()?;
        let symbol = self.symbol.clone()?;
        let first = self.first_point?;
        Some(AnnotationDraft::from_points(kind, symbol, first, cursor, self.style.clone()).as_preview())
    }
}
