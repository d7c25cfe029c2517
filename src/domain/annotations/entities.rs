use serde::{Deserialize, Serialize};

use super::value_objects::{Anchor, AnnotationId, AnnotationKind, Color, LineStyle, LineWidth, Symbol};

/// Domain entity - a persisted markup object on the chart.
///
/// `id` and the timestamps are assigned by the backing store; a synthetic
/// preview annotation carries `AnnotationId::PREVIEW` and no timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub symbol: Symbol,
    #[serde(rename = "annotation_type")]
    pub kind: AnnotationKind,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub x1: Option<f64>,
    #[serde(default)]
    pub y1: Option<f64>,
    #[serde(default)]
    pub x2: Option<f64>,
    #[serde(default)]
    pub y2: Option<f64>,
    pub color: Color,
    pub line_style: LineStyle,
    pub line_width: LineWidth,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Annotation {
    /// First anchor, present on every renderable annotation.
    pub fn first_anchor(&self) -> Option<Anchor> {
        match (self.x1, self.y1) {
            (Some(x), Some(y)) => Some(Anchor::new(x, y)),
            _ => None,
        }
    }

    /// An annotation without its first anchor is syntactically valid but is
    /// never rendered.
    pub fn has_required_anchors(&self) -> bool {
        self.x1.is_some() && self.y1.is_some()
    }

    pub fn style(&self) -> MarkupStyle {
        MarkupStyle {
            color: self.color.clone(),
            line_style: self.line_style,
            line_width: self.line_width,
        }
    }
}

/// Stroke styling shared by annotations, drafts and rendered overlays.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MarkupStyle {
    pub color: Color,
    pub line_style: LineStyle,
    pub line_width: LineWidth,
}

/// Create payload - no id, no timestamps; the server assigns both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationDraft {
    pub symbol: Symbol,
    #[serde(rename = "annotation_type")]
    pub kind: AnnotationKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
    pub color: Color,
    pub line_style: LineStyle,
    pub line_width: LineWidth,
}

impl AnnotationDraft {
    /// Build the commit payload for a finished two-point drawing.
    ///
    /// A horizontal line is defined purely by `y1`; its second anchor is
    /// dropped even though two pointer placements were captured.
    pub fn from_points(
        kind: AnnotationKind,
        symbol: Symbol,
        first: Anchor,
        second: Anchor,
        style: MarkupStyle,
    ) -> Self {
        let (x2, y2) = match kind {
            AnnotationKind::HorizontalLine => (None, None),
            _ => (Some(second.x), Some(second.y)),
        };
        Self {
            symbol,
            kind,
            title: None,
            notes: None,
            x1: Some(first.x),
            y1: Some(first.y),
            x2,
            y2,
            color: style.color,
            line_style: style.line_style,
            line_width: style.line_width,
        }
    }

    /// The never-persisted preview annotation rendered while this draft is
    /// still under construction.
    pub fn as_preview(&self) -> Annotation {
        Annotation {
            id: AnnotationId::PREVIEW,
            symbol: self.symbol.clone(),
            kind: self.kind,
            title: self.title.clone(),
            notes: self.notes.clone(),
            x1: self.x1,
            y1: self.y1,
            x2: self.x2,
            y2: self.y2,
            color: self.color.clone(),
            line_style: self.line_style,
            line_width: self.line_width,
            visible: true,
            created_at: None,
            updated_at: None,
        }
    }
}

/// Partial update - `None` fields are left unchanged by the server, so a
/// patch can set anchors but never clear them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnotationPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y1: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Color>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_style: Option<LineStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_width: Option<LineWidth>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
}

/// Domain entity - the one-per-symbol analysis note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisNote {
    pub id: i64,
    pub symbol: Symbol,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Create-or-replace payload for an analysis note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoteDraft {
    pub symbol: Symbol,
    pub title: String,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Partial note update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
