use derive_more::{Deref, DerefMut, Display, From, Into};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display as StrumDisplay, EnumIter, EnumString};

/// Value Object - trading symbol, normalized to uppercase
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deref, DerefMut, Display, Serialize, Deserialize)]
#[display(fmt = "Symbol({})", _0)]
pub struct Symbol(String);

impl Symbol {
    pub fn new(symbol: String) -> Result<Self, String> {
        if symbol.is_empty() {
            return Err("Symbol cannot be empty".to_string());
        }
        Ok(Self(symbol.to_uppercase()))
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_uppercase())
    }
}

/// Value Object - server-assigned annotation identifier.
///
/// Never reused and immutable once assigned. `PREVIEW` is a placeholder
/// carried by synthetic preview annotations only; overlays are keyed by
/// `OverlayKey`, so this value can never collide with a committed handle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, From, Into, Display, Serialize, Deserialize,
)]
pub struct AnnotationId(i64);

impl AnnotationId {
    pub const PREVIEW: AnnotationId = AnnotationId(-1);

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Value Object - one (time, price) coordinate pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Anchor {
    /// Time coordinate, milliseconds since the unix epoch.
    pub x: f64,
    /// Price coordinate.
    pub y: f64,
}

impl Anchor {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Value Object - annotation kind, wire form is SCREAMING_SNAKE strings
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize,
)]
pub enum AnnotationKind {
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

/// Value Object - line style
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize, Default,
)]
pub enum LineStyle {
    #[default]
    #[strum(serialize = "SOLID")]
    #[serde(rename = "SOLID")]
    Solid,

    #[strum(serialize = "DASHED")]
    #[serde(rename = "DASHED")]
    Dashed,

    #[strum(serialize = "DOTTED")]
    #[serde(rename = "DOTTED")]
    Dotted,
}

/// Value Object - line width.
///
/// The backing store keeps widths as string enums ("1".."4"), so the wire
/// form stays a string.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter, EnumString, AsRefStr, Serialize, Deserialize, Default,
)]
pub enum LineWidth {
    #[strum(serialize = "1")]
    #[serde(rename = "1")]
    Thin,

    #[default]
    #[strum(serialize = "2")]
    #[serde(rename = "2")]
    Normal,

    #[strum(serialize = "3")]
    #[serde(rename = "3")]
    Thick,

    #[strum(serialize = "4")]
    #[serde(rename = "4")]
    VeryThick,
}

impl LineWidth {
    pub fn pixels(&self) -> f64 {
        match self {
            Self::Thin => 1.0,
            Self::Normal => 2.0,
            Self::Thick => 3.0,
            Self::VeryThick => 4.0,
        }
    }
}

/// Value Object - hex color string
#[derive(Debug, Clone, PartialEq, Eq, Deref, Display, Serialize, Deserialize)]
#[display(fmt = "{}", _0)]
pub struct Color(String);

impl Color {
    pub const RED: &'static str = "#FF0000";
    pub const GREEN: &'static str = "#00FF00";
    pub const BLUE: &'static str = "#0000FF";
    pub const YELLOW: &'static str = "#FFFF00";
    pub const ORANGE: &'static str = "#FFA500";

    pub fn new(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self(Self::BLUE.to_string())
    }
}

impl From<&str> for Color {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}
