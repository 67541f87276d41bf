//! Tool system: tool kinds, the current drawing style, and the transient
//! state each tool keeps while a gesture is in progress.

use crate::shapes::{TextKey, coerce_px};
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Pick and drag existing elements.
    #[default]
    Select,
    Rectangle,
    Ellipse,
    Pen,
    Text,
}

/// Style applied to newly created elements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolStyle {
    /// Stroke color for shapes and fill color for text.
    pub color: String,
    /// Stroke width in pixels.
    pub line_width: u32,
    /// Font size in pixels.
    pub font_size: u32,
    pub font_family: String,
}

impl Default for ToolStyle {
    fn default() -> Self {
        Self {
            color: "#000000".to_string(),
            line_width: 2,
            font_size: 30,
            font_family: "Arial".to_string(),
        }
    }
}

impl ToolStyle {
    /// Set the stroke width, truncating fractions.
    pub fn set_line_width(&mut self, width: f64) {
        self.line_width = coerce_px(width);
    }

    /// Set the font size, truncating fractions.
    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = coerce_px(size);
    }

    pub fn set_color(&mut self, color: &str) {
        self.color = color.to_string();
    }

    /// Lookup key for text anchored at `anchor` in this style.
    pub fn text_key(&self, anchor: Point) -> TextKey {
        TextKey {
            x: anchor.x,
            y: anchor.y,
            font_size: self.font_size,
            font_family: self.font_family.clone(),
            color: self.color.clone(),
        }
    }
}

/// Drag-to-size state for rectangles and ellipses.
#[derive(Debug, Clone, Default)]
pub struct ShapeDraft {
    /// Where the drag began. `Some` while armed.
    pub anchor: Option<Point>,
    /// Index of the element this drag created, after the first move.
    pub index: Option<usize>,
}

impl ShapeDraft {
    pub fn disarm(&mut self) {
        self.anchor = None;
        self.index = None;
    }
}

/// Freehand accumulation state.
#[derive(Debug, Clone, Default)]
pub struct PenDraft {
    /// End of the last segment. `Some` while drawing.
    pub previous: Option<Point>,
}

/// A text insertion point and its typed content.
#[derive(Debug, Clone)]
pub struct TextPlacement {
    pub anchor: Point,
    pub buffer: String,
}

/// Text entry state.
#[derive(Debug, Clone, Default)]
pub struct TextEntry {
    pub placement: Option<TextPlacement>,
}

/// An element held by the pointer.
#[derive(Debug, Clone, Copy)]
pub struct Grab {
    pub index: usize,
    /// Pointer position relative to the element's anchor when grabbed.
    pub offset: Vec2,
}

/// Selection state.
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    pub grab: Option<Grab>,
}

/// Transient state of the active tool.
///
/// Each variant is created fresh when its tool is selected and dropped when
/// another tool is selected.
#[derive(Debug, Clone)]
pub enum ToolState {
    Select(SelectState),
    Rectangle(ShapeDraft),
    Ellipse(ShapeDraft),
    Pen(PenDraft),
    Text(TextEntry),
}

impl Default for ToolState {
    fn default() -> Self {
        Self::enter(ToolKind::default())
    }
}

impl ToolState {
    /// Fresh state for `tool`.
    pub fn enter(tool: ToolKind) -> Self {
        match tool {
            ToolKind::Select => ToolState::Select(SelectState::default()),
            ToolKind::Rectangle => ToolState::Rectangle(ShapeDraft::default()),
            ToolKind::Ellipse => ToolState::Ellipse(ShapeDraft::default()),
            ToolKind::Pen => ToolState::Pen(PenDraft::default()),
            ToolKind::Text => ToolState::Text(TextEntry::default()),
        }
    }

    pub fn kind(&self) -> ToolKind {
        match self {
            ToolState::Select(_) => ToolKind::Select,
            ToolState::Rectangle(_) => ToolKind::Rectangle,
            ToolState::Ellipse(_) => ToolKind::Ellipse,
            ToolState::Pen(_) => ToolKind::Pen,
            ToolState::Text(_) => ToolKind::Text,
        }
    }
}
