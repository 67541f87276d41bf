//! Text element.

use super::{ShapeId, deserialize_px, new_id};
use crate::render::Painter;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A single line of filled text anchored at its baseline-left point.
///
/// `width` and `height` are derived from the painter's font metrics and are
/// never set by the author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
    #[serde(default = "new_id")]
    pub(crate) id: ShapeId,
    /// The text content.
    pub text: String,
    /// Baseline-left x.
    pub x: f64,
    /// Baseline y.
    pub y: f64,
    /// Measured advance of `text`.
    pub width: f64,
    /// Approximate cap-height, measured once at creation.
    pub height: f64,
    /// Font size in pixels.
    #[serde(deserialize_with = "deserialize_px")]
    pub font_size: u32,
    pub font_family: String,
    /// Fill color.
    pub color: String,
}

/// Value-tuple identity of a text element.
///
/// Text is found again for in-place editing by position and style, not by
/// id. Two texts sharing all of these are indistinguishable to the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct TextKey {
    pub x: f64,
    pub y: f64,
    pub font_size: u32,
    pub font_family: String,
    pub color: String,
}

impl Text {
    /// Create a text element, measuring it with `painter`.
    pub fn measured(
        anchor: Point,
        text: &str,
        font_size: u32,
        font_family: &str,
        color: &str,
        painter: &dyn Painter,
    ) -> Self {
        Self {
            id: new_id(),
            text: text.to_string(),
            x: anchor.x,
            y: anchor.y,
            width: painter.measure_text_advance(text, font_size, font_family),
            height: painter.measure_text_height(text, font_size, font_family),
            font_size,
            font_family: font_family.to_string(),
            color: color.to_string(),
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn matches(&self, key: &TextKey) -> bool {
        self.x == key.x
            && self.y == key.y
            && self.font_size == key.font_size
            && self.font_family == key.font_family
            && self.color == key.color
    }

    /// Replace the content and re-measure the advance. The height is kept.
    pub fn set_content(&mut self, text: &str, painter: &dyn Painter) {
        self.text = text.to_string();
        self.width = painter.measure_text_advance(text, self.font_size, &self.font_family);
    }

    /// Box spanning from the baseline up by the cap-height.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y - self.height, self.x + self.width, self.y)
    }
}
