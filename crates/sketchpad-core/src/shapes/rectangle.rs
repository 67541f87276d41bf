//! Rectangle element.

use super::{ShapeId, deserialize_px, new_id};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A stroked rectangle anchored at the corner where the drag began.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    #[serde(default = "new_id")]
    pub(crate) id: ShapeId,
    /// Anchor corner x.
    pub x: f64,
    /// Anchor corner y.
    pub y: f64,
    /// Signed width; negative extends left of the anchor.
    pub width: f64,
    /// Signed height; negative extends above the anchor.
    pub height: f64,
    /// Stroke color.
    pub color: String,
    /// Stroke width in pixels.
    #[serde(deserialize_with = "deserialize_px")]
    pub line_width: u32,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(anchor: Point, width: f64, height: f64, color: &str, line_width: u32) -> Self {
        Self {
            id: new_id(),
            x: anchor.x,
            y: anchor.y,
            width,
            height,
            color: color.to_string(),
            line_width,
        }
    }

    pub fn anchor(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The corner diagonally opposite the anchor.
    pub fn opposite_corner(&self) -> Point {
        Point::new(self.x + self.width, self.y + self.height)
    }

    /// Normalized bounding box (either sign of width/height).
    pub fn bounds(&self) -> Rect {
        Rect::from_points(self.anchor(), self.opposite_corner())
    }

    /// The region cleared when erasing this rectangle: the outline box padded
    /// by the stroke width on every side, grown in the direction of each signed
    /// extent.
    pub fn erase_region(&self) -> Rect {
        let lw = self.line_width as f64;
        let (x0, w) = if self.width < 0.0 {
            (self.x + lw, self.width - lw * 2.0)
        } else {
            (self.x - lw, self.width + lw * 2.0)
        };
        let (y0, h) = if self.height < 0.0 {
            (self.y + lw, self.height - lw * 2.0)
        } else {
            (self.y - lw, self.height + lw * 2.0)
        };
        Rect::new(x0, y0, x0 + w, y0 + h).abs()
    }
}
