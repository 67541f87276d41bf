//! Freehand pen segment.

use super::{ShapeId, deserialize_px, new_id};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// One straight segment of freehand ink.
///
/// A freehand gesture is stored as a run of these, one per pointer move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenStroke {
    #[serde(default = "new_id")]
    pub(crate) id: ShapeId,
    pub prev_x: f64,
    pub prev_y: f64,
    pub curr_x: f64,
    pub curr_y: f64,
    /// Stroke color.
    pub color: String,
    /// Stroke width in pixels.
    #[serde(deserialize_with = "deserialize_px")]
    pub line_width: u32,
}

impl PenStroke {
    pub fn new(from: Point, to: Point, color: &str, line_width: u32) -> Self {
        Self {
            id: new_id(),
            prev_x: from.x,
            prev_y: from.y,
            curr_x: to.x,
            curr_y: to.y,
            color: color.to_string(),
            line_width,
        }
    }

    pub fn start(&self) -> Point {
        Point::new(self.prev_x, self.prev_y)
    }

    pub fn end(&self) -> Point {
        Point::new(self.curr_x, self.curr_y)
    }

    pub fn bounds(&self) -> Rect {
        let half = self.line_width as f64 / 2.0;
        Rect::from_points(self.start(), self.end()).inflate(half, half)
    }

    pub(crate) fn translate(&mut self, delta: Vec2) {
        self.prev_x += delta.x;
        self.prev_y += delta.y;
        self.curr_x += delta.x;
        self.curr_y += delta.y;
    }
}
