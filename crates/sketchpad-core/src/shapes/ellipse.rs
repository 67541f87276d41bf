//! Ellipse element.

use super::{ShapeId, deserialize_px, new_id};
use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A stroked, axis-aligned ellipse anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ellipse {
    #[serde(default = "new_id")]
    pub(crate) id: ShapeId,
    /// Center x.
    pub x: f64,
    /// Center y.
    pub y: f64,
    /// Horizontal diameter.
    pub width: f64,
    /// Vertical diameter.
    pub height: f64,
    /// Stroke color.
    pub color: String,
    /// Stroke width in pixels.
    #[serde(deserialize_with = "deserialize_px")]
    pub line_width: u32,
}

impl Ellipse {
    /// Create a new ellipse centered on `center`.
    pub fn new(center: Point, width: f64, height: f64, color: &str, line_width: u32) -> Self {
        Self {
            id: new_id(),
            x: center.x,
            y: center.y,
            width,
            height,
            color: color.to_string(),
            line_width,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Drawn radii (half the stored diameters).
    pub fn radii(&self) -> Vec2 {
        Vec2::new(self.width.abs() / 2.0, self.height.abs() / 2.0)
    }

    /// Axis-aligned bounding box.
    pub fn bounds(&self) -> Rect {
        let r = self.radii();
        Rect::new(self.x - r.x, self.y - r.y, self.x + r.x, self.y + r.y)
    }

    /// Whether a drag producing `width × height` is accepted for an ellipse
    /// drawn with `line_width`.
    ///
    /// Negative extents and extents not larger than the stroke are rejected.
    pub fn accepts_extent(width: f64, height: f64, line_width: u32) -> bool {
        let lw = line_width as f64;
        width >= 0.0 && height >= 0.0 && width > lw && height > lw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipse_creation() {
        let ellipse = Ellipse::new(Point::new(50.0, 50.0), 60.0, 40.0, "#000000", 2);
        assert!((ellipse.x - 50.0).abs() < f64::EPSILON);
        let r = ellipse.radii();
        assert!((r.x - 30.0).abs() < f64::EPSILON);
        assert!((r.y - 20.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds() {
        let ellipse = Ellipse::new(Point::new(50.0, 50.0), 60.0, 40.0, "#000000", 2);
        let bounds = ellipse.bounds();
        assert!((bounds.x0 - 20.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 80.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_accepts_extent() {
        assert!(Ellipse::accepts_extent(10.0, 10.0, 2));
        assert!(!Ellipse::accepts_extent(2.0, 10.0, 2));
        assert!(!Ellipse::accepts_extent(10.0, 1.0, 2));
        assert!(!Ellipse::accepts_extent(-10.0, 10.0, 2));
    }
}
