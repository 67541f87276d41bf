//! Element definitions for the drawing surface.

mod ellipse;
mod rectangle;
mod stroke;
mod text;

pub use ellipse::Ellipse;
pub use rectangle::Rectangle;
pub use stroke::PenStroke;
pub use text::{Text, TextKey};

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Deserializer, Serialize, de};
use uuid::Uuid;

/// Unique identifier for elements.
///
/// Assigned at creation and persisted, but never used for text lookup
/// (see [`TextKey`]).
pub type ShapeId = Uuid;

pub(crate) fn new_id() -> ShapeId {
    Uuid::new_v4()
}

/// Coerce a user-supplied stroke width or font size to a whole pixel count.
///
/// Fractions are truncated; negative and NaN inputs become 0.
pub fn coerce_px(value: f64) -> u32 {
    // `as` saturates: negatives and NaN map to 0, huge values to u32::MAX.
    value.trunc() as u32
}

/// Deserialize a pixel count written as any number or a numeric string,
/// coerced with [`coerce_px`].
pub(crate) fn deserialize_px<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Px {
        Number(f64),
        Str(String),
    }

    let value = match Px::deserialize(deserializer)? {
        Px::Number(n) => n,
        Px::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| de::Error::custom(format!("invalid pixel value {s:?}")))?,
    };
    Ok(coerce_px(value))
}

/// Inclusive point-in-rect test (kurbo's `contains` is half-open).
pub(crate) fn contains_inclusive(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Discriminant of an [`Element`], used for logging and dispatch tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Rect,
    Ellipse,
    PenStroke,
    Text,
}

impl ElementKind {
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Rect => "rect",
            ElementKind::Ellipse => "ellipse",
            ElementKind::PenStroke => "pen",
            ElementKind::Text => "text",
        }
    }
}

/// A drawable element. List order is paint order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Rect(Rectangle),
    Ellipse(Ellipse),
    #[serde(rename = "pen")]
    PenStroke(PenStroke),
    Text(Text),
}

impl Element {
    pub fn id(&self) -> ShapeId {
        match self {
            Element::Rect(s) => s.id,
            Element::Ellipse(s) => s.id,
            Element::PenStroke(s) => s.id,
            Element::Text(s) => s.id,
        }
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Rect(_) => ElementKind::Rect,
            Element::Ellipse(_) => ElementKind::Ellipse,
            Element::PenStroke(_) => ElementKind::PenStroke,
            Element::Text(_) => ElementKind::Text,
        }
    }

    /// Reference position of the element.
    ///
    /// Drag corner for rectangles, center for ellipses, baseline-left for text
    /// and the segment start for pen strokes.
    pub fn anchor(&self) -> Point {
        match self {
            Element::Rect(s) => s.anchor(),
            Element::Ellipse(s) => s.center(),
            Element::PenStroke(s) => s.start(),
            Element::Text(s) => s.anchor(),
        }
    }

    /// Move the element so its anchor lands on `anchor`.
    pub fn set_anchor(&mut self, anchor: Point) {
        match self {
            Element::Rect(s) => {
                s.x = anchor.x;
                s.y = anchor.y;
            }
            Element::Ellipse(s) => {
                s.x = anchor.x;
                s.y = anchor.y;
            }
            Element::PenStroke(s) => s.translate(anchor - s.start()),
            Element::Text(s) => {
                s.x = anchor.x;
                s.y = anchor.y;
            }
        }
    }

    /// Signed size as stored (`0,0` for pen strokes).
    pub fn size(&self) -> Vec2 {
        match self {
            Element::Rect(s) => Vec2::new(s.width, s.height),
            Element::Ellipse(s) => Vec2::new(s.width, s.height),
            Element::PenStroke(_) => Vec2::ZERO,
            Element::Text(s) => Vec2::new(s.width, s.height),
        }
    }

    /// Normalized bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Element::Rect(s) => s.bounds(),
            Element::Ellipse(s) => s.bounds(),
            Element::PenStroke(s) => s.bounds(),
            Element::Text(s) => s.bounds(),
        }
    }

    /// The point that must stay on the canvas when the element is dragged
    /// with its anchor at `anchor`.
    ///
    /// This is the middle of the stored extent: `anchor + size / 2` for
    /// rectangles and text, the anchor itself for ellipses (already centered).
    pub fn reference_point_at(&self, anchor: Point) -> Point {
        match self {
            Element::Ellipse(_) | Element::PenStroke(_) => anchor,
            Element::Rect(_) | Element::Text(_) => anchor + self.size() / 2.0,
        }
    }

    /// Whether hit-testing may return this element.
    ///
    /// Freehand ink is write-once and never selectable.
    pub fn is_selectable(&self) -> bool {
        !matches!(self, Element::PenStroke(_))
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Element::Text(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_px_truncates() {
        assert_eq!(coerce_px(2.9), 2);
        assert_eq!(coerce_px(0.4), 0);
        assert_eq!(coerce_px(-3.0), 0);
        assert_eq!(coerce_px(f64::NAN), 0);
    }

    #[test]
    fn test_reference_point_rect_is_box_middle() {
        let rect = Rectangle::new(Point::new(10.0, 10.0), 40.0, -20.0, "#000", 2);
        let rect = Element::Rect(rect);
        let p = rect.reference_point_at(Point::new(100.0, 100.0));
        assert!((p.x - 120.0).abs() < f64::EPSILON);
        assert!((p.y - 90.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reference_point_ellipse_is_center() {
        let ellipse = Ellipse::new(Point::new(10.0, 10.0), 40.0, 20.0, "#000", 2);
        let ellipse = Element::Ellipse(ellipse);
        let p = ellipse.reference_point_at(Point::new(7.0, 8.0));
        assert_eq!(p, Point::new(7.0, 8.0));
    }

    #[test]
    fn test_pen_not_selectable() {
        let pen = Element::PenStroke(PenStroke::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            "#000",
            1,
        ));
        assert!(!pen.is_selectable());
        assert_eq!(pen.kind().name(), "pen");
    }

    #[test]
    fn test_set_anchor_moves_pen_segment() {
        let mut pen = Element::PenStroke(PenStroke::new(
            Point::new(1.0, 1.0),
            Point::new(4.0, 5.0),
            "#000",
            1,
        ));
        pen.set_anchor(Point::new(11.0, 21.0));
        let Element::PenStroke(s) = &pen else { unreachable!() };
        assert_eq!(s.end(), Point::new(14.0, 25.0));
    }

    #[test]
    fn test_serialized_tag_names() {
        let rect = Rectangle::new(Point::new(1.0, 2.0), 3.0, 4.0, "#ff0000", 2);
        let rect = Element::Rect(rect);
        let json = serde_json::to_value(&rect).unwrap();
        assert_eq!(json["type"], "rect");
        assert_eq!(json["lineWidth"], 2);

        let pen = PenStroke::new(Point::ZERO, Point::new(1.0, 1.0), "#000", 1);
        let pen = Element::PenStroke(pen);
        let json = serde_json::to_value(&pen).unwrap();
        assert_eq!(json["type"], "pen");
        assert_eq!(json["prevX"], 0.0);
    }

    #[test]
    fn test_pixel_fields_accept_fractions_and_strings() {
        let json = r##"{"type":"ellipse","x":5,"y":5,"width":10,"height":8,
            "color":"#000","lineWidth":"3.7"}"##;
        let Element::Ellipse(ellipse) = serde_json::from_str(json).unwrap() else {
            panic!("expected ellipse");
        };
        assert_eq!(ellipse.line_width, 3);

        let json = r##"{"type":"text","text":"a","x":0,"y":0,"width":1,"height":1,
            "fontSize":24.9,"fontFamily":"Arial","color":"#000"}"##;
        let text: Element = serde_json::from_str(json).unwrap();
        assert_eq!(text.as_text().map(|t| t.font_size), Some(24));

        let json = r##"{"type":"pen","prevX":0,"prevY":0,"currX":1,"currY":1,
            "color":"#000","lineWidth":"wide"}"##;
        assert!(serde_json::from_str::<Element>(json).is_err());
    }
}
