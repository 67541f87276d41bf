//! Painting backend abstraction and the element-to-primitive adapter.
//!
//! The backend is an immediate-mode 2D surface. Nothing here keeps state:
//! every function maps an element (or the whole document) onto [`Painter`]
//! calls.

mod recording;

pub use recording::{PaintOp, RecordingPainter};

use crate::canvas::CanvasDocument;
use crate::shapes::{Element, Ellipse, Rectangle};
use kurbo::{Point, Rect, Size, Vec2};

/// Sample glyph whose advance approximates the cap-height of a font.
pub const CAP_HEIGHT_SAMPLE: &str = "M";

/// Trait for painting backends.
///
/// Implementations can target an HTML canvas, a raster buffer, or a display
/// list such as SVG.
pub trait Painter {
    /// Surface size in pixels.
    fn size(&self) -> Size;

    /// Fill the whole surface with `color`.
    fn fill_background(&mut self, color: &str);

    /// Stroke the outline of `rect`.
    fn stroke_rect(&mut self, rect: Rect, line_width: u32, color: &str);

    /// Stroke an axis-aligned ellipse given by center and radii.
    fn stroke_ellipse(&mut self, center: Point, radii: Vec2, line_width: u32, color: &str);

    /// Stroke a single line segment with round caps.
    fn stroke_segment(&mut self, from: Point, to: Point, line_width: u32, color: &str);

    /// Fill `text` with its baseline-left corner at `baseline`.
    fn fill_text(
        &mut self,
        text: &str,
        baseline: Point,
        font_size: u32,
        font_family: &str,
        color: &str,
    );

    /// Horizontal advance of `text` in the given font.
    fn measure_text_advance(&self, text: &str, font_size: u32, font_family: &str) -> f64;

    /// Approximate height of text in the given font.
    fn measure_text_height(&self, _text: &str, font_size: u32, font_family: &str) -> f64 {
        self.measure_text_advance(CAP_HEIGHT_SAMPLE, font_size, font_family)
    }

    /// Clear a region back to transparent.
    fn clear_region(&mut self, rect: Rect);

    /// Clear an elliptical region using destination-out compositing.
    fn erase_ellipse(&mut self, center: Point, radii: Vec2);

    /// Clear the entire surface.
    fn clear_all(&mut self);

    /// Encode the current surface contents.
    fn export_image(&self) -> Vec<u8>;
}

/// Paint one element.
pub fn draw_element(painter: &mut dyn Painter, element: &Element) {
    match element {
        Element::Rect(r) => painter.stroke_rect(r.bounds(), r.line_width, &r.color),
        Element::Ellipse(e) => {
            painter.stroke_ellipse(e.center(), e.radii(), e.line_width, &e.color)
        }
        Element::PenStroke(s) => {
            painter.stroke_segment(s.start(), s.end(), s.line_width, &s.color)
        }
        Element::Text(t) => {
            painter.fill_text(&t.text, t.anchor(), t.font_size, &t.font_family, &t.color)
        }
    }
}

/// Paint the background and every element in list order, without clearing.
pub fn repaint(painter: &mut dyn Painter, document: &CanvasDocument) {
    painter.fill_background(&document.background);
    for element in &document.elements {
        draw_element(painter, element);
    }
}

/// Clear the surface and repaint the whole document.
pub fn full_redraw(painter: &mut dyn Painter, document: &CanvasDocument) {
    painter.clear_all();
    repaint(painter, document);
}

/// Clear the stroke-padded box of a rectangle.
pub fn erase_rect_region(painter: &mut dyn Painter, rect: &Rectangle) {
    painter.clear_region(rect.erase_region());
}

/// Clear an ellipse's footprint with a destination-out fill.
///
/// The radii are the stored diameters, twice the drawn radii, so the whole
/// stroke falls inside the cleared area.
pub fn erase_ellipse_region(painter: &mut dyn Painter, ellipse: &Ellipse) {
    let radii = Vec2::new(ellipse.width.abs(), ellipse.height.abs());
    painter.erase_ellipse(ellipse.center(), radii);
}

/// Erase an element's paint with its targeted primitive.
///
/// Returns `false` for pen strokes and text, which have no independent
/// footprint and need a full redraw instead.
pub fn erase_footprint(painter: &mut dyn Painter, element: &Element) -> bool {
    match element {
        Element::Rect(r) => {
            erase_rect_region(painter, r);
            true
        }
        Element::Ellipse(e) => {
            erase_ellipse_region(painter, e);
            true
        }
        Element::PenStroke(_) | Element::Text(_) => false,
    }
}
