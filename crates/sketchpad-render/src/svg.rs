//! SVG display-list painter.
//!
//! Each primitive becomes one retained node with its painted bounds. Erasing
//! removes whole nodes whose bounds fall inside the erased area; there is no
//! partial erasure of a node.

use crate::{RenderResult, RendererError};
use kurbo::{Point, Rect, Size, Vec2};
use sketchpad_core::render::{self, Painter};
use sketchpad_core::CanvasDocument;
use std::io::Write;

/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.55;

#[derive(Debug, Clone)]
struct Node {
    bounds: Rect,
    markup: String,
    /// Background fills survive region erases.
    background: bool,
}

/// Painter that records primitives as SVG elements.
#[derive(Debug, Clone)]
pub struct SvgPainter {
    size: Size,
    nodes: Vec<Node>,
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x0 >= outer.x0 && inner.x1 <= outer.x1 && inner.y0 >= outer.y0 && inner.y1 <= outer.y1
}

fn inside_ellipse(point: Point, center: Point, radii: Vec2) -> bool {
    let dx = (point.x - center.x) / radii.x;
    let dy = (point.y - center.y) / radii.y;
    dx * dx + dy * dy <= 1.0
}

impl SvgPainter {
    /// Create an empty surface. Both dimensions must be positive.
    pub fn new(width: f64, height: f64) -> RenderResult<Self> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(RendererError::InitFailed(format!(
                "invalid surface size {}x{}",
                width, height
            )));
        }
        Ok(Self {
            size: Size::new(width, height),
            nodes: Vec::new(),
        })
    }

    /// Number of retained nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, bounds: Rect, markup: String) {
        self.nodes.push(Node {
            bounds,
            markup,
            background: false,
        });
    }

    /// Serialize the surface as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let (w, h) = (self.size.width, self.size.height);
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" \
             width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n"
        );
        for node in &self.nodes {
            svg.push_str("  ");
            svg.push_str(&node.markup);
            svg.push('\n');
        }
        svg.push_str("</svg>\n");
        svg
    }

    /// Write the SVG document to `writer`.
    pub fn write_svg(&self, writer: &mut impl Write) -> RenderResult<()> {
        writer
            .write_all(self.to_svg().as_bytes())
            .map_err(|e| RendererError::RenderFailed(e.to_string()))
    }
}

impl Painter for SvgPainter {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_background(&mut self, color: &str) {
        // An opaque full-surface fill hides everything painted before it.
        self.nodes.clear();
        self.nodes.push(Node {
            bounds: self.size.to_rect(),
            markup: format!(
                "<rect x=\"0\" y=\"0\" width=\"{}\" height=\"{}\" fill=\"{}\"/>",
                self.size.width,
                self.size.height,
                escape(color)
            ),
            background: true,
        });
    }

    fn stroke_rect(&mut self, rect: Rect, line_width: u32, color: &str) {
        let rect = rect.abs();
        let half = f64::from(line_width) / 2.0;
        self.push(
            rect.inflate(half, half),
            format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" \
                 fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                rect.x0,
                rect.y0,
                rect.width(),
                rect.height(),
                escape(color),
                line_width
            ),
        );
    }

    fn stroke_ellipse(&mut self, center: Point, radii: Vec2, line_width: u32, color: &str) {
        let extent = Size::new(
            2.0 * radii.x + f64::from(line_width),
            2.0 * radii.y + f64::from(line_width),
        );
        self.push(
            Rect::from_center_size(center, extent),
            format!(
                "<ellipse cx=\"{}\" cy=\"{}\" rx=\"{}\" ry=\"{}\" \
                 fill=\"none\" stroke=\"{}\" stroke-width=\"{}\"/>",
                center.x,
                center.y,
                radii.x,
                radii.y,
                escape(color),
                line_width
            ),
        );
    }

    fn stroke_segment(&mut self, from: Point, to: Point, line_width: u32, color: &str) {
        let half = f64::from(line_width) / 2.0;
        self.push(
            Rect::from_points(from, to).inflate(half, half),
            format!(
                "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" \
                 stroke=\"{}\" stroke-width=\"{}\" stroke-linecap=\"round\"/>",
                from.x,
                from.y,
                to.x,
                to.y,
                escape(color),
                line_width
            ),
        );
    }

    fn fill_text(
        &mut self,
        text: &str,
        baseline: Point,
        font_size: u32,
        font_family: &str,
        color: &str,
    ) {
        let width = self.measure_text_advance(text, font_size, font_family);
        let height = self.measure_text_height(text, font_size, font_family);
        self.push(
            Rect::new(baseline.x, baseline.y - height, baseline.x + width, baseline.y),
            format!(
                "<text x=\"{}\" y=\"{}\" font-size=\"{}\" font-family=\"{}\" fill=\"{}\">{}</text>",
                baseline.x,
                baseline.y,
                font_size,
                escape(font_family),
                escape(color),
                escape(text)
            ),
        );
    }

    fn measure_text_advance(&self, text: &str, font_size: u32, _font_family: &str) -> f64 {
        text.chars().count() as f64 * f64::from(font_size) * CHAR_WIDTH_FACTOR
    }

    fn clear_region(&mut self, rect: Rect) {
        let rect = rect.abs();
        let before = self.nodes.len();
        self.nodes
            .retain(|node| node.background || !contains_rect(rect, node.bounds));
        log::trace!("clear_region removed {} nodes", before - self.nodes.len());
    }

    fn erase_ellipse(&mut self, center: Point, radii: Vec2) {
        if radii.x <= 0.0 || radii.y <= 0.0 {
            return;
        }
        self.nodes.retain(|node| {
            let b = node.bounds;
            let corners = [
                Point::new(b.x0, b.y0),
                Point::new(b.x1, b.y0),
                Point::new(b.x0, b.y1),
                Point::new(b.x1, b.y1),
            ];
            node.background || !corners.iter().all(|&p| inside_ellipse(p, center, radii))
        });
    }

    fn clear_all(&mut self) {
        self.nodes.clear();
    }

    fn export_image(&self) -> Vec<u8> {
        self.to_svg().into_bytes()
    }
}

/// Render a whole document to an SVG string.
pub fn export_svg(document: &CanvasDocument, size: Size) -> RenderResult<String> {
    let mut painter = SvgPainter::new(size.width, size.height)?;
    render::full_redraw(&mut painter, document);
    log::debug!(
        "Exported {} elements as {} SVG nodes",
        document.len(),
        painter.node_count()
    );
    Ok(painter.to_svg())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpad_core::shapes::{Element, Ellipse, PenStroke, Rectangle, Text};

    fn painter() -> SvgPainter {
        SvgPainter::new(200.0, 100.0).unwrap()
    }

    #[test]
    fn test_rejects_empty_surface() {
        assert!(matches!(
            SvgPainter::new(0.0, 100.0),
            Err(RendererError::InitFailed(_))
        ));
        assert!(SvgPainter::new(f64::NAN, 100.0).is_err());
    }

    #[test]
    fn test_export_document() {
        let mut doc = CanvasDocument::with_background("#eeeeee");
        doc.push(Element::Rect(Rectangle::new(Point::new(10.0, 10.0), 50.0, 30.0, "#000000", 2)));
        doc.push(Element::PenStroke(PenStroke::new(
            Point::new(0.0, 0.0),
            Point::new(5.0, 5.0),
            "#ff0000",
            3,
        )));
        let svg = export_svg(&doc, Size::new(200.0, 100.0)).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("fill=\"#eeeeee\""));
        assert!(svg.contains("<rect x=\"10\" y=\"10\" width=\"50\" height=\"30\""));
        assert!(svg.contains("<line x1=\"0\" y1=\"0\" x2=\"5\" y2=\"5\""));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut p = painter();
        p.fill_text("a<b & c", Point::new(5.0, 50.0), 20, "Arial", "#000000");
        let svg = p.to_svg();
        assert!(svg.contains(">a&lt;b &amp; c</text>"));
    }

    #[test]
    fn test_measure_uses_char_count() {
        let p = painter();
        assert!((p.measure_text_advance("Hi", 30, "Arial") - 33.0).abs() < 1e-9);
        assert!((p.measure_text_advance("é", 20, "Arial") - 11.0).abs() < 1e-9);
    }

    #[test]
    fn test_rect_erase_keeps_background() {
        let mut p = painter();
        p.fill_background("#ffffff");
        let rect = Rectangle::new(Point::new(10.0, 10.0), 50.0, 30.0, "#000000", 2);
        render::draw_element(&mut p, &Element::Rect(rect.clone()));
        assert_eq!(p.node_count(), 2);
        render::erase_rect_region(&mut p, &rect);
        assert_eq!(p.node_count(), 1);
    }

    #[test]
    fn test_ellipse_erase_removes_whole_ellipse() {
        let mut p = painter();
        let ellipse = Ellipse::new(Point::new(100.0, 50.0), 30.0, 20.0, "#000000", 2);
        render::draw_element(&mut p, &Element::Ellipse(ellipse.clone()));
        // A far-away node is untouched.
        p.stroke_segment(Point::new(0.0, 0.0), Point::new(5.0, 0.0), 1, "#000000");
        render::erase_ellipse_region(&mut p, &ellipse);
        assert_eq!(p.node_count(), 1);
        assert!(p.to_svg().contains("<line"));
    }

    #[test]
    fn test_partial_overlap_survives_erase() {
        let mut p = painter();
        p.stroke_rect(Rect::new(0.0, 0.0, 100.0, 100.0), 2, "#000000");
        p.clear_region(Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(p.node_count(), 1);
    }

    #[test]
    fn test_text_node_bounds_follow_measurement() {
        let mut p = painter();
        let text = Text::measured(Point::new(10.0, 40.0), "ab", 20, "Arial", "#000000", &p);
        assert!((text.width - 22.0).abs() < 1e-9);
        render::draw_element(&mut p, &Element::Text(text.clone()));
        p.clear_region(text.bounds());
        assert_eq!(p.node_count(), 0);
    }

    #[test]
    fn test_write_svg() {
        let mut p = painter();
        p.fill_background("#000000");
        let mut out = Vec::new();
        p.write_svg(&mut out).unwrap();
        assert_eq!(out, p.export_image());
    }
}
