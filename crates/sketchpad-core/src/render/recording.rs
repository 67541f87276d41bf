//! Painter that records primitive calls, for tests and headless hosts.

use super::Painter;
use kurbo::{Point, Rect, Size, Vec2};
use serde::Serialize;

/// Average glyph advance as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.5;

/// A recorded painting primitive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum PaintOp {
    FillBackground { color: String },
    StrokeRect { rect: Rect, line_width: u32, color: String },
    StrokeEllipse { center: Point, radii: Vec2, line_width: u32, color: String },
    StrokeSegment { from: Point, to: Point, line_width: u32, color: String },
    FillText { text: String, baseline: Point, font_size: u32, font_family: String, color: String },
    ClearRegion { rect: Rect },
    EraseEllipse { center: Point, radii: Vec2 },
    ClearAll,
}

/// In-memory painter that logs every call.
///
/// Text is measured with a fixed per-character advance so results are
/// deterministic.
#[derive(Debug, Clone)]
pub struct RecordingPainter {
    size: Size,
    ops: Vec<PaintOp>,
}

impl RecordingPainter {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[PaintOp] {
        &self.ops
    }

    /// Drain the recorded operations.
    pub fn take_ops(&mut self) -> Vec<PaintOp> {
        std::mem::take(&mut self.ops)
    }

    /// Operations recorded since the last `ClearAll`.
    pub fn visible_ops(&self) -> &[PaintOp] {
        let start = self
            .ops
            .iter()
            .rposition(|op| matches!(op, PaintOp::ClearAll))
            .map_or(0, |i| i + 1);
        &self.ops[start..]
    }
}

impl Painter for RecordingPainter {
    fn size(&self) -> Size {
        self.size
    }

    fn fill_background(&mut self, color: &str) {
        self.ops.push(PaintOp::FillBackground {
            color: color.to_string(),
        });
    }

    fn stroke_rect(&mut self, rect: Rect, line_width: u32, color: &str) {
        self.ops.push(PaintOp::StrokeRect {
            rect,
            line_width,
            color: color.to_string(),
        });
    }

    fn stroke_ellipse(&mut self, center: Point, radii: Vec2, line_width: u32, color: &str) {
        self.ops.push(PaintOp::StrokeEllipse {
            center,
            radii,
            line_width,
            color: color.to_string(),
        });
    }

    fn stroke_segment(&mut self, from: Point, to: Point, line_width: u32, color: &str) {
        self.ops.push(PaintOp::StrokeSegment {
            from,
            to,
            line_width,
            color: color.to_string(),
        });
    }

    fn fill_text(
        &mut self,
        text: &str,
        baseline: Point,
        font_size: u32,
        font_family: &str,
        color: &str,
    ) {
        self.ops.push(PaintOp::FillText {
            text: text.to_string(),
            baseline,
            font_size,
            font_family: font_family.to_string(),
            color: color.to_string(),
        });
    }

    fn measure_text_advance(&self, text: &str, font_size: u32, _font_family: &str) -> f64 {
        text.chars().count() as f64 * font_size as f64 * CHAR_WIDTH_FACTOR
    }

    fn clear_region(&mut self, rect: Rect) {
        self.ops.push(PaintOp::ClearRegion { rect });
    }

    fn erase_ellipse(&mut self, center: Point, radii: Vec2) {
        self.ops.push(PaintOp::EraseEllipse { center, radii });
    }

    fn clear_all(&mut self) {
        self.ops.push(PaintOp::ClearAll);
    }

    fn export_image(&self) -> Vec<u8> {
        serde_json::to_vec(self.visible_ops()).unwrap_or_default()
    }
}
