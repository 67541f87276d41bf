//! Replayable editor event scripts.
//!
//! A script is a JSON array of steps, for example:
//!
//! ```json
//! [
//!   {"action": "tool", "tool": "Rectangle"},
//!   {"action": "down", "x": 10, "y": 10},
//!   {"action": "move", "x": 60, "y": 40},
//!   {"action": "up", "x": 60, "y": 40}
//! ]
//! ```

use kurbo::Point;
use serde::{Deserialize, Serialize};
use sketchpad_core::{
    BlobStore, Editor, Instant, KeyEvent, Painter, PointerEvent, StorageResult, ToolKind,
};
use std::time::Duration;

/// One scripted input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64 },
    Up { x: f64, y: f64 },
    Leave { x: f64, y: f64 },
    /// Press a key by its DOM `KeyboardEvent.key` name.
    Key { key: String },
    /// Type each character of `text` as a key press.
    Type { text: String },
    Tool { tool: ToolKind },
    Undo,
    ClearAll,
    Confirm,
    Cancel,
    Background { color: String },
    Color { color: String },
    LineWidth { width: f64 },
    FontSize { size: f64 },
    /// Advance the script clock, firing due caret blinks.
    Wait { ms: u64 },
}

/// Parse a script from JSON.
pub fn parse(json: &str) -> serde_json::Result<Vec<Step>> {
    serde_json::from_str(json)
}

/// Drives an editor from a script with a virtual clock.
pub struct Replayer {
    clock: Instant,
}

impl Default for Replayer {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Replayer {
    pub fn new(start: Instant) -> Self {
        Self { clock: start }
    }

    pub fn clock(&self) -> Instant {
        self.clock
    }

    /// Apply every step in order, stopping at the first storage error.
    pub fn run<S: BlobStore>(
        &mut self,
        editor: &mut Editor<S>,
        painter: &mut dyn Painter,
        steps: &[Step],
    ) -> StorageResult<()> {
        for (i, step) in steps.iter().enumerate() {
            log::trace!("Step {}: {:?}", i, step);
            self.apply(editor, painter, step)?;
        }
        Ok(())
    }

    fn pointer<S: BlobStore>(
        &self,
        editor: &mut Editor<S>,
        painter: &mut dyn Painter,
        event: PointerEvent,
    ) -> StorageResult<()> {
        editor.handle_pointer(event, self.clock, painter)
    }

    pub fn apply<S: BlobStore>(
        &mut self,
        editor: &mut Editor<S>,
        painter: &mut dyn Painter,
        step: &Step,
    ) -> StorageResult<()> {
        match step {
            &Step::Down { x, y } => {
                self.pointer(editor, painter, PointerEvent::Down { position: Point::new(x, y) })
            }
            &Step::Move { x, y } => {
                self.pointer(editor, painter, PointerEvent::Move { position: Point::new(x, y) })
            }
            &Step::Up { x, y } => {
                self.pointer(editor, painter, PointerEvent::Up { position: Point::new(x, y) })
            }
            &Step::Leave { x, y } => {
                self.pointer(editor, painter, PointerEvent::Leave { position: Point::new(x, y) })
            }
            Step::Key { key } => {
                editor.handle_key(&KeyEvent::Pressed(key.clone()), self.clock, painter)
            }
            Step::Type { text } => {
                for c in text.chars() {
                    editor.handle_key(&KeyEvent::Pressed(c.to_string()), self.clock, painter)?;
                }
                Ok(())
            }
            Step::Tool { tool } => {
                editor.set_tool(*tool, painter);
                Ok(())
            }
            Step::Undo => editor.undo(painter).map(|_| ()),
            Step::ClearAll => {
                editor.request_clear_all();
                Ok(())
            }
            Step::Confirm => editor.confirm_delete(painter),
            Step::Cancel => {
                editor.cancel_delete();
                Ok(())
            }
            Step::Background { color } => editor.set_background(color, painter),
            Step::Color { color } => {
                editor.style_mut().set_color(color);
                Ok(())
            }
            Step::LineWidth { width } => {
                editor.style_mut().set_line_width(*width);
                Ok(())
            }
            Step::FontSize { size } => {
                editor.style_mut().set_font_size(*size);
                Ok(())
            }
            Step::Wait { ms } => {
                self.clock += Duration::from_millis(*ms);
                editor.tick(self.clock, painter);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sketchpad_core::{EditorConfig, Element, MemoryStorage, PaintOp, RecordingPainter};

    fn run(steps: &[Step]) -> (Editor<MemoryStorage>, RecordingPainter) {
        let mut editor = Editor::open(MemoryStorage::new(), &EditorConfig::default()).unwrap();
        let mut painter = RecordingPainter::new(1180.0, 600.0);
        Replayer::default().run(&mut editor, &mut painter, steps).unwrap();
        (editor, painter)
    }

    #[test]
    fn test_parse_script() {
        let steps = parse(
            r##"[
                {"action": "tool", "tool": "Pen"},
                {"action": "color", "color": "#ff0000"},
                {"action": "down", "x": 1, "y": 2},
                {"action": "wait", "ms": 400},
                {"action": "clear_all"}
            ]"##,
        )
        .unwrap();
        assert_eq!(steps[0], Step::Tool { tool: ToolKind::Pen });
        assert_eq!(steps[2], Step::Down { x: 1.0, y: 2.0 });
        assert_eq!(steps[4], Step::ClearAll);
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(parse(r#"[{"action": "explode"}]"#).is_err());
    }

    #[test]
    fn test_style_applies_to_new_elements() {
        let (editor, _) = run(&[
            Step::Tool { tool: ToolKind::Rectangle },
            Step::Color { color: "#00ff00".into() },
            Step::LineWidth { width: 4.9 },
            Step::Down { x: 10.0, y: 10.0 },
            Step::Move { x: 30.0, y: 30.0 },
            Step::Up { x: 30.0, y: 30.0 },
        ]);
        let Element::Rect(rect) = &editor.document().elements[0] else {
            panic!("expected rect");
        };
        assert_eq!(rect.color, "#00ff00");
        assert_eq!(rect.line_width, 4);
    }

    #[test]
    fn test_type_and_wait_blinks_caret() {
        let (editor, painter) = run(&[
            Step::Tool { tool: ToolKind::Text },
            Step::Down { x: 20.0, y: 20.0 },
            Step::Type { text: "Hi".into() },
            Step::Wait { ms: 400 },
        ]);
        assert_eq!(editor.document().len(), 1);
        assert!(matches!(
            painter.ops().last(),
            Some(PaintOp::FillText { text, .. }) if text == "I"
        ));
    }

    #[test]
    fn test_clear_all_needs_confirm() {
        let (editor, _) = run(&[
            Step::Tool { tool: ToolKind::Pen },
            Step::Down { x: 0.0, y: 0.0 },
            Step::Move { x: 5.0, y: 5.0 },
            Step::Up { x: 5.0, y: 5.0 },
            Step::ClearAll,
            Step::Cancel,
        ]);
        assert_eq!(editor.document().len(), 1);

        let (editor, _) = run(&[
            Step::Tool { tool: ToolKind::Pen },
            Step::Down { x: 0.0, y: 0.0 },
            Step::Move { x: 5.0, y: 5.0 },
            Step::Up { x: 5.0, y: 5.0 },
            Step::ClearAll,
            Step::Confirm,
        ]);
        assert!(editor.document().is_empty());
    }
}
