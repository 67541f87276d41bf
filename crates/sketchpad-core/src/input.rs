//! Pointer and keyboard events consumed by the editor.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up { position: Point },
    /// The pointer left the canvas; ends a gesture like `Up`.
    Leave { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position }
            | PointerEvent::Move { position }
            | PointerEvent::Up { position }
            | PointerEvent::Leave { position } => position,
        }
    }
}

/// Keyboard event type. Keys use DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Pressed(String),
    Released(String),
}

/// Non-printable keys that text entry ignores.
pub const IGNORED_KEYS: &[&str] = &[
    "Tab", "Enter", "Shift", "Control", "Alt", "CapsLock", "Escape", "ArrowLeft", "ArrowUp",
    "ArrowRight", "ArrowDown", "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11",
    "F12", "F13", "Meta",
];

/// What a key press does to a text buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEdit {
    /// Append a character.
    Insert(char),
    /// Remove the last character.
    Backspace,
    /// No effect.
    Ignore,
}

impl TextEdit {
    /// Classify a `KeyboardEvent.key` value.
    pub fn from_key(key: &str) -> Self {
        if key == "Backspace" {
            return TextEdit::Backspace;
        }
        if IGNORED_KEYS.contains(&key) {
            return TextEdit::Ignore;
        }
        let mut chars = key.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) if !c.is_control() => TextEdit::Insert(c),
            // Other named keys ("Delete", "Home", ...) have no text.
            _ => TextEdit::Ignore,
        }
    }

    /// Apply to `buffer`. Returns `false` when the key is ignored.
    pub fn apply(self, buffer: &mut String) -> bool {
        match self {
            TextEdit::Insert(c) => {
                buffer.push(c);
                true
            }
            TextEdit::Backspace => {
                buffer.pop();
                true
            }
            TextEdit::Ignore => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keys() {
        assert_eq!(TextEdit::from_key("a"), TextEdit::Insert('a'));
        assert_eq!(TextEdit::from_key(" "), TextEdit::Insert(' '));
        assert_eq!(TextEdit::from_key("é"), TextEdit::Insert('é'));
        assert_eq!(TextEdit::from_key("Backspace"), TextEdit::Backspace);
        assert_eq!(TextEdit::from_key("Shift"), TextEdit::Ignore);
        assert_eq!(TextEdit::from_key("F5"), TextEdit::Ignore);
        assert_eq!(TextEdit::from_key("Delete"), TextEdit::Ignore);
    }

    #[test]
    fn test_backspace_on_empty_buffer_is_accepted() {
        let mut buffer = String::new();
        assert!(TextEdit::Backspace.apply(&mut buffer));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_apply_sequence() {
        let mut buffer = String::new();
        for key in ["H", "i", "Shift", "!"] {
            TextEdit::from_key(key).apply(&mut buffer);
        }
        assert_eq!(buffer, "Hi!");
        TextEdit::from_key("Backspace").apply(&mut buffer);
        assert_eq!(buffer, "Hi");
    }

    #[test]
    fn test_pointer_event_json() {
        let event = PointerEvent::Down {
            position: Point::new(1.0, 2.0),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: PointerEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back.position(), Point::new(1.0, 2.0));
    }
}
