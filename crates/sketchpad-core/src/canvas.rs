//! Canvas document: the ordered element list and background color.

use crate::render::Painter;
use crate::shapes::{Element, Text, TextKey};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Background color of a fresh document.
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Persisted shape of a document: `[elements, backgroundColor]`.
#[derive(Serialize, Deserialize)]
struct Payload(Vec<Element>, String);

/// A canvas document containing all elements.
///
/// Element order is paint order, back to front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Payload", into = "Payload")]
pub struct CanvasDocument {
    /// All elements, back to front.
    pub elements: Vec<Element>,
    /// Background fill color.
    pub background: String,
}

impl From<Payload> for CanvasDocument {
    fn from(Payload(elements, background): Payload) -> Self {
        Self { elements, background }
    }
}

impl From<CanvasDocument> for Payload {
    fn from(doc: CanvasDocument) -> Self {
        Payload(doc.elements, doc.background)
    }
}

impl Default for CanvasDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::with_background(DEFAULT_BACKGROUND)
    }

    pub fn with_background(background: &str) -> Self {
        Self {
            elements: Vec::new(),
            background: background.to_string(),
        }
    }

    /// Append an element and return its index.
    pub fn push(&mut self, element: Element) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.elements.get_mut(index)
    }

    /// Remove the element at `index`, shifting later elements down.
    pub fn remove(&mut self, index: usize) -> Option<Element> {
        (index < self.elements.len()).then(|| self.elements.remove(index))
    }

    /// Remove and return the most recently added element.
    pub fn pop(&mut self) -> Option<Element> {
        self.elements.pop()
    }

    /// Remove every element, keeping the background.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Index of the first text element matching `key`.
    pub fn find_text(&self, key: &TextKey) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| e.as_text().is_some_and(|t| t.matches(key)))
    }

    /// Update the content of the text matching `key`, or append a new text
    /// element if none matches. Returns the element's index.
    pub fn upsert_text(&mut self, key: &TextKey, content: &str, painter: &dyn Painter) -> usize {
        if let Some(index) = self.find_text(key) {
            if let Some(text) = self.elements[index].as_text_mut() {
                text.set_content(content, painter);
            }
            return index;
        }
        let text = Text::measured(
            Point::new(key.x, key.y),
            content,
            key.font_size,
            &key.font_family,
            &key.color,
            painter,
        );
        self.push(Element::Text(text))
    }

    /// Encode as the persisted `[elements, background]` JSON payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    /// Decode a persisted payload. Any shape error rejects the whole document.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingPainter;
    use crate::shapes::{Ellipse, PenStroke, Rectangle};

    fn key(x: f64, y: f64) -> TextKey {
        TextKey {
            x,
            y,
            font_size: 30,
            font_family: "Arial".to_string(),
            color: "#000000".to_string(),
        }
    }

    #[test]
    fn test_document_creation() {
        let doc = CanvasDocument::new();
        assert!(doc.is_empty());
        assert_eq!(doc.background, DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_push_and_remove() {
        let mut doc = CanvasDocument::new();
        let a = doc.push(Element::Rect(Rectangle::new(Point::ZERO, 1.0, 1.0, "#000", 1)));
        let b = doc.push(Element::Ellipse(Ellipse::new(Point::ZERO, 4.0, 4.0, "#000", 1)));
        assert_eq!((a, b), (0, 1));

        let removed = doc.remove(0).unwrap();
        assert!(matches!(removed, Element::Rect(_)));
        assert_eq!(doc.len(), 1);
        assert!(doc.remove(5).is_none());
    }

    #[test]
    fn test_upsert_text_updates_in_place() {
        let painter = RecordingPainter::new(800.0, 600.0);
        let mut doc = CanvasDocument::new();
        let first = doc.upsert_text(&key(20.0, 20.0), "H", &painter);
        let second = doc.upsert_text(&key(20.0, 20.0), "Hi", &painter);
        assert_eq!(first, second);
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.elements[0].as_text().unwrap().text, "Hi");

        doc.upsert_text(&key(40.0, 20.0), "x", &painter);
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_json_round_trip() {
        let painter = RecordingPainter::new(800.0, 600.0);
        let mut doc = CanvasDocument::with_background("#fafafa");
        let rect = Rectangle::new(Point::new(10.0, 10.0), -5.0, 8.0, "#123456", 3);
        doc.push(Element::Rect(rect));
        let pen = PenStroke::new(Point::ZERO, Point::new(2.0, 2.0), "#000", 1);
        doc.push(Element::PenStroke(pen));
        doc.upsert_text(&key(1.0, 2.0), "hello", &painter);

        let bytes = doc.to_bytes().unwrap();
        assert_eq!(bytes.first(), Some(&b'['));
        let loaded = CanvasDocument::from_bytes(&bytes).unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_payload_without_ids_loads() {
        let json = r##"[
            [{"type":"rect","x":1,"y":2,"width":3,"height":4,"color":"#000","lineWidth":2}],
            "#ffffff"
        ]"##;
        let doc = CanvasDocument::from_bytes(json.as_bytes()).unwrap();
        assert_eq!(doc.len(), 1);
        assert!(matches!(doc.elements[0], Element::Rect(_)));
    }

    #[test]
    fn test_fractional_line_width_loads() {
        let json = r##"[
            [
                {"type":"rect","x":1,"y":2,"width":3,"height":4,"color":"#000","lineWidth":2.5},
                {"type":"rect","x":9,"y":9,"width":5,"height":5,"color":"#000","lineWidth":2}
            ],
            "#ffffff"
        ]"##;
        let doc = CanvasDocument::from_bytes(json.as_bytes()).unwrap();
        assert_eq!(doc.len(), 2);
        let widths: Vec<u32> = doc
            .elements
            .iter()
            .map(|e| match e {
                Element::Rect(r) => r.line_width,
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(widths, [2, 2]);
    }

    #[test]
    fn test_malformed_payload_rejected() {
        assert!(CanvasDocument::from_bytes(br#"{"elements":[]}"#).is_err());
        assert!(CanvasDocument::from_bytes(br##"[[{"type":"star"}],"#fff"]"##).is_err());
    }
}
