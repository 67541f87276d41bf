//! Sketchpad Core Library
//!
//! Platform-agnostic document model, hit-testing and interaction logic for the
//! Sketchpad drawing surface. Painting goes through the [`Painter`] trait and
//! persistence through the [`BlobStore`] trait, so hosts plug in their own
//! backends.

pub mod blink;
pub mod canvas;
pub mod config;
pub mod editor;
pub mod input;
pub mod render;
pub mod shapes;
pub mod storage;
pub mod tools;

pub use blink::{CaretBlink, Instant};
pub use canvas::CanvasDocument;
pub use config::EditorConfig;
pub use editor::{Editor, PendingDelete};
pub use hit_test::{Hit, resolve};
pub use input::{KeyEvent, PointerEvent, TextEdit};
pub use render::{PaintOp, Painter, RecordingPainter};
pub use shapes::{Element, ElementKind, ShapeId};
pub use storage::{BlobStore, DocumentStore, MemoryStorage, StorageError, StorageResult};
pub use tools::{ToolKind, ToolStyle};

#[cfg(not(target_arch = "wasm32"))]
pub use storage::FileStorage;
