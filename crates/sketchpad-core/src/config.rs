//! Editor configuration.

use crate::blink::DEFAULT_BLINK_INTERVAL;
use crate::canvas::DEFAULT_BACKGROUND;
use crate::storage::STORAGE_KEY;
use crate::tools::ToolStyle;
use kurbo::Size;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default canvas width in pixels.
pub const DEFAULT_VIEWPORT_WIDTH: f64 = 1180.0;
/// Default canvas height in pixels.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

/// Settings for an [`Editor`](crate::Editor).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Blob store key of the document.
    pub storage_key: String,
    /// Background of a new document.
    pub background: String,
    pub viewport_width: f64,
    pub viewport_height: f64,
    /// Caret blink toggle interval in milliseconds.
    pub blink_interval_ms: u64,
    /// Initial drawing style.
    pub style: ToolStyle,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            background: DEFAULT_BACKGROUND.to_string(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            blink_interval_ms: DEFAULT_BLINK_INTERVAL.as_millis() as u64,
            style: ToolStyle::default(),
        }
    }
}

impl EditorConfig {
    pub fn viewport_size(&self) -> Size {
        Size::new(self.viewport_width, self.viewport_height)
    }

    /// Blink interval, never shorter than one millisecond.
    pub fn blink_interval(&self) -> Duration {
        Duration::from_millis(self.blink_interval_ms.max(1))
    }
}
