//! Sketchpad Render Library
//!
//! Painter backends for Sketchpad. The default backend keeps a retained
//! display list and exports it as SVG.

mod error;
mod svg;

pub use error::{RenderResult, RendererError};
pub use svg::{SvgPainter, export_svg};
