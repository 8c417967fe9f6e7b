//! Renderer trait and the SVG output stage.

pub mod color;
pub mod encoding;
pub mod format;
pub mod svg;

pub use color::ColorAssigner;
pub use encoding::EdgeColor;
pub use svg::SvgRenderer;

use crate::layout::types::LayoutResult;

/// Trait for diagram renderers.
pub trait Renderer {
    /// Render a laid-out graph to a string.
    fn render(&self, layout: &LayoutResult) -> String;
}
