//! Configuration for the rendering pipeline.

use crate::layout::types::Extent;
use crate::layout::{
    Alignment, DEFAULT_ITERATIONS, DEFAULT_NODE_PADDING, DEFAULT_NODE_WIDTH, LayoutConfig,
};
use crate::renderers::encoding::EdgeColor;

pub const DEFAULT_WIDTH: f64 = 960.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: f64,
    /// Canvas height in pixels.
    pub height: f64,
    pub align: Alignment,
    pub edge_color: EdgeColor,
    pub node_width: f64,
    pub node_padding: f64,
    /// Relaxation passes of the layout engine.
    pub iterations: usize,
    /// Suffix for tooltip values. Overrides units carried by the input data.
    pub units: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            align: Alignment::default(),
            edge_color: EdgeColor::default(),
            node_width: DEFAULT_NODE_WIDTH,
            node_padding: DEFAULT_NODE_PADDING,
            iterations: DEFAULT_ITERATIONS,
            units: None,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// The drawable extent: one pixel in from the sides, five from top and bottom.
    pub fn extent(&self) -> Extent {
        Extent::new(1.0, 5.0, self.width - 1.0, self.height - 5.0)
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            align: self.align,
            node_width: self.node_width,
            node_padding: self.node_padding,
            extent: self.extent(),
            iterations: self.iterations,
            ..LayoutConfig::default()
        }
    }
}
