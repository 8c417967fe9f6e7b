//! Layout adapter: configures a layout engine and runs it over a SankeyGraph.

pub mod align;
pub mod graph;
pub mod sankey;
pub mod types;

pub use align::Alignment;
pub use graph::{FlowDigraph, Link, Node, SankeyGraph};
pub use sankey::SankeyLayout;
pub use types::{Extent, LaidOutLink, LaidOutNode, LayoutResult};

use crate::error::{LayoutError, SankeyResult};

pub const DEFAULT_NODE_WIDTH: f64 = 15.0;
pub const DEFAULT_NODE_PADDING: f64 = 10.0;
pub const DEFAULT_ITERATIONS: usize = 6;

/// Configuration surface handed to a layout engine.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Identity used to resolve link endpoints to nodes.
    pub node_id: fn(&Node) -> &str,
    pub align: Alignment,
    /// Horizontal thickness of each node box.
    pub node_width: f64,
    /// Vertical gap between nodes in a column (upper bound).
    pub node_padding: f64,
    pub extent: Extent,
    /// Relaxation passes.
    pub iterations: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_id: graph::node_name,
            align: Alignment::default(),
            node_width: DEFAULT_NODE_WIDTH,
            node_padding: DEFAULT_NODE_PADDING,
            extent: Extent::default(),
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

/// A layout capability: assigns boxes to nodes and geometry to links.
///
/// `topology` carries the link endpoints already resolved against `graph.nodes`.
pub trait LayoutEngine {
    fn layout(
        &self,
        graph: &SankeyGraph,
        topology: &FlowDigraph,
        config: &LayoutConfig,
    ) -> Result<LayoutResult, LayoutError>;
}

/// Resolve link endpoints and run `engine` over the graph.
///
/// Unknown endpoint names fail with `SankeyError::Reference`; engine failures
/// surface as `SankeyError::Layout`.
pub fn compute_layout(
    graph: &SankeyGraph,
    config: &LayoutConfig,
    engine: &dyn LayoutEngine,
) -> SankeyResult<LayoutResult> {
    let topology = graph.digraph(config.node_id)?;
    let result = engine.layout(graph, &topology, config)?;
    tracing::debug!(
        nodes = result.nodes.len(),
        links = result.links.len(),
        columns = result.column_count(),
        align = %config.align,
        "layout complete"
    );
    Ok(result)
}

/// Run the built-in Sankey engine.
pub fn full_layout(graph: &SankeyGraph, config: &LayoutConfig) -> SankeyResult<LayoutResult> {
    compute_layout(graph, config, &SankeyLayout)
}
