//! Layout types: LaidOutNode, LaidOutLink, Extent, LayoutResult.

use super::graph::Node;

// ─── Extent ──────────────────────────────────────────────────────────────────

/// Bounding box `[[x0, y0], [x1, y1]]` the layout must fit inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl Extent {
    pub fn new(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(0.0, 0.0, 1.0, 1.0)
    }
}

// ─── LaidOutNode ─────────────────────────────────────────────────────────────

/// A node with its computed box.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutNode {
    pub node: Node,
    /// max(total incoming, total outgoing) flow.
    pub value: f64,
    /// Longest path from a source node.
    pub depth: usize,
    /// Longest path to a sink node.
    pub height: usize,
    /// Column the alignment strategy placed the node in.
    pub layer: usize,
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl LaidOutNode {
    pub fn new(node: Node) -> Self {
        Self {
            node,
            value: 0.0,
            depth: 0,
            height: 0,
            layer: 0,
            x0: 0.0,
            x1: 0.0,
            y0: 0.0,
            y1: 0.0,
        }
    }

    pub fn name(&self) -> &str {
        &self.node.name
    }

    pub fn category(&self) -> &str {
        &self.node.category
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn breadth(&self) -> f64 {
        self.y1 - self.y0
    }
}

// ─── LaidOutLink ─────────────────────────────────────────────────────────────

/// A link with resolved endpoints and stroke geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LaidOutLink {
    /// Position of the link in the input.
    pub index: usize,
    /// Index into `LayoutResult::nodes`.
    pub source: usize,
    /// Index into `LayoutResult::nodes`.
    pub target: usize,
    pub value: f64,
    /// Stroke width (proportional to value).
    pub width: f64,
    /// Vertical centre at the source end.
    pub y0: f64,
    /// Vertical centre at the target end.
    pub y1: f64,
}

impl LaidOutLink {
    pub fn new(index: usize, source: usize, target: usize, value: f64) -> Self {
        Self {
            index,
            source,
            target,
            value,
            width: 0.0,
            y0: 0.0,
            y1: 0.0,
        }
    }
}

// ─── LayoutResult ────────────────────────────────────────────────────────────

/// The full output of a layout engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutResult {
    pub nodes: Vec<LaidOutNode>,
    pub links: Vec<LaidOutLink>,
    pub extent: Extent,
}

impl LayoutResult {
    pub fn new(extent: Extent) -> Self {
        Self {
            nodes: Vec::new(),
            links: Vec::new(),
            extent,
        }
    }

    pub fn source_of(&self, link: &LaidOutLink) -> &LaidOutNode {
        &self.nodes[link.source]
    }

    pub fn target_of(&self, link: &LaidOutLink) -> &LaidOutNode {
        &self.nodes[link.target]
    }

    /// Number of distinct columns occupied by nodes.
    pub fn column_count(&self) -> usize {
        self.nodes.iter().map(|n| n.layer + 1).max().unwrap_or(0)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
