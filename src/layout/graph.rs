//! SankeyGraph: derives the node/link model from raw flow edges.
//!
//! Nodes are the deduplicated union of every source and target name, sorted
//! by name so layout and color assignment are reproducible. Links are owned
//! copies of the input edges in input order.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use regex::Regex;

use crate::error::{SankeyError, SankeyResult};
use crate::syntax::types::FlowEdge;

static NON_ALNUM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^A-Za-z0-9]+").expect("static category pattern is valid")
});

/// Project a node name onto its category: every character that is not an
/// ASCII letter or digit is removed.
pub fn category_of(name: &str) -> String {
    NON_ALNUM.replace_all(name, "").into_owned()
}

/// A unique node in the flow graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub name: String,
    /// Alphanumeric-only projection of `name`, used as the color/gradient key.
    pub category: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let category = category_of(&name);
        Self { name, category }
    }
}

/// Default node identity: the node name.
pub fn node_name(node: &Node) -> &str {
    &node.name
}

/// A flow between two nodes, referenced by node id.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub source: String,
    pub target: String,
    pub value: f64,
}

impl From<&FlowEdge> for Link {
    fn from(edge: &FlowEdge) -> Self {
        Self {
            source: edge.source.clone(),
            target: edge.target.clone(),
            value: edge.value,
        }
    }
}

/// Node/link model handed to a layout engine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SankeyGraph {
    pub nodes: Vec<Node>,
    pub links: Vec<Link>,
}

impl SankeyGraph {
    /// Build the graph model from flow edges.
    pub fn from_edges(edges: &[FlowEdge]) -> Self {
        let names: BTreeSet<&str> = edges
            .iter()
            .flat_map(|e| [e.source.as_str(), e.target.as_str()])
            .collect();
        let nodes: Vec<Node> = names.into_iter().map(Node::new).collect();

        for edge in edges.iter().filter(|e| e.is_self_loop()) {
            tracing::warn!(node = %edge.source, "self-loop flow edge");
        }
        let links: Vec<Link> = edges.iter().map(Link::from).collect();

        tracing::debug!(
            nodes = nodes.len(),
            links = links.len(),
            "built sankey graph"
        );
        Self { nodes, links }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, name: &str) -> Option<&Node> {
        self.nodes
            .binary_search_by(|n| n.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.nodes[i])
    }

    /// Resolve every link endpoint through `node_id`, returning the topology
    /// as a petgraph DiGraph whose weights are node and link indices.
    pub fn digraph(&self, node_id: fn(&Node) -> &str) -> SankeyResult<FlowDigraph> {
        let mut digraph: DiGraph<usize, usize> = DiGraph::with_capacity(self.nodes.len(), self.links.len());
        let mut node_index: HashMap<String, NodeIndex> = HashMap::new();
        for (i, node) in self.nodes.iter().enumerate() {
            let idx = digraph.add_node(i);
            node_index.insert(node_id(node).to_string(), idx);
        }

        let mut endpoints = Vec::with_capacity(self.links.len());
        for (li, link) in self.links.iter().enumerate() {
            let resolve = |name: &str| {
                node_index
                    .get(name)
                    .copied()
                    .ok_or_else(|| SankeyError::Reference {
                        link: li,
                        name: name.to_string(),
                    })
            };
            let s = resolve(&link.source)?;
            let t = resolve(&link.target)?;
            digraph.add_edge(s, t, li);
            endpoints.push((s.index(), t.index()));
        }

        Ok(FlowDigraph {
            digraph,
            node_index,
            endpoints,
        })
    }
}

/// Resolved topology of a `SankeyGraph`.
pub struct FlowDigraph {
    pub digraph: DiGraph<usize, usize>,
    /// Maps node id → petgraph NodeIndex.
    pub node_index: HashMap<String, NodeIndex>,
    /// (source node index, target node index) per link, in link order.
    pub endpoints: Vec<(usize, usize)>,
}

impl FlowDigraph {
    /// Returns node indices in topological order, or the index of a node on a cycle.
    pub fn topological_order(&self) -> Result<Vec<usize>, usize> {
        toposort(&self.digraph, None)
            .map(|order| order.into_iter().map(|idx| self.digraph[idx]).collect())
            .map_err(|cycle| self.digraph[cycle.node_id()])
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[path = "../../tests/rust/test_layout_graph.rs"]
mod tests;
