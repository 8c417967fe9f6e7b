//! Sankey column layout.
//!
//! Phases:
//!   1. Node values (max of inflow and outflow)
//!   2. Depth / height assignment (longest path from sources / to sinks)
//!   3. Column assignment via the alignment strategy
//!   4. Breadth initialization (stack, scale, spread)
//!   5. Relaxation (weighted barycentre moves + collision resolution)
//!   6. Link breadths

use super::align::AlignInput;
use super::graph::{FlowDigraph, SankeyGraph};
use super::types::{Extent, LaidOutLink, LaidOutNode, LayoutResult};
use super::{LayoutConfig, LayoutEngine};
use crate::error::LayoutError;

/// Moves smaller than this are ignored during collision resolution.
const COLLISION_EPSILON: f64 = 1e-6;

/// Built-in Sankey layout engine.
pub struct SankeyLayout;

impl LayoutEngine for SankeyLayout {
    fn layout(
        &self,
        graph: &SankeyGraph,
        topology: &FlowDigraph,
        config: &LayoutConfig,
    ) -> Result<LayoutResult, LayoutError> {
        if graph.is_empty() {
            return Ok(LayoutResult::new(config.extent));
        }
        if let Err(node) = topology.topological_order() {
            return Err(LayoutError::CircularLink {
                node: graph.nodes[node].name.clone(),
            });
        }

        let mut state = LayoutState::new(graph, topology, config);
        state.compute_node_values();
        state.compute_node_depths()?;
        state.compute_node_heights()?;
        let mut columns = state.compute_node_layers();
        state.compute_node_breadths(&mut columns)?;
        state.compute_link_breadths();

        Ok(LayoutResult {
            nodes: state.nodes,
            links: state.links,
            extent: config.extent,
        })
    }
}

// ─── Working state ───────────────────────────────────────────────────────────

struct LayoutState<'a> {
    config: &'a LayoutConfig,
    nodes: Vec<LaidOutNode>,
    links: Vec<LaidOutLink>,
    /// Outgoing link indices per node, kept ordered by target breadth.
    source_links: Vec<Vec<usize>>,
    /// Incoming link indices per node, kept ordered by source breadth.
    target_links: Vec<Vec<usize>>,
    /// Effective node padding.
    py: f64,
}

impl<'a> LayoutState<'a> {
    fn new(graph: &SankeyGraph, topology: &FlowDigraph, config: &'a LayoutConfig) -> Self {
        let nodes: Vec<LaidOutNode> = graph
            .nodes
            .iter()
            .cloned()
            .map(LaidOutNode::new)
            .collect();
        let mut source_links = vec![Vec::new(); nodes.len()];
        let mut target_links = vec![Vec::new(); nodes.len()];
        let links: Vec<LaidOutLink> = graph
            .links
            .iter()
            .zip(&topology.endpoints)
            .enumerate()
            .map(|(i, (link, &(s, t)))| {
                source_links[s].push(i);
                target_links[t].push(i);
                LaidOutLink::new(i, s, t, link.value)
            })
            .collect();

        Self {
            config,
            nodes,
            links,
            source_links,
            target_links,
            py: config.node_padding,
        }
    }

    fn extent(&self) -> Extent {
        self.config.extent
    }

    fn compute_node_values(&mut self) {
        for (i, node) in self.nodes.iter_mut().enumerate() {
            let out: f64 = self.source_links[i].iter().map(|&l| self.links[l].value).sum();
            let inc: f64 = self.target_links[i].iter().map(|&l| self.links[l].value).sum();
            node.value = out.max(inc);
        }
    }

    /// Longest-path layering, breadth first along `next`.
    fn longest_paths(
        &self,
        next: impl Fn(usize) -> Vec<usize>,
    ) -> Result<Vec<usize>, LayoutError> {
        let n = self.nodes.len();
        let mut rank = vec![0; n];
        let mut current: Vec<usize> = (0..n).collect();
        let mut x = 0;
        while !current.is_empty() {
            let mut queued = vec![false; n];
            let mut frontier = Vec::new();
            for &node in &current {
                rank[node] = x;
                for succ in next(node) {
                    if !queued[succ] {
                        queued[succ] = true;
                        frontier.push(succ);
                    }
                }
            }
            x += 1;
            if x > n {
                return Err(LayoutError::CircularLink {
                    node: self.nodes[current[0]].name().to_string(),
                });
            }
            current = frontier;
        }
        Ok(rank)
    }

    fn compute_node_depths(&mut self) -> Result<(), LayoutError> {
        let depths = self.longest_paths(|i| {
            self.source_links[i]
                .iter()
                .map(|&l| self.links[l].target)
                .collect()
        })?;
        for (node, depth) in self.nodes.iter_mut().zip(depths) {
            node.depth = depth;
        }
        Ok(())
    }

    fn compute_node_heights(&mut self) -> Result<(), LayoutError> {
        let heights = self.longest_paths(|i| {
            self.target_links[i]
                .iter()
                .map(|&l| self.links[l].source)
                .collect()
        })?;
        for (node, height) in self.nodes.iter_mut().zip(heights) {
            node.height = height;
        }
        Ok(())
    }

    fn align_input(&self, i: usize) -> AlignInput {
        AlignInput {
            depth: self.nodes[i].depth,
            height: self.nodes[i].height,
            has_incoming: !self.target_links[i].is_empty(),
            min_target_depth: self.source_links[i]
                .iter()
                .map(|&l| self.nodes[self.links[l].target].depth)
                .min(),
        }
    }

    /// Assign every node a column and its horizontal extent. Returns the
    /// non-empty columns, each holding node indices in node order.
    fn compute_node_layers(&mut self) -> Vec<Vec<usize>> {
        let extent = self.extent();
        let dx = self.config.node_width;
        let count = self.nodes.iter().map(|n| n.depth).max().unwrap_or(0) + 1;
        let kx = if count > 1 {
            (extent.width() - dx) / (count - 1) as f64
        } else {
            0.0
        };

        let mut columns: Vec<Vec<usize>> = vec![Vec::new(); count];
        for i in 0..self.nodes.len() {
            let layer = self.config.align.column(self.align_input(i), count);
            let node = &mut self.nodes[i];
            node.layer = layer;
            node.x0 = extent.x0 + layer as f64 * kx;
            node.x1 = node.x0 + dx;
            columns[layer].push(i);
        }
        columns.retain(|c| !c.is_empty());
        tracing::debug!(columns = columns.len(), kx, "assigned node columns");
        columns
    }

    fn compute_node_breadths(&mut self, columns: &mut [Vec<usize>]) -> Result<(), LayoutError> {
        let extent = self.extent();
        let longest = columns.iter().map(Vec::len).max().unwrap_or(1);
        self.py = if longest > 1 {
            self.config
                .node_padding
                .min(extent.height() / (longest - 1) as f64)
        } else {
            self.config.node_padding
        };

        self.initialize_node_breadths(columns)?;

        let iterations = self.config.iterations;
        for i in 0..iterations {
            let alpha = 0.99_f64.powi(i as i32);
            let beta = (1.0 - alpha).max((i + 1) as f64 / iterations as f64);
            self.relax_right_to_left(columns, alpha, beta);
            self.relax_left_to_right(columns, alpha, beta);
        }
        Ok(())
    }

    fn initialize_node_breadths(&mut self, columns: &[Vec<usize>]) -> Result<(), LayoutError> {
        let extent = self.extent();
        let py = self.py;
        let ky = columns
            .iter()
            .map(|c| {
                let total: f64 = c.iter().map(|&i| self.nodes[i].value).sum();
                (extent.height() - (c.len() - 1) as f64 * py) / total
            })
            .fold(f64::INFINITY, f64::min);
        if !(ky.is_finite() && ky > 0.0) {
            return Err(LayoutError::DegenerateScale { ky });
        }
        tracing::debug!(ky, py, "vertical scale");

        for column in columns {
            let mut y = extent.y0;
            for &i in column {
                let node = &mut self.nodes[i];
                node.y0 = y;
                node.y1 = y + node.value * ky;
                y = node.y1 + py;
                for &l in &self.source_links[i] {
                    self.links[l].width = self.links[l].value * ky;
                }
            }
            let spread = (extent.y1 - y + py) / (column.len() + 1) as f64;
            for (k, &i) in column.iter().enumerate() {
                let shift = spread * (k + 1) as f64;
                self.nodes[i].y0 += shift;
                self.nodes[i].y1 += shift;
            }
            self.reorder_links(column);
        }
        Ok(())
    }

    /// Reposition each node from its incoming links.
    fn relax_left_to_right(&mut self, columns: &mut [Vec<usize>], alpha: f64, beta: f64) {
        for ci in 1..columns.len() {
            for k in 0..columns[ci].len() {
                let target = columns[ci][k];
                let mut y = 0.0;
                let mut w = 0.0;
                for &l in &self.target_links[target] {
                    let source = self.links[l].source;
                    let v = self.links[l].value * self.layer_gap(source, target);
                    y += self.target_top(source, target) * v;
                    w += v;
                }
                if !(w > 0.0) {
                    continue;
                }
                let dy = (y / w - self.nodes[target].y0) * alpha;
                self.nodes[target].y0 += dy;
                self.nodes[target].y1 += dy;
                self.reorder_node_links(target);
            }
            self.sort_by_breadth(&mut columns[ci]);
            self.resolve_collisions(&columns[ci], beta);
        }
    }

    /// Reposition each node from its outgoing links.
    fn relax_right_to_left(&mut self, columns: &mut [Vec<usize>], alpha: f64, beta: f64) {
        for ci in (0..columns.len().saturating_sub(1)).rev() {
            for k in 0..columns[ci].len() {
                let source = columns[ci][k];
                let mut y = 0.0;
                let mut w = 0.0;
                for &l in &self.source_links[source] {
                    let target = self.links[l].target;
                    let v = self.links[l].value * self.layer_gap(source, target);
                    y += self.source_top(source, target) * v;
                    w += v;
                }
                if !(w > 0.0) {
                    continue;
                }
                let dy = (y / w - self.nodes[source].y0) * alpha;
                self.nodes[source].y0 += dy;
                self.nodes[source].y1 += dy;
                self.reorder_node_links(source);
            }
            self.sort_by_breadth(&mut columns[ci]);
            self.resolve_collisions(&columns[ci], beta);
        }
    }

    fn layer_gap(&self, source: usize, target: usize) -> f64 {
        self.nodes[target].layer as f64 - self.nodes[source].layer as f64
    }

    fn sort_by_breadth(&self, column: &mut [usize]) {
        column.sort_by(|&a, &b| self.nodes[a].y0.total_cmp(&self.nodes[b].y0));
    }

    fn resolve_collisions(&mut self, column: &[usize], alpha: f64) {
        let extent = self.extent();
        let py = self.py;
        let mid = column.len() >> 1;
        let subject = column[mid];
        let (above, below) = (self.nodes[subject].y0 - py, self.nodes[subject].y1 + py);
        self.push_up(column, above, mid, alpha);
        self.push_down(column, below, mid + 1, alpha);
        self.push_up(column, extent.y1, column.len(), alpha);
        self.push_down(column, extent.y0, 0, alpha);
    }

    /// Push overlapping nodes down, walking `column[start..]` from `y`.
    fn push_down(&mut self, column: &[usize], mut y: f64, start: usize, alpha: f64) {
        for &i in column.iter().skip(start) {
            let node = &mut self.nodes[i];
            let dy = (y - node.y0) * alpha;
            if dy > COLLISION_EPSILON {
                node.y0 += dy;
                node.y1 += dy;
            }
            y = node.y1 + self.py;
        }
    }

    /// Push overlapping nodes up, walking `column[..end]` backwards from `y`.
    fn push_up(&mut self, column: &[usize], mut y: f64, end: usize, alpha: f64) {
        for &i in column[..end].iter().rev() {
            let node = &mut self.nodes[i];
            let dy = (node.y1 - y) * alpha;
            if dy > COLLISION_EPSILON {
                node.y0 -= dy;
                node.y1 -= dy;
            }
            y = node.y0 - self.py;
        }
    }

    /// The `target.y0` that would give a straight link from `source`.
    fn target_top(&self, source: usize, target: usize) -> f64 {
        let outgoing = &self.source_links[source];
        let mut y = self.nodes[source].y0 - (outgoing.len() as f64 - 1.0) * self.py / 2.0;
        for &l in outgoing {
            if self.links[l].target == target {
                break;
            }
            y += self.links[l].width + self.py;
        }
        for &l in &self.target_links[target] {
            if self.links[l].source == source {
                break;
            }
            y -= self.links[l].width;
        }
        y
    }

    /// The `source.y0` that would give a straight link to `target`.
    fn source_top(&self, source: usize, target: usize) -> f64 {
        let incoming = &self.target_links[target];
        let mut y = self.nodes[target].y0 - (incoming.len() as f64 - 1.0) * self.py / 2.0;
        for &l in incoming {
            if self.links[l].source == source {
                break;
            }
            y += self.links[l].width + self.py;
        }
        for &l in &self.source_links[source] {
            if self.links[l].target == target {
                break;
            }
            y -= self.links[l].width;
        }
        y
    }

    fn reorder_links(&mut self, column: &[usize]) {
        for &i in column {
            sort_by_target_breadth(&mut self.source_links[i], &self.links, &self.nodes);
            sort_by_source_breadth(&mut self.target_links[i], &self.links, &self.nodes);
        }
    }

    fn reorder_node_links(&mut self, node: usize) {
        for k in 0..self.target_links[node].len() {
            let source = self.links[self.target_links[node][k]].source;
            sort_by_target_breadth(&mut self.source_links[source], &self.links, &self.nodes);
        }
        for k in 0..self.source_links[node].len() {
            let target = self.links[self.source_links[node][k]].target;
            sort_by_source_breadth(&mut self.target_links[target], &self.links, &self.nodes);
        }
    }

    fn compute_link_breadths(&mut self) {
        for i in 0..self.nodes.len() {
            let mut y0 = self.nodes[i].y0;
            let mut y1 = y0;
            for &l in &self.source_links[i] {
                let link = &mut self.links[l];
                link.y0 = y0 + link.width / 2.0;
                y0 += link.width;
            }
            for &l in &self.target_links[i] {
                let link = &mut self.links[l];
                link.y1 = y1 + link.width / 2.0;
                y1 += link.width;
            }
        }
    }
}

fn sort_by_target_breadth(list: &mut [usize], links: &[LaidOutLink], nodes: &[LaidOutNode]) {
    list.sort_by(|&a, &b| {
        nodes[links[a].target]
            .y0
            .total_cmp(&nodes[links[b].target].y0)
            .then(a.cmp(&b))
    });
}

fn sort_by_source_breadth(list: &mut [usize], links: &[LaidOutLink], nodes: &[LaidOutNode]) {
    list.sort_by(|&a, &b| {
        nodes[links[a].source]
            .y0
            .total_cmp(&nodes[links[b].source].y0)
            .then(a.cmp(&b))
    });
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[path = "../../tests/rust/test_layout_sankey.rs"]
mod tests;
