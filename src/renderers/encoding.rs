//! Encoding rules: bind laid-out nodes and links to drawable primitives.
//!
//! The output is a flat `Scene` of boxes, strokes and labels with every
//! attribute already resolved, so a renderer only has to serialize it.

use std::fmt;
use std::str::FromStr;

use super::color::{ColorAssigner, NEUTRAL};
use super::format::{fmt_num, format_value};
use crate::config::RenderConfig;
use crate::error::SankeyError;
use crate::layout::types::{LaidOutLink, LaidOutNode, LayoutResult};

/// Gap between a node box and its label.
const LABEL_OFFSET: f64 = 6.0;
const LABEL_DY: &str = "0.35em";
const GRADIENT_PREFIX: &str = "linkGrad-";

// ─── EdgeColor ───────────────────────────────────────────────────────────────

/// How link strokes are colored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EdgeColor {
    /// Flat neutral gray.
    None,
    /// Gradient from the source color to the target color.
    #[default]
    Path,
    /// Source node color.
    Input,
    /// Target node color.
    Output,
}

impl EdgeColor {
    pub const ALL: [EdgeColor; 4] = [
        EdgeColor::None,
        EdgeColor::Path,
        EdgeColor::Input,
        EdgeColor::Output,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeColor::None => "none",
            EdgeColor::Path => "path",
            EdgeColor::Input => "input",
            EdgeColor::Output => "output",
        }
    }
}

impl fmt::Display for EdgeColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EdgeColor {
    type Err = SankeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" => Ok(EdgeColor::None),
            "path" | "gradient" => Ok(EdgeColor::Path),
            "input" | "source" => Ok(EdgeColor::Input),
            "output" | "target" => Ok(EdgeColor::Output),
            _ => Err(SankeyError::Lookup {
                kind: "edge color",
                name: s.to_string(),
                expected: "none, path, input, output",
            }),
        }
    }
}

// ─── Primitives ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct NodeBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    /// Tooltip: name and formatted value on separate lines.
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NodeLabel {
    pub x: f64,
    pub y: f64,
    pub dy: &'static str,
    pub anchor: TextAnchor,
    pub text: String,
}

/// Horizontal linear gradient in user space.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient {
    pub id: String,
    pub x1: f64,
    pub x2: f64,
    pub start_color: String,
    pub end_color: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinkStroke {
    /// SVG path data.
    pub path: String,
    pub stroke: String,
    pub stroke_width: f64,
    /// Present only for `EdgeColor::Path`.
    pub gradient: Option<Gradient>,
}

/// Everything needed to draw one diagram.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub nodes: Vec<NodeBox>,
    pub links: Vec<LinkStroke>,
    pub labels: Vec<NodeLabel>,
}

// ─── Rules ───────────────────────────────────────────────────────────────────

pub fn encode_node(node: &LaidOutNode, colors: &mut ColorAssigner, units: Option<&str>) -> NodeBox {
    NodeBox {
        x: node.x0,
        y: node.y0,
        width: node.width(),
        height: node.breadth(),
        fill: colors.color(node).to_string(),
        title: format!("{}\n{}", node.name(), format_value(node.value, units)),
    }
}

/// Labels sit outside the box, on the side facing the diagram centre.
pub fn encode_label(node: &LaidOutNode, width: f64) -> NodeLabel {
    let (x, anchor) = if node.x0 < width / 2.0 {
        (node.x1 + LABEL_OFFSET, TextAnchor::Start)
    } else {
        (node.x0 - LABEL_OFFSET, TextAnchor::End)
    };
    NodeLabel {
        x,
        y: (node.y0 + node.y1) / 2.0,
        dy: LABEL_DY,
        anchor,
        text: node.name().to_string(),
    }
}

pub fn gradient_id(source: &LaidOutNode, target: &LaidOutNode) -> String {
    format!("{GRADIENT_PREFIX}{}{}", source.category(), target.category())
}

/// Stroke widths never drop below one pixel.
pub fn stroke_width(width: f64) -> f64 {
    width.max(1.0)
}

/// Horizontal cubic from `(sx, y0)` to `(tx, y1)` with both control points
/// at the horizontal midpoint.
pub fn link_path(sx: f64, y0: f64, tx: f64, y1: f64) -> String {
    let mx = (sx + tx) / 2.0;
    format!(
        "M{sx},{y0}C{mx},{y0},{mx},{y1},{tx},{y1}",
        sx = fmt_num(sx),
        y0 = fmt_num(y0),
        mx = fmt_num(mx),
        y1 = fmt_num(y1),
        tx = fmt_num(tx),
    )
}

pub fn encode_link(
    link: &LaidOutLink,
    layout: &LayoutResult,
    colors: &mut ColorAssigner,
    mode: EdgeColor,
) -> LinkStroke {
    let source = layout.source_of(link);
    let target = layout.target_of(link);
    let (stroke, gradient) = match mode {
        EdgeColor::None => (NEUTRAL.to_string(), None),
        EdgeColor::Input => (colors.color(source).to_string(), None),
        EdgeColor::Output => (colors.color(target).to_string(), None),
        EdgeColor::Path => {
            let gradient = Gradient {
                id: gradient_id(source, target),
                x1: source.x1,
                x2: target.x0,
                start_color: colors.color(source).to_string(),
                end_color: colors.color(target).to_string(),
            };
            (format!("url(#{})", gradient.id), Some(gradient))
        }
    };
    LinkStroke {
        path: link_path(source.x1, link.y0, target.x0, link.y1),
        stroke,
        stroke_width: stroke_width(link.width),
        gradient,
    }
}

/// Encode a whole layout. Links keep the layout's order.
pub fn encode(layout: &LayoutResult, config: &RenderConfig) -> Scene {
    let mut colors = ColorAssigner::new(&layout.nodes);
    let units = config.units.as_deref();
    let scene = Scene {
        width: config.width,
        height: config.height,
        nodes: layout
            .nodes
            .iter()
            .map(|n| encode_node(n, &mut colors, units))
            .collect(),
        links: layout
            .links
            .iter()
            .map(|l| encode_link(l, layout, &mut colors, config.edge_color))
            .collect(),
        labels: layout
            .nodes
            .iter()
            .map(|n| encode_label(n, config.width))
            .collect(),
    };
    tracing::debug!(
        nodes = scene.nodes.len(),
        links = scene.links.len(),
        edge_color = %config.edge_color,
        "encoded scene"
    );
    scene
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_encoding.rs"]
mod tests;
