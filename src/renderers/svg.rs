//! SVG renderer: serializes an encoded scene to an SVG document.
//!
//! Draw order is node boxes, then links, then labels. Each link sits in its
//! own multiply-blended group together with its gradient, if any.

use super::Renderer;
use super::encoding::{self, LinkStroke, NodeBox, NodeLabel, Scene};
use super::format::fmt_num;
use crate::config::RenderConfig;
use crate::layout::types::LayoutResult;

// ── Constants ────────────────────────────────────────────────────────────────

const FONT_FAMILY: &str = "sans-serif";
const FONT_SIZE: u32 = 10;
const NODE_STROKE: &str = "#000";
const LINK_OPACITY: &str = "0.5";
const LINK_BLEND: &str = "mix-blend-mode: multiply;";

// ── Helpers ──────────────────────────────────────────────────────────────────

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ── Primitives ───────────────────────────────────────────────────────────────

fn render_node(b: &NodeBox) -> String {
    format!(
        r#"<rect x="{x}" y="{y}" height="{h}" width="{w}" fill="{fill}"><title>{title}</title></rect>"#,
        x = fmt_num(b.x),
        y = fmt_num(b.y),
        h = fmt_num(b.height),
        w = fmt_num(b.width),
        fill = escape(&b.fill),
        title = escape(&b.title),
    )
}

fn render_link(l: &LinkStroke) -> String {
    let gradient = l
        .gradient
        .as_ref()
        .map(|g| {
            format!(
                r#"<linearGradient id="{id}" gradientUnits="userSpaceOnUse" x1="{x1}" x2="{x2}"><stop offset="0%" stop-color="{c1}"/><stop offset="100%" stop-color="{c2}"/></linearGradient>"#,
                id = escape(&g.id),
                x1 = fmt_num(g.x1),
                x2 = fmt_num(g.x2),
                c1 = escape(&g.start_color),
                c2 = escape(&g.end_color),
            )
        })
        .unwrap_or_default();
    format!(
        r#"<g style="{LINK_BLEND}">{gradient}<path d="{d}" stroke="{stroke}" stroke-width="{sw}"/></g>"#,
        d = l.path,
        stroke = escape(&l.stroke),
        sw = fmt_num(l.stroke_width),
    )
}

fn render_label(l: &NodeLabel) -> String {
    format!(
        r#"<text x="{x}" y="{y}" dy="{dy}" text-anchor="{anchor}">{text}</text>"#,
        x = fmt_num(l.x),
        y = fmt_num(l.y),
        dy = l.dy,
        anchor = l.anchor.as_str(),
        text = escape(&l.text),
    )
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Serialize a scene. An empty scene renders as the empty string.
pub fn render_scene(scene: &Scene) -> String {
    if scene.nodes.is_empty() {
        return String::new();
    }

    let w = fmt_num(scene.width);
    let h = fmt_num(scene.height);
    let mut parts = vec![format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    )];

    parts.push(format!(r#"<g stroke="{NODE_STROKE}">"#));
    parts.extend(scene.nodes.iter().map(render_node));
    parts.push("</g>".to_string());

    parts.push(format!(
        r#"<g fill="none" stroke-opacity="{LINK_OPACITY}">"#
    ));
    parts.extend(scene.links.iter().map(render_link));
    parts.push("</g>".to_string());

    parts.push(format!(
        r#"<g font-family="{FONT_FAMILY}" font-size="{FONT_SIZE}">"#
    ));
    parts.extend(scene.labels.iter().map(render_label));
    parts.push("</g>".to_string());

    parts.push("</svg>".to_string());
    parts.join("\n")
}

/// Renders a layout to SVG using the colors, units and canvas of a `RenderConfig`.
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    pub config: RenderConfig,
}

impl SvgRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }
}

impl Renderer for SvgRenderer {
    fn render(&self, layout: &LayoutResult) -> String {
        let scene = encoding::encode(layout, &self.config);
        render_scene(&scene)
    }
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_svg.rs"]
mod tests;
