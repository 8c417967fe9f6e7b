//! sankey-svg: flow-table syntax to Sankey diagram SVG renderer.
//!
//! Public API: `render_flows()` for source text and `render_sankey()` for
//! already-parsed flow data. Each stage is also usable on its own:
//! `parsers` → `layout` → `renderers`.

pub mod config;
pub mod error;
pub mod layout;
pub mod parsers;
pub mod renderers;
pub mod syntax;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::RenderConfig;
pub use error::{LayoutError, SankeyError, SankeyResult};
pub use layout::Alignment;
pub use renderers::EdgeColor;
pub use syntax::{FlowData, FlowEdge};

use layout::SankeyGraph;
use renderers::{Renderer, SvgRenderer};

/// Lay out and render parsed flow data to SVG.
///
/// Units set on `config` win over units carried by `data`. Empty data renders
/// as the empty string.
pub fn render_sankey(data: &FlowData, config: &RenderConfig) -> SankeyResult<String> {
    if data.is_empty() {
        tracing::debug!("no flows; nothing to render");
        return Ok(String::new());
    }

    let graph = SankeyGraph::from_edges(&data.edges);
    let layout = layout::full_layout(&graph, &config.layout_config())?;

    let mut config = config.clone();
    if config.units.is_none() {
        config.units = data.units.clone();
    }
    Ok(SvgRenderer::new(config).render(&layout))
}

/// Parse flow-table source text and render it to SVG.
pub fn render_flows(src: &str, config: &RenderConfig) -> SankeyResult<String> {
    let data = parsers::parse(src)?;
    tracing::debug!(edges = data.edges.len(), "parsed flows");
    render_sankey(&data, config)
}
