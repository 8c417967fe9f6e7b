//! WASM bindings for sankey-svg.
//!
//! Exposes `render` and `renderWithOptions` to JavaScript via wasm-bindgen.

use wasm_bindgen::prelude::*;

use crate::RenderConfig;

/// Render flow-table source to SVG with default settings.
#[wasm_bindgen]
pub fn render(src: &str) -> Result<String, JsError> {
    crate::render_flows(src, &RenderConfig::default()).map_err(|e| JsError::new(&e.to_string()))
}

/// Render flow-table source with control over the common options.
///
/// - `align`: "left", "right", "center", "justify", or empty for the default
/// - `edge_color`: "none", "path", "input", "output", or empty for the default
/// - `units`: tooltip suffix, or empty for none
#[wasm_bindgen(js_name = "renderWithOptions")]
pub fn render_with_options(
    src: &str,
    width: f64,
    height: f64,
    align: &str,
    edge_color: &str,
    units: &str,
) -> Result<String, JsError> {
    let mut config = RenderConfig {
        width,
        height,
        ..RenderConfig::default()
    };
    if !align.is_empty() {
        config.align = align.parse().map_err(|e: crate::SankeyError| JsError::new(&e.to_string()))?;
    }
    if !edge_color.is_empty() {
        config.edge_color = edge_color
            .parse()
            .map_err(|e: crate::SankeyError| JsError::new(&e.to_string()))?;
    }
    if !units.is_empty() {
        config.units = Some(units.to_string());
    }
    crate::render_flows(src, &config).map_err(|e| JsError::new(&e.to_string()))
}
