//! Node colors: Spectral ramp samples bound through an ordinal scale.

use std::collections::HashMap;

use crate::layout::graph::Node;
use crate::layout::types::LaidOutNode;

/// Fallback when a scale has no colors to hand out.
pub const NEUTRAL: &str = "#aaa";

/// The 11-class Spectral scheme, red through blue.
const SPECTRAL: [u32; 11] = [
    0x9e0142, 0xd53e4f, 0xf46d43, 0xfdae61, 0xfee08b, 0xffffbf, 0xe6f598, 0xabdda4, 0x66c2a5,
    0x3288bd, 0x5e4fa2,
];

fn channel(rgb: u32, shift: u32) -> f64 {
    ((rgb >> shift) & 0xff) as f64
}

/// Uniform cubic B-spline through `values`, evaluated at `t` in [0, 1].
fn basis_spline(values: &[f64], t: f64) -> f64 {
    let n = values.len() - 1;
    let (i, t) = if t <= 0.0 {
        (0, 0.0)
    } else if t >= 1.0 {
        (n - 1, 1.0)
    } else {
        ((t * n as f64).floor() as usize, t)
    };
    let v1 = values[i];
    let v2 = values[i + 1];
    let v0 = if i > 0 { values[i - 1] } else { 2.0 * v1 - v2 };
    let v3 = if i < n - 1 { values[i + 2] } else { 2.0 * v2 - v1 };

    let t1 = (t - i as f64 / n as f64) * n as f64;
    let t2 = t1 * t1;
    let t3 = t2 * t1;
    ((1.0 - 3.0 * t1 + 3.0 * t2 - t3) * v0
        + (4.0 - 6.0 * t2 + 3.0 * t3) * v1
        + (1.0 + 3.0 * t1 + 3.0 * t2 - 3.0 * t3) * v2
        + t3 * v3)
        / 6.0
}

fn clamp_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    v.round().clamp(0.0, 255.0) as u8
}

/// Sample the Spectral ramp at `t` in [0, 1], as `rgb(r, g, b)`.
pub fn interpolate_spectral(t: f64) -> String {
    let [r, g, b] = [16, 8, 0].map(|shift| {
        let values: Vec<f64> = SPECTRAL.iter().map(|&c| channel(c, shift)).collect();
        clamp_channel(basis_spline(&values, t))
    });
    format!("rgb({r}, {g}, {b})")
}

/// Evenly spaced sample points for `n` nodes: `n - 1` points `i / (n - 1)`
/// in [0, 1). A single (or empty) node set gets the lone point 0.
pub fn sample_points(n: usize) -> Vec<f64> {
    if n <= 1 {
        return vec![0.0];
    }
    let count = n - 1;
    (0..count).map(|i| i as f64 / count as f64).collect()
}

/// Palette for `n` nodes.
pub fn palette(n: usize) -> Vec<String> {
    sample_points(n)
        .into_iter()
        .map(interpolate_spectral)
        .collect()
}

// ─── OrdinalScale ────────────────────────────────────────────────────────────

/// Discrete key → color mapping with an implicit domain.
///
/// A key seen for the first time is appended to the domain; the k-th domain
/// entry maps to `range[k % range.len()]`.
#[derive(Debug, Clone, Default)]
pub struct OrdinalScale {
    range: Vec<String>,
    domain: Vec<String>,
    index: HashMap<String, usize>,
}

impl OrdinalScale {
    pub fn new(range: Vec<String>) -> Self {
        Self {
            range,
            domain: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn slot(&self, k: usize) -> &str {
        if self.range.is_empty() {
            return NEUTRAL;
        }
        &self.range[k % self.range.len()]
    }

    /// Look up `key`, adding it to the domain if unseen.
    pub fn apply(&mut self, key: &str) -> &str {
        let k = match self.index.get(key) {
            Some(&k) => k,
            None => {
                let k = self.domain.len();
                self.domain.push(key.to_string());
                self.index.insert(key.to_string(), k);
                k
            }
        };
        self.slot(k)
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn range(&self) -> &[String] {
        &self.range
    }
}

// ─── ColorAssigner ───────────────────────────────────────────────────────────

/// Anything that can be colored by category.
pub trait ColorKey {
    fn name(&self) -> &str;
    fn category(&self) -> &str;

    /// The category, or the name when the category is empty.
    fn color_key(&self) -> &str {
        let category = self.category();
        if category.is_empty() {
            self.name()
        } else {
            category
        }
    }
}

impl ColorKey for Node {
    fn name(&self) -> &str {
        &self.name
    }

    fn category(&self) -> &str {
        &self.category
    }
}

impl ColorKey for LaidOutNode {
    fn name(&self) -> &str {
        &self.node.name
    }

    fn category(&self) -> &str {
        &self.node.category
    }
}

/// Deterministic node coloring for one render.
///
/// Lookups take `&mut self`: like the underlying scale, an unseen key is
/// appended to the domain on first use.
#[derive(Debug, Clone)]
pub struct ColorAssigner {
    scale: OrdinalScale,
}

impl ColorAssigner {
    /// Build the palette for `nodes` and seed the scale in node order.
    pub fn new<K: ColorKey>(nodes: &[K]) -> Self {
        let mut scale = OrdinalScale::new(palette(nodes.len()));
        for node in nodes {
            scale.apply(node.color_key());
        }
        tracing::debug!(
            palette = scale.range().len(),
            keys = scale.domain().len(),
            "seeded node colors"
        );
        Self { scale }
    }

    /// Color for `entity`. A key outside the seeded domain joins it, taking
    /// the next color in sequence.
    pub fn color(&mut self, entity: &impl ColorKey) -> &str {
        self.scale.apply(entity.color_key())
    }

    pub fn scale(&self) -> &OrdinalScale {
        &self.scale
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_color.rs"]
mod tests;
