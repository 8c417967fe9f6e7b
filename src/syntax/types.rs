/// Input data structures for Sankey flow datasets.
///
/// These types represent the parsed form of the input: one `FlowEdge` per
/// `source,target,value` row, collected into a `FlowData` together with the
/// optional units suffix used when formatting values.

// ─── FlowEdge ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct FlowEdge {
    /// Name of the node the flow leaves.
    pub source: String,
    /// Name of the node the flow enters.
    pub target: String,
    /// Flow magnitude.
    pub value: f64,
}

impl FlowEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>, value: f64) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            value,
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

// ─── FlowData (top-level dataset) ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlowData {
    pub edges: Vec<FlowEdge>,
    /// Units appended to every formatted value (e.g. "TWh").
    pub units: Option<String>,
}

impl FlowData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges(edges: Vec<FlowEdge>) -> Self {
        Self { edges, units: None }
    }

    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
