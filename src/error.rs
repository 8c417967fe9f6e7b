//! Error types for the parse → layout → render pipeline.
//!
//! Every failure is fatal for the render call that produced it; nothing is
//! drawn when any stage fails.

use thiserror::Error;

pub type SankeyResult<T> = Result<T, SankeyError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SankeyError {
    /// Malformed flow input.
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A configuration name (alignment, edge color mode) that is not recognised.
    #[error("unknown {kind} '{name}'; expected one of {expected}")]
    Lookup {
        kind: &'static str,
        name: String,
        expected: &'static str,
    },

    /// A link endpoint that does not resolve to any node.
    #[error("link {link} references missing node '{name}'")]
    Reference { link: usize, name: String },

    /// The layout engine could not lay out the graph.
    #[error("layout failed: {0}")]
    Layout(#[from] LayoutError),
}

/// Failures raised by a layout engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("circular link through node '{node}'")]
    CircularLink { node: String },

    #[error("degenerate vertical scale ({ky}); flows must be non-zero and the extent must have height")]
    DegenerateScale { ky: f64 },
}
