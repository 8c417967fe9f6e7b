//! Parser entry point: flow tables with an optional `sankey-beta` header.

pub mod base;
pub mod sankey;

pub use base::Parser;

use crate::error::SankeyResult;
use crate::syntax::types::FlowData;
use sankey::SankeyParser;

/// Parse a flow dataset from source text.
pub fn parse(src: &str) -> SankeyResult<FlowData> {
    SankeyParser.parse(src)
}
