//! Parser for Mermaid `sankey-beta` CSV flow syntax.
//!
//! ```text
//! sankey-beta
//! %% source,target,value
//! Agricultural 'waste',Bio-conversion,124.729
//! "Heat, water",Losses,10
//! ```

use crate::error::{SankeyError, SankeyResult};
use crate::syntax::types::{FlowData, FlowEdge};

use super::base::{Cursor, Parser};

/// Parser for `source,target,value` rows.
pub struct SankeyParser;

impl Parser for SankeyParser {
    fn parse(&self, src: &str) -> SankeyResult<FlowData> {
        let mut cursor = Cursor::new(src);
        cursor.try_parse_header();

        let mut data = FlowData::new();
        loop {
            cursor.skip_ws_and_newlines();
            if cursor.eof() {
                break;
            }
            let line = cursor.line;
            let fields = cursor
                .parse_row()
                .map_err(|message| SankeyError::Parse { line, message })?;
            data.edges.push(edge_from_fields(line, fields)?);
        }
        Ok(data)
    }
}

fn edge_from_fields(line: usize, fields: Vec<String>) -> SankeyResult<FlowEdge> {
    let parse_err = |message: String| SankeyError::Parse { line, message };

    let [source, target, value]: [String; 3] = fields.try_into().map_err(|f: Vec<String>| {
        parse_err(format!(
            "expected 3 fields (source,target,value), found {}",
            f.len()
        ))
    })?;
    if source.is_empty() {
        return Err(parse_err("empty source".to_string()));
    }
    if target.is_empty() {
        return Err(parse_err("empty target".to_string()));
    }
    let value: f64 = value
        .parse()
        .map_err(|_| parse_err(format!("invalid value '{value}'")))?;
    if !value.is_finite() || value < 0.0 {
        return Err(parse_err(format!(
            "value must be a finite non-negative number, got {value}"
        )));
    }
    Ok(FlowEdge::new(source, target, value))
}
