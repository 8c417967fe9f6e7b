//! Node alignment strategies: which column each node lands in.

use std::fmt;
use std::str::FromStr;

use crate::error::SankeyError;

/// Topology facts an alignment strategy needs about one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlignInput {
    pub depth: usize,
    pub height: usize,
    pub has_incoming: bool,
    /// Smallest depth among the node's targets; None when it has no outgoing links.
    pub min_target_depth: Option<usize>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Column = depth.
    Left,
    /// Column = last column minus height.
    Right,
    /// Sources sit one column before their nearest target.
    Center,
    /// Like `Left`, but sinks are pushed to the last column.
    #[default]
    Justify,
}

impl Alignment {
    pub const ALL: [Alignment; 4] = [
        Alignment::Left,
        Alignment::Right,
        Alignment::Center,
        Alignment::Justify,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Right => "right",
            Alignment::Center => "center",
            Alignment::Justify => "justify",
        }
    }

    /// Column index for a node in a layout with `columns` columns, clamped
    /// into `0..columns`.
    pub fn column(&self, node: AlignInput, columns: usize) -> usize {
        let last = columns.saturating_sub(1) as isize;
        let raw: isize = match self {
            Alignment::Left => node.depth as isize,
            Alignment::Right => last - node.height as isize,
            Alignment::Justify => match node.min_target_depth {
                Some(_) => node.depth as isize,
                None => last,
            },
            Alignment::Center => {
                if node.has_incoming {
                    node.depth as isize
                } else {
                    match node.min_target_depth {
                        Some(d) => d as isize - 1,
                        None => 0,
                    }
                }
            }
        };
        raw.clamp(0, last.max(0)) as usize
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Alignment {
    type Err = SankeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(Alignment::Left),
            "right" => Ok(Alignment::Right),
            "center" | "centre" => Ok(Alignment::Center),
            "justify" => Ok(Alignment::Justify),
            _ => Err(SankeyError::Lookup {
                kind: "alignment",
                name: s.to_string(),
                expected: "left, right, center, justify",
            }),
        }
    }
}
