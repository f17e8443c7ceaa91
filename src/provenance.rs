//! Cell-level provenance: where did an output value come from?
//!
//! Provenance is carried as lightweight identifiers, never as owning
//! references: a [`CellRef`] names a `(table id, row, col)` triple that is
//! resolved on demand through a [`crate::registry::Registry`]. This keeps
//! the provenance structure a DAG over identifiers and prevents a node from
//! retaining or cycling table lifetimes.
//!
//! The wire form of a cell reference is the datapoint identifier
//! `T<tableId>:<row>:<col>`, used to reference a cell from outside the core
//! (e.g. from a rendered hyperlink). Lineage is best-effort explanatory
//! metadata: every lookup in this module returns an `Option`, never an
//! error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the parts of a datapoint identifier.
const ID_SEPARATOR: char = ':';

/// Identifies a single cell of a single table by position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellRef {
    /// Identifier of the owning table.
    pub table: u32,
    /// Row index in the materialized snapshot.
    pub row: usize,
    /// Column position in the snapshot's preferred ordering.
    pub col: usize,
}

impl CellRef {
    pub fn new(table: u32, row: usize, col: usize) -> Self {
        Self { table, row, col }
    }

    /// Returns the textual datapoint identifier `T<tableId>:<row>:<col>`.
    pub fn datapoint_id(&self) -> String {
        format!(
            "T{}{sep}{}{sep}{}",
            self.table,
            self.row,
            self.col,
            sep = ID_SEPARATOR
        )
    }

    /// Parses a datapoint identifier back into a cell reference.
    ///
    /// Returns `None` when the string does not have exactly three
    /// colon-delimited parts, when any part fails to parse, or when the
    /// table id does not match `expected_table`.
    pub fn parse_datapoint_id(id: &str, expected_table: u32) -> Option<Self> {
        let parts: Vec<&str> = id.split(ID_SEPARATOR).collect();
        if parts.len() != 3 {
            return None;
        }
        let table: u32 = parts[0].trim().strip_prefix('T')?.parse().ok()?;
        if table != expected_table {
            return None;
        }
        let row: usize = parts[1].trim().parse().ok()?;
        let col: usize = parts[2].trim().parse().ok()?;
        Some(Self { table, row, col })
    }
}

impl fmt::Display for CellRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell ({},{}) in table #{}", self.row, self.col, self.table)
    }
}

/// The origin of a derived cell's value.
///
/// Absence of provenance ("no dependency") is expressed by `Option`: a cell
/// with no sensible origin, such as a synthesized label, simply carries
/// none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProvenanceNode {
    /// The value was copied or derived from exactly one source cell.
    Direct { cell: CellRef },

    /// The value aggregates many source cells (or other provenance nodes),
    /// e.g. a quartile over a whole column.
    Aggregate {
        /// Human-readable description of the aggregation.
        label: String,
        parts: Vec<ProvenanceNode>,
    },
}

impl ProvenanceNode {
    /// Shorthand for a direct link to one source cell.
    pub fn direct(table: u32, row: usize, col: usize) -> Self {
        Self::Direct {
            cell: CellRef::new(table, row, col),
        }
    }

    /// Builds an aggregate node over a list of cell references.
    pub fn aggregate(label: impl Into<String>, cells: Vec<CellRef>) -> Self {
        Self::Aggregate {
            label: label.into(),
            parts: cells
                .into_iter()
                .map(|cell| Self::Direct { cell })
                .collect(),
        }
    }

    /// Enumerates every cell reference reachable from this node.
    pub fn referenced_cells(&self) -> Vec<CellRef> {
        match self {
            Self::Direct { cell } => vec![*cell],
            Self::Aggregate { parts, .. } => {
                parts.iter().flat_map(|p| p.referenced_cells()).collect()
            }
        }
    }
}
