//! Table registry and datapoint resolution.
//!
//! The [`Registry`] owns the tables of a report and resolves provenance
//! identifiers against them. Because provenance is carried as `(table id,
//! row, col)` triples rather than references, a cell in one table can
//! point into any registered table, and the registry is the only place
//! where the triple turns back into a value.
//!
//! Resolution is best-effort: an unknown table, an out-of-range cell or a
//! malformed identifier all yield `None`.

use crate::provenance::{CellRef, ProvenanceNode};
use crate::table::Table;
use crate::value::CellValue;
use std::collections::{HashMap, HashSet};

/// Owns tables and resolves datapoint identifiers against them.
#[derive(Debug, Default)]
pub struct Registry {
    tables: HashMap<u32, Table>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a table under its own id and returns that id.
    pub fn register(&mut self, table: Table) -> u32 {
        let id = table.id();
        self.tables.insert(id, table);
        id
    }

    /// Looks up a registered table.
    pub fn get(&self, id: u32) -> Option<&Table> {
        self.tables.get(&id)
    }

    /// Number of registered tables.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Parses a datapoint identifier (`T<tableId>:<row>:<col>`) into a
    /// cell reference, provided the table it names is registered.
    pub fn resolve(&self, datapoint_id: &str) -> Option<CellRef> {
        let table_part = datapoint_id.split(':').next()?;
        let table: u32 = table_part.trim().strip_prefix('T')?.parse().ok()?;
        if !self.tables.contains_key(&table) {
            return None;
        }
        CellRef::parse_datapoint_id(datapoint_id, table)
    }

    /// The value currently held by a referenced cell.
    pub fn value_of(&self, cell: CellRef) -> Option<CellValue> {
        let table = self.tables.get(&cell.table)?;
        table.snapshot(true).get(cell.row, cell.col).ok()
    }

    /// The provenance recorded for a referenced cell, if any.
    pub fn dependency_of(&self, cell: CellRef) -> Option<ProvenanceNode> {
        let table = self.tables.get(&cell.table)?;
        table.dependency_of(cell.row, cell.col)
    }

    /// Traces a cell back to its root sources: the referenced cells that
    /// themselves record no further provenance.
    ///
    /// Follows provenance transitively across registered tables; a cell in
    /// an unregistered table is treated as a root. Each root appears once,
    /// in discovery order.
    pub fn lineage(&self, cell: CellRef) -> Vec<CellRef> {
        let mut roots = Vec::new();
        let mut seen = HashSet::new();
        self.trace(cell, &mut seen, &mut roots);
        roots
    }

    fn trace(&self, cell: CellRef, seen: &mut HashSet<CellRef>, roots: &mut Vec<CellRef>) {
        if !seen.insert(cell) {
            return;
        }
        match self.dependency_of(cell) {
            Some(node) => {
                for source in node.referenced_cells() {
                    self.trace(source, seen, roots);
                }
            }
            None => roots.push(cell),
        }
    }
}
