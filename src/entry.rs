//! Table rows.
//!
//! An [`Entry`] maps column names to cell values, with an optional
//! provenance node attached to each cell. Insertion order carries no
//! meaning; column position comes from the snapshot's preferred ordering.

use crate::provenance::ProvenanceNode;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of a table: a named mapping of column to [`CellValue`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Entry {
    values: HashMap<String, CellValue>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    provenance: HashMap<String, ProvenanceNode>,
    #[serde(skip)]
    row_index: usize,
}

impl Entry {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a row holding a single cell.
    pub fn of(column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        let mut e = Self::new();
        e.put(column, value);
        e
    }

    /// Sets the value of a cell. Replaces any previous value, and drops the
    /// provenance previously attached to that column.
    pub fn put(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        let column = column.into();
        self.provenance.remove(&column);
        self.values.insert(column, value.into());
    }

    /// Builder-style variant of [`Entry::put`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.put(column, value);
        self
    }

    /// Gets the value of a cell, if the column is present. Lookup is
    /// exact-match on the column name.
    pub fn get(&self, column: &str) -> Option<&CellValue> {
        self.values.get(column)
    }

    /// Returns `true` if the row has a value for the column.
    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Number of cells in this row.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if the row holds no cells.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(column, value)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Column names present in this row, in no particular order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Attaches a provenance node to one cell of this row.
    pub fn set_provenance(&mut self, column: impl Into<String>, node: ProvenanceNode) {
        self.provenance.insert(column.into(), node);
    }

    /// Gets the provenance attached to a cell, if any.
    pub fn provenance(&self, column: &str) -> Option<&ProvenanceNode> {
        self.provenance.get(column)
    }

    /// The position of this row within its snapshot. Row position is the
    /// row's identity for provenance purposes.
    pub fn row_index(&self) -> usize {
        self.row_index
    }

    pub(crate) fn set_row_index(&mut self, index: usize) {
        self.row_index = index;
    }
}

/// Two rows are equal when they hold the same cells; provenance and row
/// position do not take part in the comparison.
impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provenance::ProvenanceNode;

    #[test]
    fn test_put_and_get() {
        let mut e = Entry::of("A", 2);
        e.put("B", "foo");
        assert_eq!(e.get("A"), Some(&CellValue::Number(2.0)));
        assert_eq!(e.get("B"), Some(&CellValue::Text("foo".into())));
        assert_eq!(e.get("C"), None);
        assert_eq!(e.len(), 2);
    }

    #[test]
    fn test_copy_preserves_provenance() {
        let mut e = Entry::of("A", 1);
        e.set_provenance("A", ProvenanceNode::direct(3, 0, 0));
        let copy = e.clone();
        assert_eq!(copy.provenance("A"), Some(&ProvenanceNode::direct(3, 0, 0)));
    }

    #[test]
    fn test_put_drops_stale_provenance() {
        let mut e = Entry::of("A", 1);
        e.set_provenance("A", ProvenanceNode::direct(3, 0, 0));
        e.put("A", 2);
        assert_eq!(e.provenance("A"), None);
    }
}
