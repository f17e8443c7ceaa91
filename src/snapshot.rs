//! Materialized tables.
//!
//! A [`TableSnapshot`] is the rectangular, row-ordered, column-ordered
//! materialization of a logical table. It is the unit every transformation
//! consumes and produces, and the input of tree building and rendering.
//! Once constructed it is treated as immutable: "modifying" a snapshot
//! always means producing a new one.

use crate::entry::Entry;
use crate::error::{AccessError, AccessResult};
use crate::provenance::ProvenanceNode;
use crate::render::csv::CsvRenderer;
use crate::render::html::HtmlRenderer;
use crate::render::render;
use crate::tree::GroupTree;
use crate::value::CellValue;
use serde::Serialize;

/// An immutable, row/column-ordered materialization of a table.
///
/// Row position in the entry sequence is stable and is the row's identity
/// for provenance purposes.
#[derive(Debug, Clone, Serialize)]
pub struct TableSnapshot {
    id: u32,
    columns: Vec<String>,
    entries: Vec<Entry>,
    temporary: bool,
}

impl TableSnapshot {
    /// Creates an empty snapshot with the given column ordering.
    pub fn new(id: u32, columns: Vec<String>) -> Self {
        Self {
            id,
            columns,
            entries: Vec::new(),
            temporary: false,
        }
    }

    /// Creates a snapshot from existing rows and an explicit column
    /// ordering. Row indices are (re)assigned from the insertion order.
    pub fn with_entries(id: u32, entries: Vec<Entry>, columns: Vec<String>) -> Self {
        let mut snapshot = Self::new(id, columns);
        for entry in entries {
            snapshot.push(entry);
        }
        snapshot
    }

    /// Appends a row during construction, assigning its row index.
    pub fn push(&mut self, mut entry: Entry) {
        entry.set_row_index(self.entries.len());
        self.entries.push(entry);
    }

    /// The stable numeric identifier used in provenance triples.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// Marks the snapshot as temporary (an intermediate materialization).
    pub fn set_temporary(&mut self, temporary: bool) {
        self.temporary = temporary;
    }

    /// Whether the snapshot is an intermediate materialization.
    pub fn is_temporary(&self) -> bool {
        self.temporary
    }

    /// The preferred column ordering.
    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// The name of the column at a position, if in range.
    pub fn column_name(&self, col: usize) -> Option<&str> {
        self.columns.get(col).map(String::as_str)
    }

    /// The position of a named column, if present.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of columns in the preferred ordering.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// The rows of the snapshot, in order.
    pub fn rows(&self) -> &[Entry] {
        &self.entries
    }

    /// Gets the value of a cell.
    ///
    /// Indices past the table bounds are signaled as [`AccessError`]; a row
    /// that merely lacks the requested column yields [`CellValue::Empty`].
    pub fn get(&self, row: usize, col: usize) -> AccessResult<CellValue> {
        if row >= self.entries.len() {
            return Err(AccessError::RowOutOfRange {
                row,
                rows: self.entries.len(),
            });
        }
        if col >= self.columns.len() {
            return Err(AccessError::ColumnOutOfRange {
                col,
                cols: self.columns.len(),
            });
        }
        let key = &self.columns[col];
        Ok(self.entries[row].get(key).cloned().unwrap_or_default())
    }

    /// Gets the provenance of a cell, if any was recorded.
    ///
    /// Never errors: out-of-range coordinates and cells without lineage both
    /// yield `None`, since provenance is best-effort metadata.
    pub fn dependency_of(&self, row: usize, col: usize) -> Option<&ProvenanceNode> {
        let entry = self.entries.get(row)?;
        let key = self.columns.get(col)?;
        entry.provenance(key)
    }

    /// Determines whether a column holds at least one numeric value.
    pub fn is_column_numeric(&self, col: usize) -> bool {
        let Some(key) = self.columns.get(col) else {
            return false;
        };
        self.entries
            .iter()
            .filter_map(|e| e.get(key))
            .any(CellValue::is_numeric)
    }

    /// Finds a row holding the same cells as `probe`, comparing only the
    /// columns present in `probe`.
    pub fn find_entry(&self, probe: &Entry) -> Option<&Entry> {
        self.entries.iter().find(|candidate| {
            probe
                .iter()
                .all(|(col, value)| candidate.get(col) == Some(value))
        })
    }

    /// Creates a new snapshot keeping only the named columns, in the given
    /// order. Rows are carried with their provenance; the new snapshot keeps
    /// this snapshot's id.
    pub fn reordered(&self, columns: &[&str]) -> Self {
        let ordering: Vec<String> = columns.iter().map(|c| c.to_string()).collect();
        Self::with_entries(self.id, self.entries.clone(), ordering)
    }

    /// Builds the grouping tree for this snapshot using its preferred
    /// ordering.
    pub fn tree(&self) -> GroupTree {
        GroupTree::build(self, &self.default_ordering())
    }

    /// Builds the grouping tree using an explicit column ordering.
    pub fn tree_with(&self, ordering: &[String]) -> GroupTree {
        GroupTree::build(self, ordering)
    }

    /// The preferred ordering, or, when none was configured, the column
    /// enumeration order of an arbitrary row.
    pub fn default_ordering(&self) -> Vec<String> {
        if !self.columns.is_empty() {
            return self.columns.clone();
        }
        self.entries
            .first()
            .map(|e| e.columns().map(str::to_string).collect())
            .unwrap_or_default()
    }

    /// Renders the snapshot as CSV with the default separator and missing
    /// token. Rows come out in grouping-tree order, i.e. value-sorted at
    /// each grouping depth, not in insertion order.
    pub fn to_csv(&self) -> String {
        self.to_csv_with(",", "?")
    }

    /// Renders the snapshot as CSV with an explicit separator and
    /// missing-value token.
    pub fn to_csv_with(&self, separator: &str, missing: &str) -> String {
        let ordering = self.default_ordering();
        let tree = self.tree_with(&ordering);
        let mut renderer = CsvRenderer::new(separator, missing);
        render(&mut renderer, &tree, &ordering)
    }

    /// Renders the snapshot as an HTML table with row-span merging and
    /// per-cell explanation links.
    pub fn to_html(&self) -> String {
        let ordering = self.default_ordering();
        let tree = self.tree_with(&ordering);
        let mut renderer = HtmlRenderer::new(self.id);
        render(&mut renderer, &tree, &ordering)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn abc_snapshot() -> TableSnapshot {
        let columns = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("A", 2).with("B", 3).with("C", 6));
        s.push(Entry::of("A", 1).with("B", 3).with("C", 4));
        s
    }

    #[test]
    fn test_get_in_range() {
        let s = abc_snapshot();
        assert_eq!(s.get(0, 0).unwrap(), CellValue::Number(2.0));
        assert_eq!(s.get(1, 2).unwrap(), CellValue::Number(4.0));
    }

    #[test]
    fn test_get_out_of_range() {
        let s = abc_snapshot();
        assert_eq!(
            s.get(5, 0),
            Err(AccessError::RowOutOfRange { row: 5, rows: 2 })
        );
        assert_eq!(
            s.get(0, 9),
            Err(AccessError::ColumnOutOfRange { col: 9, cols: 3 })
        );
    }

    #[test]
    fn test_missing_column_yields_empty() {
        let columns = vec!["A".to_string(), "B".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("A", 1));
        assert_eq!(s.get(0, 1).unwrap(), CellValue::Empty);
    }

    #[test]
    fn test_row_indices_follow_insertion() {
        let s = abc_snapshot();
        assert_eq!(s.rows()[0].row_index(), 0);
        assert_eq!(s.rows()[1].row_index(), 1);
    }

    #[test]
    fn test_csv_rows_come_out_tree_sorted() {
        // Rows inserted as (2,3,6) then (1,3,4): the grouping tree sorts
        // siblings by value, so the CSV body starts with the 1 row.
        let s = abc_snapshot();
        let csv = s.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["A,B,C", "1,3,4", "2,3,6"]);
    }

    #[test]
    fn test_csv_mixed_text() {
        let columns = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("A", "foo").with("B", 0.0).with("C", 6));
        s.push(Entry::of("A", "foo").with("B", 0.1).with("C", 4));
        s.push(Entry::of("A", "foo").with("B", 0.2).with("C", 4));
        let csv = s.to_csv();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines, vec!["A,B,C", "foo,0,6", "foo,0.1,4", "foo,0.2,4"]);
    }

    #[test]
    fn test_find_entry_subset_match() {
        let s = abc_snapshot();
        let probe = Entry::of("A", 1).with("B", 3);
        let found = s.find_entry(&probe).unwrap();
        assert_eq!(found.get("C"), Some(&CellValue::Number(4.0)));
        assert!(s.find_entry(&Entry::of("A", 99)).is_none());
    }
}
