//! Column-level transformations: rename, removal, pivoting.

use crate::entry::Entry;
use crate::provenance::ProvenanceNode;
use crate::snapshot::TableSnapshot;

/// Replaces the column names of `input` 1:1, carrying the values
/// positionally. Every carried cell links directly back to its source
/// cell.
///
/// # Panics
///
/// Panics when the number of new names differs from the column count.
pub fn rename(input: &TableSnapshot, names: &[String]) -> TableSnapshot {
    assert_eq!(
        names.len(),
        input.column_count(),
        "rename expects one new name per column"
    );
    let mut out = TableSnapshot::new(input.id(), names.to_vec());
    for (row, entry) in input.rows().iter().enumerate() {
        let mut new_entry = Entry::new();
        for (col, old_name) in input.column_names().iter().enumerate() {
            if let Some(value) = entry.get(old_name) {
                new_entry.put(&names[col], value.clone());
                new_entry.set_provenance(&names[col], ProvenanceNode::direct(input.id(), row, col));
            }
        }
        out.push(new_entry);
    }
    out
}

/// Drops the named columns from `input`. Removing a name that is not a
/// column is a no-op for that name. Each surviving cell links directly to
/// the source cell at its old column position.
pub fn remove(input: &TableSnapshot, names: &[String]) -> TableSnapshot {
    // Pairs of (old position, column name) for the surviving columns.
    let kept: Vec<(usize, &String)> = input
        .column_names()
        .iter()
        .enumerate()
        .filter(|(_, name)| !names.contains(name))
        .collect();
    let ordering: Vec<String> = kept.iter().map(|(_, name)| (*name).clone()).collect();
    let mut out = TableSnapshot::new(input.id(), ordering);
    for (row, entry) in input.rows().iter().enumerate() {
        let mut new_entry = Entry::new();
        for &(old_col, name) in &kept {
            if let Some(value) = entry.get(name) {
                new_entry.put(name.clone(), value.clone());
                new_entry.set_provenance(
                    name.clone(),
                    ProvenanceNode::direct(input.id(), row, old_col),
                );
            }
        }
        out.push(new_entry);
    }
    out
}

/// Pivots `input`: for every row, the cell of the `header` column names a
/// new column that receives the cell of the `value` column. Rows agreeing
/// on every remaining column are merged into one output row.
pub fn expand_as_columns(input: &TableSnapshot, header: &str, value: &str) -> TableSnapshot {
    let base_columns: Vec<(usize, String)> = input
        .column_names()
        .iter()
        .enumerate()
        .filter(|(_, name)| name.as_str() != header && name.as_str() != value)
        .map(|(col, name)| (col, name.clone()))
        .collect();
    let value_col = input.column_position(value);

    let mut ordering: Vec<String> = base_columns.iter().map(|(_, n)| n.clone()).collect();
    let mut merged: Vec<Entry> = Vec::new();

    for (row, entry) in input.rows().iter().enumerate() {
        let mut base = Entry::new();
        for &(old_col, ref name) in &base_columns {
            if let Some(v) = entry.get(name) {
                base.put(name.clone(), v.clone());
                base.set_provenance(name.clone(), ProvenanceNode::direct(input.id(), row, old_col));
            }
        }
        let Some(new_column) = entry.get(header) else {
            merged.push(base);
            continue;
        };
        let new_column = new_column.to_string();
        let pivoted = entry.get(value).cloned();

        // Merge into an existing row that agrees on every base column and
        // does not yet hold the new column.
        let pos = merged.iter().position(|candidate| {
            !candidate.contains(&new_column)
                && base_columns
                    .iter()
                    .all(|(_, name)| candidate.get(name) == base.get(name))
        });
        let target = match pos {
            Some(i) => &mut merged[i],
            None => {
                merged.push(base);
                let last = merged.len() - 1;
                &mut merged[last]
            }
        };
        if let Some(v) = pivoted {
            target.put(new_column.clone(), v);
            if let Some(col) = value_col {
                target.set_provenance(
                    new_column.clone(),
                    ProvenanceNode::direct(input.id(), row, col),
                );
            }
        }
        if !ordering.contains(&new_column) {
            ordering.push(new_column);
        }
    }
    TableSnapshot::with_entries(input.id(), merged, ordering)
}
