//! Normalization by column or row sums.
//!
//! Each numeric cell is replaced by its fraction of the sum over its
//! column (or row). Sums and divisions run over `f64`, so a zero sum
//! yields non-finite fractions rather than an error; they keep flowing
//! through the pipeline and still order deterministically.

use crate::entry::Entry;
use crate::provenance::{CellRef, ProvenanceNode};
use crate::snapshot::TableSnapshot;
use crate::value::CellValue;

/// Divides each numeric cell by the sum of the numeric cells of its
/// column. Output has one row per input row; non-numeric cells are carried
/// unchanged with a direct link to their source.
pub fn by_columns(input: &TableSnapshot) -> TableSnapshot {
    // (sum, contributing cells) per column position.
    let sums: Vec<(f64, Vec<CellRef>)> = input
        .column_names()
        .iter()
        .enumerate()
        .map(|(col, name)| {
            let mut sum = 0.0;
            let mut cells = Vec::new();
            for (row, entry) in input.rows().iter().enumerate() {
                if let Some(CellValue::Number(n)) = entry.get(name) {
                    sum += n;
                    cells.push(CellRef::new(input.id(), row, col));
                }
            }
            (sum, cells)
        })
        .collect();

    let mut out = TableSnapshot::new(input.id(), input.column_names().to_vec());
    for (row, entry) in input.rows().iter().enumerate() {
        let mut new_entry = Entry::new();
        for (col, name) in input.column_names().iter().enumerate() {
            let Some(value) = entry.get(name) else {
                continue;
            };
            match value {
                CellValue::Number(n) => {
                    let (sum, cells) = &sums[col];
                    new_entry.put(name.clone(), n / sum);
                    new_entry.set_provenance(
                        name.clone(),
                        ProvenanceNode::aggregate(
                            format!("normalization of column {name} in table #{}", input.id()),
                            cells.clone(),
                        ),
                    );
                }
                other => {
                    new_entry.put(name.clone(), other.clone());
                    new_entry.set_provenance(
                        name.clone(),
                        ProvenanceNode::direct(input.id(), row, col),
                    );
                }
            }
        }
        out.push(new_entry);
    }
    out
}

/// Divides each numeric cell by the sum of the numeric cells of its row.
pub fn by_rows(input: &TableSnapshot) -> TableSnapshot {
    let mut out = TableSnapshot::new(input.id(), input.column_names().to_vec());
    for (row, entry) in input.rows().iter().enumerate() {
        let mut sum = 0.0;
        let mut cells = Vec::new();
        for (col, name) in input.column_names().iter().enumerate() {
            if let Some(CellValue::Number(n)) = entry.get(name) {
                sum += n;
                cells.push(CellRef::new(input.id(), row, col));
            }
        }

        let mut new_entry = Entry::new();
        for (col, name) in input.column_names().iter().enumerate() {
            let Some(value) = entry.get(name) else {
                continue;
            };
            match value {
                CellValue::Number(n) => {
                    new_entry.put(name.clone(), n / sum);
                    new_entry.set_provenance(
                        name.clone(),
                        ProvenanceNode::aggregate(
                            format!("normalization of row {row} in table #{}", input.id()),
                            cells.clone(),
                        ),
                    );
                }
                other => {
                    new_entry.put(name.clone(), other.clone());
                    new_entry.set_provenance(
                        name.clone(),
                        ProvenanceNode::direct(input.id(), row, col),
                    );
                }
            }
        }
        out.push(new_entry);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(s: &TableSnapshot, row: usize, col: usize) -> f64 {
        match s.get(row, col).unwrap() {
            CellValue::Number(n) => n,
            other => panic!("expected a number, got {other:?}"),
        }
    }

    #[test]
    fn test_by_columns_fractions() {
        let columns = vec!["A".to_string(), "B".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("A", 1).with("B", 10));
        s.push(Entry::of("A", 3).with("B", 30));
        let out = by_columns(&s);
        assert_eq!(out.row_count(), 2);
        assert_eq!(number(&out, 0, 0), 0.25);
        assert_eq!(number(&out, 1, 0), 0.75);
        assert_eq!(number(&out, 0, 1), 0.25);
        assert_eq!(number(&out, 1, 1), 0.75);
    }

    #[test]
    fn test_by_rows_fractions() {
        let columns = vec!["A".to_string(), "B".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("A", 1).with("B", 3));
        let out = by_rows(&s);
        assert_eq!(number(&out, 0, 0), 0.25);
        assert_eq!(number(&out, 0, 1), 0.75);
    }

    #[test]
    fn test_text_cells_carried_unchanged() {
        let columns = vec!["name".to_string(), "v".to_string()];
        let mut s = TableSnapshot::new(2, columns);
        s.push(Entry::of("name", "a").with("v", 2));
        s.push(Entry::of("name", "b").with("v", 2));
        let out = by_columns(&s);
        assert_eq!(out.get(0, 0).unwrap(), CellValue::Text("a".into()));
        assert_eq!(number(&out, 0, 1), 0.5);
        // The text cell keeps a direct link, the fraction aggregates the
        // whole column.
        assert_eq!(
            out.dependency_of(0, 0).unwrap().referenced_cells(),
            vec![CellRef::new(2, 0, 0)]
        );
        assert_eq!(
            out.dependency_of(0, 1).unwrap().referenced_cells(),
            vec![CellRef::new(2, 0, 1), CellRef::new(2, 1, 1)]
        );
    }

    #[test]
    fn test_zero_sum_propagates_non_finite() {
        let columns = vec!["A".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("A", 0));
        s.push(Entry::of("A", 0));
        let out = by_columns(&s);
        assert!(number(&out, 0, 0).is_nan());
    }

    #[test]
    fn test_empty_table_yields_empty_table() {
        let s = TableSnapshot::new(1, vec!["A".to_string()]);
        let out = by_columns(&s);
        assert_eq!(out.row_count(), 0);
        assert_eq!(out.column_names(), ["A".to_string()]);
    }
}
