//! Number formatting.

use crate::entry::Entry;
use crate::provenance::ProvenanceNode;
use crate::snapshot::TableSnapshot;
use crate::value::CellValue;
use std::collections::HashMap;

/// Rounds every numeric cell to a fixed number of decimals, with optional
/// per-column overrides. The formatted text is re-parsed, so a formatted
/// number stays a number. Non-numeric cells are carried unchanged; every
/// cell links directly to its source.
pub fn format_numbers(
    input: &TableSnapshot,
    decimals: u8,
    columns: &HashMap<String, u8>,
) -> TableSnapshot {
    let mut out = TableSnapshot::new(input.id(), input.column_names().to_vec());
    for (row, entry) in input.rows().iter().enumerate() {
        let mut new_entry = Entry::new();
        for (col, name) in input.column_names().iter().enumerate() {
            let Some(value) = entry.get(name) else {
                continue;
            };
            let formatted = match value {
                CellValue::Number(n) => {
                    let places = columns.get(name).copied().unwrap_or(decimals);
                    CellValue::parse(&format!("{:.*}", places as usize, n))
                }
                other => other.clone(),
            };
            new_entry.put(name.clone(), formatted);
            new_entry.set_provenance(name.clone(), ProvenanceNode::direct(input.id(), row, col));
        }
        out.push(new_entry);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounds_to_global_decimals() {
        let mut s = TableSnapshot::new(1, vec!["A".to_string()]);
        s.push(Entry::of("A", 1.23456));
        let out = format_numbers(&s, 2, &HashMap::new());
        assert_eq!(out.get(0, 0).unwrap(), CellValue::Number(1.23));
    }

    #[test]
    fn test_per_column_override() {
        let columns = vec!["A".to_string(), "B".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("A", 1.23456).with("B", 1.23456));
        let overrides = HashMap::from([("B".to_string(), 4)]);
        let out = format_numbers(&s, 1, &overrides);
        assert_eq!(out.get(0, 0).unwrap(), CellValue::Number(1.2));
        assert_eq!(out.get(0, 1).unwrap(), CellValue::Number(1.2346));
    }

    #[test]
    fn test_text_cells_untouched() {
        let mut s = TableSnapshot::new(1, vec!["A".to_string()]);
        s.push(Entry::of("A", "foo"));
        let out = format_numbers(&s, 2, &HashMap::new());
        assert_eq!(out.get(0, 0).unwrap(), CellValue::Text("foo".into()));
    }

    #[test]
    fn test_formatted_cell_stays_numeric() {
        let mut s = TableSnapshot::new(1, vec!["A".to_string()]);
        s.push(Entry::of("A", 10));
        let out = format_numbers(&s, 0, &HashMap::new());
        assert!(out.get(0, 0).unwrap().is_numeric());
    }
}
