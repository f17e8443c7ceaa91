//! Row sorting.

use crate::entry::Entry;
use crate::provenance::ProvenanceNode;
use crate::snapshot::TableSnapshot;
use std::cmp::Ordering;

/// Compares two rows column by column in the given ordering.
///
/// A column both rows lack is skipped; a row missing a column the other
/// holds sorts after it. Equal values do not decide the comparison: the
/// next column in the ordering is consulted, so ties in an early column
/// fall through to later ones.
pub fn compare_entries(a: &Entry, b: &Entry, ordering: &[String]) -> Ordering {
    for column in ordering {
        match (a.get(column), b.get(column)) {
            (None, None) => continue,
            (None, Some(_)) => return Ordering::Greater,
            (Some(_), None) => return Ordering::Less,
            (Some(va), Some(vb)) => match va.cmp(vb) {
                Ordering::Equal => continue,
                decided => return decided,
            },
        }
    }
    Ordering::Equal
}

/// Stable sort of the rows by [`compare_entries`] over the preferred
/// ordering. Each cell of the output links directly to the same cell at
/// the row's pre-sort position.
pub fn sort_rows(input: &TableSnapshot) -> TableSnapshot {
    let ordering = input.column_names().to_vec();
    let mut indexed: Vec<(usize, &Entry)> = input.rows().iter().enumerate().collect();
    indexed.sort_by(|(_, a), (_, b)| compare_entries(a, b, &ordering));

    let mut out = TableSnapshot::new(input.id(), ordering);
    for (orig_row, entry) in indexed {
        let mut new_entry = Entry::new();
        for (col, name) in input.column_names().iter().enumerate() {
            if let Some(value) = entry.get(name) {
                new_entry.put(name.clone(), value.clone());
                new_entry.set_provenance(
                    name.clone(),
                    ProvenanceNode::direct(input.id(), orig_row, col),
                );
            }
        }
        out.push(new_entry);
    }
    out
}
