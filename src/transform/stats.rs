//! Box-plot statistics.
//!
//! Summarizes each column of the input into one row holding the minimum,
//! the three quartiles and the maximum of the column's numeric values.

use crate::entry::Entry;
use crate::provenance::{CellRef, ProvenanceNode};
use crate::snapshot::TableSnapshot;
use crate::value::CellValue;
use serde::{Deserialize, Serialize};

/// Column captions of the summary table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxCaptions {
    pub x: String,
    pub min: String,
    pub q1: String,
    pub q2: String,
    pub q3: String,
    pub max: String,
    pub label: String,
}

impl Default for BoxCaptions {
    fn default() -> Self {
        Self {
            x: "x".to_string(),
            min: "Min".to_string(),
            q1: "Q1".to_string(),
            q2: "Q2".to_string(),
            q3: "Q3".to_string(),
            max: "Max".to_string(),
            label: "Label".to_string(),
        }
    }
}

impl BoxCaptions {
    /// Captions with every statistic column prefixed, e.g. for merging
    /// several summaries side by side.
    pub fn prefixed(x: impl Into<String>, prefix: &str) -> Self {
        Self {
            x: x.into(),
            min: format!("{prefix}Min"),
            q1: format!("{prefix}Q1"),
            q2: format!("{prefix}Q2"),
            q3: format!("{prefix}Q3"),
            max: format!("{prefix}Max"),
            label: format!("{prefix}Label"),
        }
    }

    fn ordering(&self) -> Vec<String> {
        vec![
            self.x.clone(),
            self.min.clone(),
            self.q1.clone(),
            self.q2.clone(),
            self.q3.clone(),
            self.max.clone(),
            self.label.clone(),
        ]
    }
}

/// Index of the q-th quantile in a sorted sample of n values.
///
/// The position is truncated, then shifted down by one and clamped at
/// zero, so small samples lean toward the lower value.
fn quantile_index(n: usize, q: f64) -> usize {
    ((n as f64 * q) as usize).saturating_sub(1)
}

/// Builds the per-column summary table.
///
/// Each output row holds the source column's position (`x`), its five
/// statistics, and its name as a label. The statistic cells aggregate
/// every numeric cell of the source column. A column with no numeric
/// value at all stops the scan: the rows accumulated so far are returned
/// as-is.
pub fn box_stats(input: &TableSnapshot, captions: &BoxCaptions) -> TableSnapshot {
    let mut out = TableSnapshot::new(input.id(), captions.ordering());
    for (col, name) in input.column_names().iter().enumerate() {
        let mut values: Vec<f64> = Vec::new();
        let mut cells: Vec<CellRef> = Vec::new();
        for (row, entry) in input.rows().iter().enumerate() {
            if let Some(CellValue::Number(n)) = entry.get(name) {
                values.push(*n);
                cells.push(CellRef::new(input.id(), row, col));
            }
        }
        if values.is_empty() {
            return out;
        }
        values.sort_by(f64::total_cmp);
        let n = values.len();

        let stats = [
            (&captions.min, values[0], "minimum value"),
            (&captions.q1, values[quantile_index(n, 0.25)], "first quartile"),
            (&captions.q2, values[quantile_index(n, 0.5)], "median"),
            (&captions.q3, values[quantile_index(n, 0.75)], "third quartile"),
            (&captions.max, values[n - 1], "maximum value"),
        ];

        let mut entry = Entry::of(captions.x.clone(), col as i64);
        for &(caption, value, what) in &stats {
            entry.put(caption.clone(), value);
            entry.set_provenance(
                caption.clone(),
                ProvenanceNode::aggregate(
                    format!("{what} of column {name} in table #{}", input.id()),
                    cells.clone(),
                ),
            );
        }
        // Column names that look numeric become numbers, like any parsed
        // cell.
        entry.put(captions.label.clone(), name.as_str());
        out.push(entry);
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

    fn single_column(values: &[i64]) -> TableSnapshot {
        let mut s = TableSnapshot::new(1, vec!["A".to_string()]);
        for &v in values {
            s.push(Entry::of("A", v));
        }
        s
    }

    #[test]
    fn test_quartiles_of_four_values() {
        let out = box_stats(&single_column(&[0, 1, 2, 3]), &BoxCaptions::default());
        assert_eq!(out.row_count(), 1);
        assert_eq!(number(&out, 0, 0), 0.0); // x
        assert_eq!(number(&out, 0, 1), 0.0); // Min
        assert_eq!(number(&out, 0, 2), 0.0); // Q1
        assert_eq!(number(&out, 0, 3), 1.0); // Q2
        assert_eq!(number(&out, 0, 4), 2.0); // Q3
        assert_eq!(number(&out, 0, 5), 3.0); // Max
        assert_eq!(out.get(0, 6).unwrap(), CellValue::Text("A".into()));
    }

    #[test]
    fn test_single_value_column() {
        let out = box_stats(&single_column(&[7]), &BoxCaptions::default());
        for col in 1..=5 {
            assert_eq!(number(&out, 0, col), 7.0);
        }
    }

    #[test]
    fn test_non_numeric_column_stops_the_scan() {
        let columns = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("A", 1).with("B", "only text").with("C", 2));
        s.push(Entry::of("A", 3).with("B", "still text").with("C", 4));
        let out = box_stats(&s, &BoxCaptions::default());
        // Column A was summarized, then B stopped the scan before C.
        assert_eq!(out.row_count(), 1);
        assert_eq!(out.get(0, 6).unwrap(), CellValue::Text("A".into()));
    }

    #[test]
    fn test_statistics_aggregate_whole_column() {
        let out = box_stats(&single_column(&[5, 2, 9]), &BoxCaptions::default());
        let cells = out.dependency_of(0, 1).unwrap().referenced_cells();
        assert_eq!(
            cells,
            vec![
                CellRef::new(1, 0, 0),
                CellRef::new(1, 1, 0),
                CellRef::new(1, 2, 0)
            ]
        );
        // The synthesized x and label cells carry no lineage.
        assert!(out.dependency_of(0, 0).is_none());
        assert!(out.dependency_of(0, 6).is_none());
    }

    #[test]
    fn test_prefixed_captions() {
        let captions = BoxCaptions::prefixed("step", "t1.");
        assert_eq!(captions.x, "step");
        assert_eq!(captions.q2, "t1.Q2");
        let out = box_stats(&single_column(&[1, 2]), &captions);
        assert_eq!(out.column_names()[3], "t1.Q2");
    }
}
