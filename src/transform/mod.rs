//! Table transformations.
//!
//! A [`Transformation`] is a pure, deterministic function from one or more
//! snapshots to a new snapshot. Each kind propagates provenance: every
//! output cell whose value was derived from input cells carries a
//! [`crate::provenance::ProvenanceNode`] (cells with no sensible origin,
//! such as a synthesized label, carry none).
//!
//! Transformations are a closed, serde-tagged enum, so a whole pipeline is
//! describable as a JSON document:
//!
//! ```json
//! { "type": "compose", "steps": [
//!   { "type": "remove_columns", "names": ["raw"] },
//!   { "type": "sort_rows" }
//! ] }
//! ```
//!
//! Failure policy: malformed but well-typed data never errors (degenerate
//! sums propagate non-finite numbers). Programmer errors such as a wrong
//! input arity, a rename with the wrong number of names, or an empty
//! composition are contract violations and panic.

pub mod columns;
pub mod format;
pub mod normalize;
pub mod sort;
pub mod stats;

pub use sort::compare_entries;
pub use stats::BoxCaptions;

use crate::snapshot::TableSnapshot;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A composable transformation over table snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Transformation {
    /// Replaces the column names 1:1, keeping row count and order.
    Rename { names: Vec<String> },

    /// Drops the named columns; absent names are ignored.
    RemoveColumns { names: Vec<String> },

    /// Pivots the table: each distinct value of the `header` column becomes
    /// a new column holding the corresponding `value` cell; rows agreeing
    /// on every other column are merged.
    ExpandAsColumns { header: String, value: String },

    /// Replaces each numeric cell by its fraction of the column's sum.
    NormalizeColumns,

    /// Replaces each numeric cell by its fraction of the row's sum.
    NormalizeRows,

    /// Stable sort of the rows, comparing column by column in the preferred
    /// ordering; a missing key sorts after a present one.
    SortRows,

    /// Summarizes each column into one Min/Q1/Q2/Q3/Max row.
    BoxStats {
        #[serde(default)]
        captions: BoxCaptions,
    },

    /// Formats every numeric cell to a fixed number of decimals, globally
    /// or per named column with `decimals` as the fallback.
    FormatNumbers {
        decimals: u8,
        #[serde(default)]
        columns: HashMap<String, u8>,
    },

    /// Applies transformations in sequence, feeding each step's output as
    /// the next step's sole input.
    Compose { steps: Vec<Transformation> },
}

impl Transformation {
    /// Applies the transformation to its input snapshots and returns a new
    /// snapshot. Inputs are never mutated.
    ///
    /// # Panics
    ///
    /// Panics on contract violations: no input supplied, a rename whose
    /// name count differs from the column count, or an empty composition.
    pub fn transform(&self, inputs: &[TableSnapshot]) -> TableSnapshot {
        match self {
            Self::Rename { names } => columns::rename(first(inputs), names),
            Self::RemoveColumns { names } => columns::remove(first(inputs), names),
            Self::ExpandAsColumns { header, value } => {
                columns::expand_as_columns(first(inputs), header, value)
            }
            Self::NormalizeColumns => normalize::by_columns(first(inputs)),
            Self::NormalizeRows => normalize::by_rows(first(inputs)),
            Self::SortRows => sort::sort_rows(first(inputs)),
            Self::BoxStats { captions } => stats::box_stats(first(inputs), captions),
            Self::FormatNumbers { decimals, columns } => {
                format::format_numbers(first(inputs), *decimals, columns)
            }
            Self::Compose { steps } => {
                assert!(!steps.is_empty(), "composition requires at least one step");
                let mut current = steps[0].transform(inputs);
                for step in &steps[1..] {
                    current = step.transform(std::slice::from_ref(&current));
                }
                current
            }
        }
    }

    /// Chains `next` after this transformation, flattening nested
    /// compositions.
    pub fn then(self, next: Transformation) -> Transformation {
        match self {
            Self::Compose { mut steps } => {
                steps.push(next);
                Self::Compose { steps }
            }
            other => Self::Compose {
                steps: vec![other, next],
            },
        }
    }
}

fn first(inputs: &[TableSnapshot]) -> &TableSnapshot {
    inputs
        .first()
        .expect("transformation requires at least one input table")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::Entry;
    use crate::value::CellValue;

    fn sample() -> TableSnapshot {
        let columns = vec!["A".to_string(), "B".to_string()];
        let mut s = TableSnapshot::new(1, columns);
        s.push(Entry::of("A", 3).with("B", "x"));
        s.push(Entry::of("A", 1).with("B", "y"));
        s
    }

    fn cells(s: &TableSnapshot) -> Vec<Vec<CellValue>> {
        (0..s.row_count())
            .map(|r| {
                (0..s.column_count())
                    .map(|c| s.get(r, c).unwrap())
                    .collect()
            })
            .collect()
    }

    #[test]
    fn test_composition_law() {
        // Compose(f, g).transform(t) == g.transform(f.transform(t))
        let f = Transformation::RemoveColumns {
            names: vec!["B".to_string()],
        };
        let g = Transformation::SortRows;
        let t = sample();

        let composed = f.clone().then(g.clone()).transform(&[t.clone()]);
        let stepwise = g.transform(&[f.transform(&[t])]);
        assert_eq!(composed.column_names(), stepwise.column_names());
        assert_eq!(cells(&composed), cells(&stepwise));
    }

    #[test]
    fn test_then_flattens() {
        let pipeline = Transformation::SortRows
            .then(Transformation::NormalizeRows)
            .then(Transformation::NormalizeColumns);
        match pipeline {
            Transformation::Compose { steps } => assert_eq!(steps.len(), 3),
            other => panic!("expected a composition, got {other:?}"),
        }
    }

    #[test]
    #[should_panic(expected = "at least one step")]
    fn test_empty_composition_panics() {
        let t = Transformation::Compose { steps: vec![] };
        t.transform(&[sample()]);
    }

    #[test]
    #[should_panic(expected = "at least one input table")]
    fn test_missing_input_panics() {
        Transformation::SortRows.transform(&[]);
    }

    #[test]
    fn test_pipeline_from_json() {
        let json = r#"{
            "type": "compose",
            "steps": [
                { "type": "remove_columns", "names": ["B"] },
                { "type": "sort_rows" }
            ]
        }"#;
        let pipeline: Transformation = serde_json::from_str(json).unwrap();
        let out = pipeline.transform(&[sample()]);
        assert_eq!(out.column_names(), ["A".to_string()]);
        assert_eq!(out.get(0, 0).unwrap(), CellValue::Number(1.0));
        assert_eq!(out.get(1, 0).unwrap(), CellValue::Number(3.0));
    }

    #[test]
    fn test_pipeline_json_round_trip() {
        let pipeline = Transformation::Rename {
            names: vec!["x".to_string(), "y".to_string()],
        }
        .then(Transformation::BoxStats {
            captions: BoxCaptions::default(),
        });
        let json = serde_json::to_string(&pipeline).unwrap();
        let back: Transformation = serde_json::from_str(&json).unwrap();
        match back {
            Transformation::Compose { steps } => assert_eq!(steps.len(), 2),
            other => panic!("expected a composition, got {other:?}"),
        }
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let t = sample();
        let before = cells(&t);
        let _ = Transformation::SortRows.transform(&[t.clone()]);
        assert_eq!(cells(&t), before);
    }
}
