//! Logical tables.
//!
//! A [`Table`] is the durable, identified object of the engine. Its kind
//! decides where its rows come from:
//!
//! - [`TableKind::Stored`] holds rows directly,
//! - [`TableKind::Transformed`] derives its rows on demand by running a
//!   transformation over input tables,
//! - [`TableKind::Frequency`] accumulates (x, y) observations into a 2D
//!   histogram.
//!
//! Whatever the kind, [`Table::snapshot`] yields the materialized rows as
//! a [`TableSnapshot`], and that snapshot carries the table's id so
//! provenance triples stay resolvable.

use crate::entry::Entry;
use crate::error::{TableError, TableResult};
use crate::provenance::ProvenanceNode;
use crate::snapshot::TableSnapshot;
use crate::transform::Transformation;
use crate::value::CellValue;
use std::sync::atomic::{AtomicU32, Ordering};

static NEXT_TABLE_ID: AtomicU32 = AtomicU32::new(1);

/// Hands out the next process-wide table identifier.
pub fn next_table_id() -> u32 {
    NEXT_TABLE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Resets the identifier counter back to 1.
///
/// Only meaningful at the start of a fresh batch (or a test); ids handed
/// out before the reset will be reused.
pub fn reset_id_counter() {
    NEXT_TABLE_ID.store(1, Ordering::Relaxed);
}

/// Where a table's rows come from.
#[derive(Debug, Clone)]
pub enum TableKind {
    /// Rows held directly, in insertion order.
    Stored {
        entries: Vec<Entry>,
        ordering: Vec<String>,
    },
    /// Rows derived on demand from input tables.
    Transformed {
        transformation: Transformation,
        inputs: Vec<Table>,
    },
    /// Rows accumulated as a two-dimensional histogram.
    Frequency(FrequencyAccumulator),
}

impl TableKind {
    fn name(&self) -> &'static str {
        match self {
            Self::Stored { .. } => "stored",
            Self::Transformed { .. } => "transformed",
            Self::Frequency(_) => "frequency",
        }
    }
}

/// An identified, titled table of one of the three kinds.
#[derive(Debug, Clone)]
pub struct Table {
    id: u32,
    title: String,
    kind: TableKind,
}

impl Table {
    /// Creates an empty stored table with the given column ordering.
    pub fn stored(ordering: Vec<String>) -> Self {
        let id = next_table_id();
        Self {
            id,
            title: format!("Table {id}"),
            kind: TableKind::Stored {
                entries: Vec::new(),
                ordering,
            },
        }
    }

    /// Creates a stored table from existing rows.
    pub fn from_entries(entries: Vec<Entry>, ordering: Vec<String>) -> Self {
        let mut table = Self::stored(ordering);
        if let TableKind::Stored { entries: rows, .. } = &mut table.kind {
            *rows = entries;
        }
        table
    }

    /// Creates a table whose rows are computed by running `transformation`
    /// over the snapshots of `inputs`.
    pub fn transformed(transformation: Transformation, inputs: Vec<Table>) -> Self {
        let id = next_table_id();
        Self {
            id,
            title: format!("Table {id}"),
            kind: TableKind::Transformed {
                transformation,
                inputs,
            },
        }
    }

    /// Creates a frequency table over the given accumulator.
    pub fn frequency(accumulator: FrequencyAccumulator) -> Self {
        let id = next_table_id();
        Self {
            id,
            title: format!("Table {id}"),
            kind: TableKind::Frequency(accumulator),
        }
    }

    /// The table's stable numeric identifier.
    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The table's kind.
    pub fn kind(&self) -> &TableKind {
        &self.kind
    }

    /// Appends a row. Only stored tables accept rows.
    pub fn add(&mut self, entry: Entry) -> TableResult<()> {
        match &mut self.kind {
            TableKind::Stored { entries, .. } => {
                entries.push(entry);
                Ok(())
            }
            other => Err(TableError::Unsupported {
                operation: "add",
                kind: other.name(),
            }),
        }
    }

    /// Appends several rows. Only stored tables accept rows.
    pub fn add_all(&mut self, rows: impl IntoIterator<Item = Entry>) -> TableResult<()> {
        for entry in rows {
            self.add(entry)?;
        }
        Ok(())
    }

    /// Records an (x, y) observation. Only frequency tables accept
    /// observations.
    pub fn record(&mut self, x: f64, y: f64) -> TableResult<()> {
        match &mut self.kind {
            TableKind::Frequency(acc) => {
                acc.add(x, y);
                Ok(())
            }
            other => Err(TableError::Unsupported {
                operation: "record",
                kind: other.name(),
            }),
        }
    }

    /// Clones a stored table's rows into a new stored table with a fresh
    /// id. Derived tables cannot be duplicated, since their rows belong to
    /// their inputs.
    pub fn duplicate(&self) -> TableResult<Table> {
        match &self.kind {
            TableKind::Stored { entries, ordering } => Ok(Self::from_entries(
                entries.clone(),
                ordering.clone(),
            )),
            other => Err(TableError::Unsupported {
                operation: "duplicate",
                kind: other.name(),
            }),
        }
    }

    /// Materializes the table's rows.
    ///
    /// Stored tables snapshot their rows directly. A transformed table
    /// snapshots each input (as temporary), runs its transformation, and
    /// re-tags the result with its own id so the snapshot's cells are
    /// addressable under this table. A frequency table renders its bucket
    /// grid.
    pub fn snapshot(&self, temporary: bool) -> TableSnapshot {
        let mut snapshot = match &self.kind {
            TableKind::Stored { entries, ordering } => {
                TableSnapshot::with_entries(self.id, entries.clone(), ordering.clone())
            }
            TableKind::Transformed {
                transformation,
                inputs,
            } => {
                let materialized: Vec<TableSnapshot> =
                    inputs.iter().map(|t| t.snapshot(true)).collect();
                let mut out = transformation.transform(&materialized);
                out.set_id(self.id);
                out
            }
            TableKind::Frequency(acc) => acc.snapshot(self.id),
        };
        snapshot.set_temporary(temporary);
        snapshot
    }

    /// Materializes the table, then restricts it to the named columns.
    pub fn snapshot_with(&self, columns: &[&str]) -> TableSnapshot {
        self.snapshot(false).reordered(columns)
    }

    /// The provenance of a cell once the table is materialized, if any.
    pub fn dependency_of(&self, row: usize, col: usize) -> Option<ProvenanceNode> {
        self.snapshot(true).dependency_of(row, col).cloned()
    }

    /// Materializes and renders the table as CSV.
    pub fn to_csv(&self) -> String {
        self.snapshot(false).to_csv()
    }

    /// Materializes and renders the table as HTML.
    pub fn to_html(&self) -> String {
        self.snapshot(false).to_html()
    }
}

/// A two-dimensional histogram over a fixed (x, y) range.
///
/// The range of each axis is split into evenly-sized buckets; recording an
/// observation increments the bucket its coordinates fall into.
/// Observations outside the range are silently ignored.
#[derive(Debug, Clone)]
pub struct FrequencyAccumulator {
    min_x: f64,
    max_x: f64,
    min_y: f64,
    max_y: f64,
    buckets_x: usize,
    buckets_y: usize,
    /// `values[y][x]`, row-major over y buckets.
    values: Vec<Vec<f64>>,
}

impl FrequencyAccumulator {
    pub fn new(
        min_x: f64,
        max_x: f64,
        buckets_x: usize,
        min_y: f64,
        max_y: f64,
        buckets_y: usize,
    ) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
            buckets_x,
            buckets_y,
            values: vec![vec![0.0; buckets_x]; buckets_y],
        }
    }

    /// Increments the bucket containing `(x, y)` by one.
    pub fn add(&mut self, x: f64, y: f64) {
        self.add_weighted(x, y, 1.0);
    }

    /// Increments the bucket containing `(x, y)` by `weight`.
    pub fn add_weighted(&mut self, x: f64, y: f64, weight: f64) {
        let Some(bx) = self.bucket(x, self.min_x, self.max_x, self.buckets_x) else {
            return;
        };
        let Some(by) = self.bucket(y, self.min_y, self.max_y, self.buckets_y) else {
            return;
        };
        self.values[by][bx] += weight;
    }

    fn bucket(&self, v: f64, min: f64, max: f64, buckets: usize) -> Option<usize> {
        if v < min || v >= max {
            return None;
        }
        let width = (max - min) / buckets as f64;
        let index = ((v - min) / width) as usize;
        (index < buckets).then_some(index)
    }

    /// Lower bound of an x bucket.
    fn x_lower_bound(&self, bx: usize) -> f64 {
        self.min_x + (self.max_x - self.min_x) / self.buckets_x as f64 * bx as f64
    }

    /// Lower bound of a y bucket.
    fn y_lower_bound(&self, by: usize) -> f64 {
        self.min_y + (self.max_y - self.min_y) / self.buckets_y as f64 * by as f64
    }

    /// Materializes the grid: one row per y bucket, a `y` column holding
    /// the bucket's lower bound, and one column per x bucket named after
    /// its lower bound. Counts carry no provenance.
    fn snapshot(&self, id: u32) -> TableSnapshot {
        let mut ordering = vec!["y".to_string()];
        for bx in 0..self.buckets_x {
            ordering.push(CellValue::Number(self.x_lower_bound(bx)).to_string());
        }
        let mut snapshot = TableSnapshot::new(id, ordering);
        for (by, row) in self.values.iter().enumerate() {
            let mut entry = Entry::of("y", self.y_lower_bound(by));
            for (bx, &count) in row.iter().enumerate() {
                entry.put(
                    CellValue::Number(self.x_lower_bound(bx)).to_string(),
                    count,
                );
            }
            snapshot.push(entry);
        }
        snapshot
    }
}
