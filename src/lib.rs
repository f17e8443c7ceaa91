//! # Tabletree - tabular data transformation and reporting
//!
//! Tabletree turns raw tabular data into derived, explainable reports:
//! tables are transformed through composable pipelines, every derived cell
//! remembers which source cells produced it, and the result renders as CSV
//! or HTML with hierarchical row grouping.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│    Table    │────▶│  Transform  │────▶│   Renderer  │
//! │  (typed)    │     │  (snapshot) │     │ (provenance)│     │ (CSV/HTML)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use tabletree::{read_csv_str, Table, Transformation};
//!
//! let source = read_csv_str("name,score\nbob,3\nalice,1\n", b',').unwrap();
//! let report = Table::transformed(Transformation::SortRows, vec![source]);
//! let csv = report.to_csv();
//! assert!(csv.starts_with("name,score"));
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per concern
//! - [`value`] - Typed cell values with a total ordering
//! - [`entry`] - Table rows
//! - [`provenance`] - Cell-level lineage as id triples
//! - [`snapshot`] - Materialized tables
//! - [`table`] - Logical tables (stored, transformed, frequency)
//! - [`transform`] - The transformation pipeline
//! - [`tree`] - The grouping tree
//! - [`render`] - CSV and HTML renderers over the tree
//! - [`parser`] - CSV input
//! - [`registry`] - Table ownership and datapoint resolution

// Core modules
pub mod error;
pub mod value;

// Rows and tables
pub mod entry;
pub mod provenance;
pub mod snapshot;
pub mod table;

// Transformation
pub mod transform;

// Grouping and rendering
pub mod render;
pub mod tree;

// Input
pub mod parser;

// Resolution
pub mod registry;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    AccessError, AccessResult, CsvError, CsvResult, TableError, TableResult,
};

// =============================================================================
// Re-exports - Values and rows
// =============================================================================

pub use entry::Entry;
pub use value::CellValue;

// =============================================================================
// Re-exports - Provenance
// =============================================================================

pub use provenance::{CellRef, ProvenanceNode};

// =============================================================================
// Re-exports - Tables
// =============================================================================

pub use snapshot::TableSnapshot;
pub use table::{next_table_id, reset_id_counter, FrequencyAccumulator, Table, TableKind};

// =============================================================================
// Re-exports - Transformations
// =============================================================================

pub use transform::{compare_entries, BoxCaptions, Transformation};

// =============================================================================
// Re-exports - Grouping and rendering
// =============================================================================

pub use render::csv::CsvRenderer;
pub use render::html::HtmlRenderer;
pub use render::{render, Renderer};
pub use tree::{CellCoordinate, GroupTree, NodeId, TreeNode};

// =============================================================================
// Re-exports - Input and resolution
// =============================================================================

pub use parser::{read_csv, read_csv_path, read_csv_str};
pub use registry::Registry;
