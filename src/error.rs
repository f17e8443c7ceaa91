//! Error types for the tabletree engine.
//!
//! This module defines one error enum per concern:
//!
//! - [`AccessError`] - out-of-range cell access on a snapshot
//! - [`TableError`] - table-level operations (unsupported kinds, access)
//! - [`CsvError`] - CSV input errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries.

use thiserror::Error;

// =============================================================================
// Cell Access Errors
// =============================================================================

/// Errors raised when indexing a snapshot beyond its bounds.
///
/// A row that merely lacks a column is not an error; the lookup returns an
/// empty cell instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// Row index past the last row.
    #[error("row {row} out of range (table has {rows} rows)")]
    RowOutOfRange { row: usize, rows: usize },

    /// Column index past the last column.
    #[error("column {col} out of range (table has {cols} columns)")]
    ColumnOutOfRange { col: usize, cols: usize },
}

// =============================================================================
// Table Errors
// =============================================================================

/// Errors raised by operations on a [`crate::table::Table`].
#[derive(Debug, Error)]
pub enum TableError {
    /// The table kind does not support the requested operation. Callers can
    /// match on this variant to detect and skip, rather than treat it as a
    /// generic failure.
    #[error("operation '{operation}' is not supported by a {kind} table")]
    Unsupported {
        operation: &'static str,
        kind: &'static str,
    },

    /// Cell access error.
    #[error(transparent)]
    Access(#[from] AccessError),
}

// =============================================================================
// CSV Input Errors
// =============================================================================

/// Errors during CSV reading.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read the input.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed CSV record.
    #[error("invalid CSV record: {0}")]
    Parse(#[from] csv::Error),

    /// The input contained no header line.
    #[error("no headers found in CSV input")]
    NoHeaders,
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for cell access.
pub type AccessResult<T> = Result<T, AccessError>;

/// Result type for table operations.
pub type TableResult<T> = Result<T, TableError>;

/// Result type for CSV reading.
pub type CsvResult<T> = Result<T, CsvError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // AccessError -> TableError
        let access_err = AccessError::RowOutOfRange { row: 4, rows: 2 };
        let table_err: TableError = access_err.into();
        assert!(table_err.to_string().contains("row 4"));
    }

    #[test]
    fn test_unsupported_format() {
        let err = TableError::Unsupported {
            operation: "duplicate",
            kind: "transformed",
        };
        let msg = err.to_string();
        assert!(msg.contains("duplicate"));
        assert!(msg.contains("transformed"));
    }
}
