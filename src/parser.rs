//! CSV input.
//!
//! Reads delimiter-separated text into a stored [`Table`]. The first
//! non-comment line is the header and fixes the column ordering; every
//! other line becomes one row, with each cell coerced through
//! [`CellValue::parse`]. Blank lines and lines starting with `#` are
//! skipped before parsing.

use crate::entry::Entry;
use crate::error::{CsvError, CsvResult};
use crate::table::Table;
use crate::value::CellValue;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Reads CSV from any reader into a stored table.
pub fn read_csv<R: Read>(mut reader: R, delimiter: u8) -> CsvResult<Table> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    read_csv_str(&content, delimiter)
}

/// Reads a CSV file into a stored table.
pub fn read_csv_path(path: impl AsRef<Path>, delimiter: u8) -> CsvResult<Table> {
    read_csv(File::open(path)?, delimiter)
}

/// Reads CSV text into a stored table.
pub fn read_csv_str(content: &str, delimiter: u8) -> CsvResult<Table> {
    // Comment and blank lines are not CSV records; drop them before the
    // parser sees them.
    let filtered: String = content
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#')
        })
        .collect::<Vec<_>>()
        .join("\n");

    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(filtered.as_bytes());

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.is_empty() {
        return Err(CsvError::NoHeaders);
    }

    let mut entries = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let mut entry = Entry::new();
        for (header, field) in headers.iter().zip(record.iter()) {
            entry.put(header.clone(), CellValue::parse(field.trim()));
        }
        entries.push(entry);
    }
    Ok(Table::from_entries(entries, headers))
}
