//! CSV Export functionality
//!
//! Exports entries to a spreadsheet-friendly CSV file, oldest first.

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::storage::Storage;

const HEADER: [&str; 6] = ["ID", "Date", "Kind", "Category", "Description", "Amount"];

/// Export all entries to CSV
pub fn export_entries_csv<W: Write>(storage: &Storage, writer: W) -> FinanceResult<usize> {
    let mut entries = storage.entries.get_all()?;
    entries.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));

    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer
        .write_record(HEADER)
        .map_err(|e| FinanceError::Export(e.to_string()))?;

    for entry in &entries {
        csv_writer
            .write_record([
                entry.id.to_string(),
                entry.date.format("%Y-%m-%dT%H:%M:%S").to_string(),
                entry.kind.to_string(),
                entry.category.clone(),
                entry.description.clone(),
                format!("{:.2}", entry.amount),
            ])
            .map_err(|e| FinanceError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(entries.len())
}
