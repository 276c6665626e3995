//! Export module for fintrack
//!
//! - CSV: entries, spreadsheet-compatible
//! - JSON: the complete dataset, machine-readable
//! - Reports: period reports and comparisons as JSON or YAML

pub mod csv;
pub mod json;
pub mod report;

pub use csv::export_entries_csv;
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use report::{export_report, ReportFormat};
