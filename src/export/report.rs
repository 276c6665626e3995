//! Report export
//!
//! Writes generated report data as JSON or YAML. Only the numbers are
//! exported; rendering charts from them is left to other tools.

use std::io::Write;

use clap::ValueEnum;
use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};

/// Output format for exported reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Json,
    Yaml,
}

/// Serialize any report to the chosen format
pub fn export_report<T: Serialize, W: Write>(
    report: &T,
    format: ReportFormat,
    writer: &mut W,
) -> FinanceResult<()> {
    match format {
        ReportFormat::Json => serde_json::to_writer_pretty(&mut *writer, report)
            .map_err(|e| FinanceError::Export(e.to_string()))?,
        ReportFormat::Yaml => serde_yaml::to_writer(&mut *writer, report)
            .map_err(|e| FinanceError::Export(e.to_string()))?,
    }
    writeln!(writer).map_err(|e| FinanceError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategorySet, Entry, EntryDraft, EntryKind, ReportPeriod};
    use crate::reports::FinancialReport;
    use chrono::NaiveDate;

    fn sample_report() -> FinancialReport {
        let date = NaiveDate::from_ymd_opt(2025, 5, 2)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        let entries = vec![Entry::from_draft(
            1,
            EntryDraft::new("Rent", 900.0, date, EntryKind::Expense, "Moradia"),
        )];
        let period = ReportPeriod::month(2025, 5).unwrap();
        FinancialReport::from_entries(&entries, &CategorySet::new(["Moradia"]), &period).unwrap()
    }

    #[test]
    fn test_export_json() {
        let mut buffer = Vec::new();
        export_report(&sample_report(), ReportFormat::Json, &mut buffer).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["expense"]["by_category"]["Moradia"], 900.0);
        assert_eq!(value["closing_balance"], -900.0);
    }

    #[test]
    fn test_export_yaml() {
        let mut buffer = Vec::new();
        export_report(&sample_report(), ReportFormat::Yaml, &mut buffer).unwrap();
        let yaml = String::from_utf8(buffer).unwrap();
        let parsed: FinancialReport = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, sample_report());
    }
}
