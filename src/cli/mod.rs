//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod audit;
pub mod entry;
pub mod export;
pub mod notify;
pub mod plan;
pub mod report;

pub use audit::handle_audit_command;
pub use entry::{handle_entry_command, EntryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use notify::{handle_notify_command, NotifyCommands};
pub use plan::{handle_plan_command, PlanCommands};
pub use report::{handle_report_command, ReportCommands};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::{FinanceError, FinanceResult};
use crate::models::parse_amount;

/// Parse a date or date-time argument
///
/// A bare date means midnight at the start of that day.
pub fn parse_date_time(s: &str) -> FinanceResult<NaiveDateTime> {
    let s = s.trim();
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            FinanceError::Validation(format!(
                "Invalid date '{}'. Use YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]",
                s
            ))
        })
}

/// Parse an amount argument into a validation error on failure
pub fn parse_amount_arg(s: &str) -> FinanceResult<f64> {
    parse_amount(s).map_err(|e| FinanceError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_time_forms() {
        let day = parse_date_time("2025-05-01").unwrap();
        assert_eq!(day.to_string(), "2025-05-01 00:00:00");

        let minute = parse_date_time("2025-05-01T08:30").unwrap();
        assert_eq!(minute.to_string(), "2025-05-01 08:30:00");

        let second = parse_date_time("2025-05-01 08:30:15").unwrap();
        assert_eq!(second.to_string(), "2025-05-01 08:30:15");

        assert!(parse_date_time("01/05/2025").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_amount_arg() {
        assert_eq!(parse_amount_arg("120,50").unwrap(), 120.5);
        assert!(parse_amount_arg("abc").unwrap_err().is_validation());
    }
}
