//! Report CLI commands
//!
//! Implements CLI commands for generating reports.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use super::parse_date_time;
use crate::error::{FinanceError, FinanceResult};
use crate::export::{export_report, ReportFormat};
use crate::models::ReportPeriod;
use crate::reports::{FinancialReport, YearComparison};
use crate::storage::Storage;

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Balance report for [start, end)
    Period {
        /// Start (YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS]), inclusive
        start: String,
        /// End, exclusive
        end: String,
        /// Write the report data to a file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Format for --output
        #[arg(short, long, value_enum, default_value = "json")]
        format: ReportFormat,
    },
    /// Compare two calendar years
    Compare {
        #[arg(allow_negative_numbers = true)]
        year1: i32,
        #[arg(allow_negative_numbers = true)]
        year2: i32,
        /// Write the comparison data to a file instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Format for --output
        #[arg(short, long, value_enum, default_value = "json")]
        format: ReportFormat,
    },
}

/// Handle a report command
pub fn handle_report_command(storage: &Storage, cmd: ReportCommands) -> FinanceResult<()> {
    let currency = storage.settings().currency_symbol.as_str();

    match cmd {
        ReportCommands::Period {
            start,
            end,
            output,
            format,
        } => {
            let period = ReportPeriod::new(parse_date_time(&start)?, parse_date_time(&end)?)?;
            let report = FinancialReport::generate(storage, &period)?;

            match output {
                Some(path) => {
                    write_report(&report, format, &path)?;
                    println!("Report written to {}", path.display());
                }
                None => print!("{}", report.format_terminal(currency)),
            }
        }

        ReportCommands::Compare {
            year1,
            year2,
            output,
            format,
        } => {
            let comparison = YearComparison::generate(storage, year1, year2)?;

            match output {
                Some(path) => {
                    write_report(&comparison, format, &path)?;
                    println!("Comparison written to {}", path.display());
                }
                None => print!("{}", comparison.format_terminal(currency)),
            }
        }
    }

    Ok(())
}

fn write_report<T: serde::Serialize>(
    report: &T,
    format: ReportFormat,
    path: &PathBuf,
) -> FinanceResult<()> {
    let file = File::create(path)
        .map_err(|e| FinanceError::Export(format!("Failed to create {}: {}", path.display(), e)))?;
    let mut writer = BufWriter::new(file);
    export_report(report, format, &mut writer)
}
