//! CLI commands for data export
//!
//! Provides commands for exporting data in various formats.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use clap::Subcommand;

use crate::error::{FinanceError, FinanceResult};
use crate::export::{export_entries_csv, export_full_json};
use crate::storage::Storage;

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export entries, plan and notifications to JSON
    Json {
        /// Output file path
        output: PathBuf,

        /// Single-line JSON instead of pretty-printed
        #[arg(long)]
        compact: bool,
    },

    /// Export entries to CSV
    Csv {
        /// Output file path
        output: PathBuf,
    },
}

/// Handle export commands
pub fn handle_export_command(storage: &Storage, cmd: ExportCommands) -> FinanceResult<()> {
    match cmd {
        ExportCommands::Json { output, compact } => {
            let mut writer = BufWriter::new(create_file(&output)?);
            export_full_json(storage, &mut writer, !compact)?;
            println!("Exported all data to {}", output.display());
        }
        ExportCommands::Csv { output } => {
            let count = export_entries_csv(storage, BufWriter::new(create_file(&output)?))?;
            println!("Exported {} entries to {}", count, output.display());
        }
    }
    Ok(())
}

fn create_file(path: &PathBuf) -> FinanceResult<File> {
    File::create(path)
        .map_err(|e| FinanceError::Export(format!("Failed to create {}: {}", path.display(), e)))
}
