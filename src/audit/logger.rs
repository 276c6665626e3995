//! Append-only audit log
//!
//! One JSON object per line. Each record is appended and flushed on its own
//! so a crash loses at most the line being written.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use crate::error::{FinanceError, FinanceResult};

use super::entry::AuditEntry;

/// Writes audit entries to the JSONL audit log
pub struct AuditLogger {
    log_path: PathBuf,
}

impl AuditLogger {
    pub fn new(log_path: PathBuf) -> Self {
        Self { log_path }
    }

    pub fn log(&self, entry: &AuditEntry) -> FinanceResult<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| FinanceError::Json(format!("Failed to serialize audit entry: {}", e)))?;

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_path)
            .map_err(|e| FinanceError::Io(format!("Failed to open audit log: {}", e)))?;

        writeln!(file, "{}", line)
            .and_then(|_| file.flush())
            .map_err(|e| FinanceError::Io(format!("Failed to write audit entry: {}", e)))
    }

    /// Every record, oldest first; a missing log is empty
    pub fn read_all(&self) -> FinanceResult<Vec<AuditEntry>> {
        if !self.log_path.exists() {
            return Ok(Vec::new());
        }

        let contents = fs::read_to_string(&self.log_path)
            .map_err(|e| FinanceError::Io(format!("Failed to read audit log: {}", e)))?;

        contents
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|e| {
                    FinanceError::Json(format!("Bad audit record on line {}: {}", idx + 1, e))
                })
            })
            .collect()
    }

    /// The last `count` records, oldest first
    pub fn read_recent(&self, count: usize) -> FinanceResult<Vec<AuditEntry>> {
        let mut entries = self.read_all()?;
        let skip = entries.len().saturating_sub(count);
        Ok(entries.split_off(skip))
    }
}
