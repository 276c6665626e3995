//! Path management for fintrack
//!
//! ## Path Resolution Order
//!
//! 1. `FINTRACK_DATA_DIR` environment variable (if set)
//! 2. The platform configuration directory (`~/.config/fintrack` on Linux,
//!    `%APPDATA%\fintrack` on Windows, `~/Library/Application Support/fintrack` on macOS)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::FinanceError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "FINTRACK_DATA_DIR";

/// Manages all paths used by fintrack
#[derive(Debug, Clone)]
pub struct FinancePaths {
    base_dir: PathBuf,
}

impl FinancePaths {
    /// Resolve the base directory from the environment or platform defaults
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, FinanceError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create FinancePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory holding the persisted documents
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// `{entries: [...], next_id}` document
    pub fn entries_file(&self) -> PathBuf {
        self.data_dir().join("entries.json")
    }

    /// Current plan, stored without a wrapper
    pub fn plan_file(&self) -> PathBuf {
        self.data_dir().join("plan.json")
    }

    pub fn notifications_file(&self) -> PathBuf {
        self.data_dir().join("notifications.json")
    }

    /// Ensure the base and data directories exist
    pub fn ensure_directories(&self) -> Result<(), FinanceError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FinanceError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| FinanceError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }

    /// Check if `fintrack init` has written a settings file
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, FinanceError> {
    ProjectDirs::from("", "", "fintrack")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| FinanceError::Config("Could not determine a home directory".into()))
}
