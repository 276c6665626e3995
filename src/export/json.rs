//! JSON Export functionality
//!
//! Exports every persisted document to a single JSON file with schema
//! versioning.

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Entry, EntryId, Notification, Plan};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full dataset export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub entries: Vec<Entry>,

    /// Next id the entry store would assign
    pub next_id: EntryId,

    pub plan: Option<Plan>,

    pub notifications: Vec<Notification>,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub entry_count: usize,
    pub notification_count: usize,
    pub earliest_entry: Option<String>,
    pub latest_entry: Option<String>,
}

impl FullExport {
    /// Create a new full export from storage
    pub fn from_storage(storage: &Storage) -> FinanceResult<Self> {
        let entries = storage.entries.get_all()?;
        let next_id = storage.entries.next_id()?;
        let plan = storage.plan.get()?;
        let notifications = storage.notifications.get_all()?;

        let metadata = ExportMetadata {
            entry_count: entries.len(),
            notification_count: notifications.len(),
            earliest_entry: entries.iter().map(|e| e.date).min().map(|d| d.to_string()),
            latest_entry: entries.iter().map(|e| e.date).max().map(|d| d.to_string()),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            entries,
            next_id,
            plan,
            notifications,
            metadata,
        })
    }
}

/// Export the full dataset to JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FinanceResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FinancePaths, Settings};
    use crate::models::{EntryDraft, EntryKind};
    use crate::services::{EntryService, NotificationService, PlanService};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = FinancePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::open(paths, &Settings::default());
        (temp_dir, storage)
    }

    #[test]
    fn test_export_writes_every_document() {
        let (_temp_dir, storage) = create_test_storage();
        let mut buffer = Vec::new();
        export_full_json(&storage, &mut buffer, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["schema_version"], EXPORT_SCHEMA_VERSION);
        assert_eq!(value["next_id"], 1);
        assert!(value["plan"].is_null());
        assert_eq!(value["entries"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_full_export() {
        let (_temp_dir, storage) = create_test_storage();
        let date = NaiveDate::from_ymd_opt(2025, 1, 15)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();

        let service = EntryService::new(&storage);
        service
            .create(EntryDraft::new("Pay", 3000.0, date, EntryKind::Income, "Salario"))
            .unwrap();
        let rent = service
            .create(EntryDraft::new("Rent", 900.0, date, EntryKind::Expense, "Moradia"))
            .unwrap();
        service.remove(rent.id).unwrap();
        PlanService::new(&storage).compute_from_salary(3000.0).unwrap();
        NotificationService::new(&storage).record("hello").unwrap();

        let export = FullExport::from_storage(&storage).unwrap();
        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.entries.len(), 1);
        assert_eq!(export.next_id, 3);
        assert!(export.plan.is_some());
        assert_eq!(export.metadata.notification_count, 1);
    }
}
