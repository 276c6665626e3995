//! Storage layer for fintrack
//!
//! Entries, the plan and notifications each live in their own JSON document
//! under `data/`. [`Storage`] loads all three when it is opened and writes
//! them back according to the configured [`FlushPolicy`]: after every
//! mutation, or once when the storage is closed (or dropped).
//!
//! Persistence problems never stop the program. An unreadable document is
//! logged and replaced by an empty one; a failed save is logged and the
//! data stays in memory.

pub mod entries;
pub mod file_io;
pub mod notifications;
pub mod plan;

pub use entries::EntryRepository;
pub use file_io::{read_json, write_json_atomic};
pub use notifications::NotificationRepository;
pub use plan::PlanRepository;

use serde::Serialize;
use tracing::{debug, warn};

use crate::audit::{generate_detailed_diff, generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::{FinancePaths, FlushPolicy, Settings};
use crate::error::FinanceError;
use crate::models::CategorySet;

/// The persisted documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Document {
    Entries,
    Plan,
    Notifications,
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Document::Entries => write!(f, "entries"),
            Document::Plan => write!(f, "plan"),
            Document::Notifications => write!(f, "notifications"),
        }
    }
}

/// Main storage coordinator that owns every repository
pub struct Storage {
    paths: FinancePaths,
    settings: Settings,
    categories: CategorySet,
    audit: AuditLogger,
    pub entries: EntryRepository,
    pub plan: PlanRepository,
    pub notifications: NotificationRepository,
    closed: bool,
}

impl Storage {
    /// Open storage and eagerly load every document
    pub fn open(paths: FinancePaths, settings: &Settings) -> Self {
        if let Err(e) = paths.ensure_directories() {
            warn!(error = %e, "continuing without a data directory");
        }

        let storage = Self {
            entries: EntryRepository::new(paths.entries_file()),
            plan: PlanRepository::new(paths.plan_file()),
            notifications: NotificationRepository::new(paths.notifications_file()),
            audit: AuditLogger::new(paths.audit_log()),
            categories: CategorySet::new(settings.categories.iter().cloned()),
            settings: settings.clone(),
            paths,
            closed: false,
        };

        storage.load_document(Document::Entries);
        storage.load_document(Document::Plan);
        storage.load_document(Document::Notifications);

        storage
    }

    fn load_document(&self, document: Document) {
        let result = match document {
            Document::Entries => self.entries.load(),
            Document::Plan => self.plan.load(),
            Document::Notifications => self.notifications.load(),
        };
        if let Err(e) = result {
            warn!(%document, error = %e, "could not load document, starting empty");
        }
    }

    pub fn paths(&self) -> &FinancePaths {
        &self.paths
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Category names entries may use
    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn audit_log(&self) -> &AuditLogger {
        &self.audit
    }

    /// Persist a document right away when the policy asks for it
    ///
    /// Called by services after each successful mutation.
    pub fn after_mutation(&self, document: Document) {
        if self.settings.flush_policy != FlushPolicy::EveryMutation {
            return;
        }
        if let Err(e) = self.save_document(document) {
            warn!(%document, error = %e, "save failed, keeping changes in memory");
        }
    }

    fn save_document(&self, document: Document) -> Result<(), FinanceError> {
        debug!(%document, "saving");
        match document {
            Document::Entries => self.entries.save(),
            Document::Plan => self.plan.save(),
            Document::Notifications => self.notifications.save(),
        }
    }

    fn is_dirty(&self, document: Document) -> bool {
        match document {
            Document::Entries => self.entries.is_dirty(),
            Document::Plan => self.plan.is_dirty(),
            Document::Notifications => self.notifications.is_dirty(),
        }
    }

    /// Write every document with unsaved changes
    ///
    /// Every dirty document is attempted; the first failure is returned.
    pub fn flush(&self) -> Result<(), FinanceError> {
        let mut first_error = None;
        for document in [Document::Entries, Document::Plan, Document::Notifications] {
            if !self.is_dirty(document) {
                continue;
            }
            if let Err(e) = self.save_document(document) {
                warn!(%document, error = %e, "save failed");
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Flush and release the storage
    pub fn close(mut self) -> Result<(), FinanceError> {
        self.closed = true;
        self.flush()
    }

    /// Record a creation in the audit log
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(AuditEntry::create(entity_type, entity_id, entity_name, entity));
    }

    /// Record an update, with a field diff, in the audit log
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) {
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => match entity_type {
                EntityType::Plan => {
                    let changes = generate_detailed_diff(&b, &a, "");
                    (!changes.is_empty()).then(|| changes.join(", "))
                }
                EntityType::Entry => generate_diff(&b, &a),
            },
            _ => None,
        };
        self.write_audit(AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ));
    }

    /// Record a removal in the audit log
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: impl Into<String>,
        entity_name: Option<String>,
        entity: &T,
    ) {
        self.write_audit(AuditEntry::delete(entity_type, entity_id, entity_name, entity));
    }

    fn write_audit(&self, entry: AuditEntry) {
        if let Err(e) = self.audit.log(&entry) {
            warn!(error = %e, "could not write audit entry");
        }
    }
}

impl Drop for Storage {
    fn drop(&mut self) {
        if self.closed {
            return;
        }
        // errors were already logged by flush
        let _ = self.flush();
    }
}
