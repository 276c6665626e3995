//! Entry repository for JSON storage
//!
//! Manages loading and saving entries to entries.json. The file keeps the
//! id counter next to the entries so ids stay unique across restarts and
//! deletions.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::error::FinanceError;
use crate::models::{Entry, EntryDraft, EntryId};

use super::file_io::{read_json, write_json_atomic};

/// On-disk shape of entries.json
#[derive(Debug, Clone, Serialize, Deserialize)]
struct EntryData {
    #[serde(default)]
    entries: Vec<Entry>,
    #[serde(default = "first_id")]
    next_id: EntryId,
}

impl Default for EntryData {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: first_id(),
        }
    }
}

fn first_id() -> EntryId {
    1
}

/// Repository for entry persistence
pub struct EntryRepository {
    path: PathBuf,
    data: RwLock<EntryData>,
    dirty: AtomicBool,
}

impl EntryRepository {
    /// Create an empty entry repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(EntryData::default()),
            dirty: AtomicBool::new(false),
        }
    }

    /// Load entries from disk
    pub fn load(&self) -> Result<(), FinanceError> {
        let mut file_data: EntryData = read_json(&self.path)?;

        // a hand-edited counter must never hand out an existing id
        let max_id = file_data.entries.iter().map(|e| e.id).max().unwrap_or(0);
        if file_data.next_id <= max_id {
            file_data.next_id = max_id + 1;
        }

        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = file_data;
        self.dirty.store(false, Ordering::SeqCst);

        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)?;
        self.dirty.store(false, Ordering::SeqCst);
        Ok(())
    }

    /// True when memory holds changes not yet written
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    /// Store a validated draft under the next id
    pub fn insert(&self, draft: EntryDraft) -> Result<Entry, FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let entry = Entry::from_draft(data.next_id, draft);
        data.next_id += 1;
        data.entries.push(entry.clone());
        self.dirty.store(true, Ordering::SeqCst);

        Ok(entry)
    }

    /// Replace every field of an entry but its id
    ///
    /// Returns `(before, after)`, or `None` when the id is unknown.
    pub fn update(
        &self,
        id: EntryId,
        draft: EntryDraft,
    ) -> Result<Option<(Entry, Entry)>, FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let Some(entry) = data.entries.iter_mut().find(|e| e.id == id) else {
            return Ok(None);
        };

        let before = entry.clone();
        entry.apply(draft);
        let after = entry.clone();
        self.dirty.store(true, Ordering::SeqCst);

        Ok(Some((before, after)))
    }

    /// Remove an entry, returning it if it existed
    pub fn remove(&self, id: EntryId) -> Result<Option<Entry>, FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let Some(pos) = data.entries.iter().position(|e| e.id == id) else {
            return Ok(None);
        };

        let removed = data.entries.remove(pos);
        self.dirty.store(true, Ordering::SeqCst);
        Ok(Some(removed))
    }

    pub fn get(&self, id: EntryId) -> Result<Option<Entry>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.entries.iter().find(|e| e.id == id).cloned())
    }

    /// All entries in insertion order
    pub fn get_all(&self) -> Result<Vec<Entry>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.entries.clone())
    }

    /// Id the next insert will receive
    pub fn next_id(&self) -> Result<EntryId, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.next_id)
    }

    pub fn count(&self) -> Result<usize, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.entries.len())
    }
}
