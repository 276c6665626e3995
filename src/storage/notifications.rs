//! Notification repository for JSON storage
//!
//! notifications.json is a plain list of notification records.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::Notification;

use super::file_io::{read_json, write_json_atomic};

/// Append-only notification store
pub struct NotificationRepository {
    path: PathBuf,
    data: RwLock<Vec<Notification>>,
    dirty: AtomicBool,
}

impl NotificationRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
            dirty: AtomicBool::new(false),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let loaded: Vec<Notification> = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = loaded;
        self.dirty.store(false, Ordering::SeqCst);

        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        write_json_atomic(&self.path, &*data)?;
        self.dirty.store(false, Ordering::SeqCst);
        Ok(())
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn append(&self, notification: Notification) -> Result<(), FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.push(notification);
        self.dirty.store(true, Ordering::SeqCst);
        Ok(())
    }

    /// All notifications, oldest first
    pub fn get_all(&self) -> Result<Vec<Notification>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Drop every notification, returning how many there were
    pub fn clear(&self) -> Result<usize, FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let count = data.len();
        data.clear();
        self.dirty.store(true, Ordering::SeqCst);
        Ok(count)
    }

    /// Poison the lock so every later access fails
    #[cfg(test)]
    pub(crate) fn poison(&self) {
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = self.data.write().unwrap();
            panic!("poisoning notification lock");
        }));
    }
}
