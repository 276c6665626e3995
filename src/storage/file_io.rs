//! JSON document persistence
//!
//! Documents are read whole and written whole. A write goes to a sibling
//! `.tmp` file that is synced and then renamed over the target, so a
//! reader sees either the old document or the new one.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::FinanceError;

fn storage_error(action: &str, path: &Path, err: impl Display) -> FinanceError {
    FinanceError::Storage(format!("{} {}: {}", action, path.display(), err))
}

/// Load a document; an absent file yields `T::default()`
pub fn read_json<T, P>(path: P) -> Result<T, FinanceError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    match File::open(path) {
        Ok(file) => serde_json::from_reader(BufReader::new(file))
            .map_err(|e| storage_error("Failed to parse", path, e)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(storage_error("Failed to open", path, e)),
    }
}

/// Replace a document on disk in one step
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), FinanceError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).map_err(|e| storage_error("Failed to create", dir, e))?;
    }

    let staging = path.with_extension("json.tmp");
    let result = write_synced(&staging, data).and_then(|_| {
        fs::rename(&staging, path).map_err(|e| storage_error("Failed to replace", path, e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn write_synced<T: Serialize>(staging: &Path, data: &T) -> Result<(), FinanceError> {
    let file = File::create(staging).map_err(|e| storage_error("Failed to create", staging, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| storage_error("Failed to serialize into", staging, e))?;
    writer
        .flush()
        .map_err(|e| storage_error("Failed to flush", staging, e))?;
    writer
        .get_ref()
        .sync_all()
        .map_err(|e| storage_error("Failed to sync", staging, e))
}
