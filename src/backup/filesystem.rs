//! Filesystem backup store
//!
//! Persists each backup as one JSON document under a base directory,
//! named `<backup_id>.json`. Listing scans the directory and filters by
//! record id.
//!
//! ## Security
//!
//! Backup ids arrive from outside (restore/delete requests), so they are
//! validated before being used as file names: path separators and ".."
//! are rejected.

use super::{BackupError, BackupStore};
use crate::models::BackupRecord;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::warn;
use uuid::Uuid;

pub struct FileSystemBackupStore {
    base_path: PathBuf,
}

impl FileSystemBackupStore {
    /// Create a store rooted at `base_path`. The directory is created on
    /// first save if it does not exist.
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Resolve a backup id to its on-disk path, rejecting ids that would
    /// escape the base directory.
    fn resolve_path(&self, backup_id: &str) -> Result<PathBuf, BackupError> {
        if backup_id.is_empty()
            || backup_id.contains("..")
            || backup_id.contains('/')
            || backup_id.contains('\\')
        {
            return Err(BackupError::StoreFailed(format!(
                "Invalid backup id: {backup_id}"
            )));
        }
        Ok(self.base_path.join(format!("{backup_id}.json")))
    }
}

#[async_trait]
impl BackupStore for FileSystemBackupStore {
    async fn save(&self, record: &BackupRecord) -> Result<(), BackupError> {
        let path = self.resolve_path(&record.backup_id)?;
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            BackupError::StoreFailed(format!("Failed to create backup directory: {e}"))
        })?;

        let json = serde_json::to_vec_pretty(record)
            .map_err(|e| BackupError::SerializationError(e.to_string()))?;

        // Write to a temp file, then rename into place; save is
        // all-or-nothing
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, &json).await.map_err(|e| {
            BackupError::StoreFailed(format!("Failed to write backup {}: {e}", record.backup_id))
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            BackupError::StoreFailed(format!("Failed to commit backup {}: {e}", record.backup_id))
        })
    }

    async fn load(&self, backup_id: &str) -> Result<Option<BackupRecord>, BackupError> {
        let path = self.resolve_path(backup_id)?;
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(BackupError::StoreFailed(format!(
                    "Failed to read backup {backup_id}: {e}"
                )));
            }
        };
        let record = serde_json::from_slice(&bytes)
            .map_err(|e| BackupError::SerializationError(e.to_string()))?;
        Ok(Some(record))
    }

    async fn delete(&self, backup_id: &str) -> Result<bool, BackupError> {
        let path = self.resolve_path(backup_id)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(BackupError::StoreFailed(format!(
                "Failed to delete backup {backup_id}: {e}"
            ))),
        }
    }

    async fn list_for_record(&self, record_id: Uuid) -> Result<Vec<BackupRecord>, BackupError> {
        let mut read_dir = match fs::read_dir(&self.base_path).await {
            Ok(rd) => rd,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(BackupError::StoreFailed(format!(
                    "Failed to read backup directory: {e}"
                )));
            }
        };

        let mut records = Vec::new();
        while let Some(entry) = read_dir
            .next_entry()
            .await
            .map_err(|e| BackupError::StoreFailed(format!("Failed to read directory entry: {e}")))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let bytes = match fs::read(&path).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!("Failed to read backup file {}: {}", path.display(), e);
                    continue;
                }
            };
            match serde_json::from_slice::<BackupRecord>(&bytes) {
                Ok(record) if record.record_id == record_id => records.push(record),
                Ok(_) => {}
                Err(e) => {
                    warn!("Skipping unparseable backup file {}: {}", path.display(), e);
                }
            }
        }
        Ok(records)
    }
}
