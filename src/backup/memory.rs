//! In-memory backup store
//!
//! Process-local `BackupStore` for tests and ephemeral embeds. Snapshots
//! do not survive the process; hosts that need durability use the
//! filesystem store instead.

use super::{BackupError, BackupStore};
use crate::models::BackupRecord;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

pub struct InMemoryBackupStore {
    records: RwLock<HashMap<String, BackupRecord>>,
}

impl InMemoryBackupStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryBackupStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackupStore for InMemoryBackupStore {
    async fn save(&self, record: &BackupRecord) -> Result<(), BackupError> {
        self.records
            .write()
            .expect("backup store lock poisoned")
            .insert(record.backup_id.clone(), record.clone());
        Ok(())
    }

    async fn load(&self, backup_id: &str) -> Result<Option<BackupRecord>, BackupError> {
        Ok(self
            .records
            .read()
            .expect("backup store lock poisoned")
            .get(backup_id)
            .cloned())
    }

    async fn delete(&self, backup_id: &str) -> Result<bool, BackupError> {
        Ok(self
            .records
            .write()
            .expect("backup store lock poisoned")
            .remove(backup_id)
            .is_some())
    }

    async fn list_for_record(&self, record_id: Uuid) -> Result<Vec<BackupRecord>, BackupError> {
        Ok(self
            .records
            .read()
            .expect("backup store lock poisoned")
            .values()
            .filter(|r| r.record_id == record_id)
            .cloned()
            .collect())
    }
}
