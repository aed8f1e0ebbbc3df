//! Backup manager
//!
//! Durable, queryable snapshots of a record's field values, enabling undo
//! of a clone. The manager reads/writes field values through the schema
//! provider and persists `BackupRecord`s through a pluggable store:
//! - InMemoryBackupStore: process-local, for tests and ephemeral embeds
//! - FileSystemBackupStore: one JSON document per backup on disk

use crate::config::RetentionPolicy;
use crate::models::{BackupRecord, BackupSummary, FieldValue};
use crate::provider::{ProviderError, SchemaProvider};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

/// Error type for backup operations
#[derive(Debug, thiserror::Error)]
pub enum BackupError {
    #[error("Backup not found: {0}")]
    NotFound(String),
    #[error("Snapshot persistence failed: {0}")]
    StoreFailed(String),
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

/// Trait for backup persistence backends.
///
/// Stores are append-only except for deletion: a saved record is never
/// updated in place.
#[async_trait]
pub trait BackupStore: Send + Sync {
    /// Persist a whole backup record atomically.
    async fn save(&self, record: &BackupRecord) -> Result<(), BackupError>;

    /// Load a backup by id, or None when it does not exist.
    async fn load(&self, backup_id: &str) -> Result<Option<BackupRecord>, BackupError>;

    /// Remove a backup. Returns whether it existed.
    async fn delete(&self, backup_id: &str) -> Result<bool, BackupError>;

    /// All backups for a record, in no particular order.
    async fn list_for_record(&self, record_id: Uuid) -> Result<Vec<BackupRecord>, BackupError>;
}

/// Backup service over a schema provider and a persistence store.
pub struct BackupManager<P: SchemaProvider, S: BackupStore> {
    provider: Arc<P>,
    store: S,
    retention: RetentionPolicy,
}

impl<P: SchemaProvider, S: BackupStore> BackupManager<P, S> {
    pub fn new(provider: Arc<P>, store: S, retention: RetentionPolicy) -> Self {
        Self {
            provider,
            store,
            retention,
        }
    }

    /// Snapshot the current values of exactly `field_keys` on `record_id`
    /// and persist them as one immutable backup. Fields with no stored
    /// value are snapshotted as absent so restore can clear them again.
    pub async fn create_backup(
        &self,
        record_id: Uuid,
        actor_id: &str,
        field_keys: &[String],
    ) -> Result<BackupRecord, BackupError> {
        let mut snapshot: BTreeMap<String, Option<FieldValue>> = BTreeMap::new();
        for key in field_keys {
            let value = self.provider.value_of(record_id, key).await?;
            snapshot.insert(key.clone(), value);
        }

        let record = BackupRecord::new(record_id, actor_id, snapshot);
        self.store.save(&record).await?;
        info!(
            "Created backup {} for record {} ({} fields)",
            record.backup_id,
            record_id,
            record.snapshot.len()
        );
        Ok(record)
    }

    /// Summaries of all backups for a record, most recent first.
    pub async fn list_backups(&self, record_id: Uuid) -> Result<Vec<BackupSummary>, BackupError> {
        let mut records = self.store.list_for_record(record_id).await?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records.iter().map(BackupRecord::summary).collect())
    }

    /// Write every snapshotted value back onto the backup's record.
    ///
    /// Returns false when the backup no longer exists. Fields snapshotted
    /// as absent are deleted from the record, restoring it to its exact
    /// pre-backup state.
    pub async fn restore_backup(&self, backup_id: &str) -> Result<bool, BackupError> {
        let Some(record) = self.store.load(backup_id).await? else {
            warn!("Restore requested for missing backup {}", backup_id);
            return Ok(false);
        };

        for (field_key, value) in &record.snapshot {
            match value {
                Some(v) => {
                    self.provider
                        .set_value(record.record_id, field_key, v.clone())
                        .await?;
                }
                None => {
                    self.provider
                        .delete_value(record.record_id, field_key)
                        .await?;
                }
            }
        }
        info!(
            "Restored backup {} onto record {} ({} fields)",
            backup_id,
            record.record_id,
            record.snapshot.len()
        );
        Ok(true)
    }

    /// Delete a backup by id. Idempotent: deleting an id that is already
    /// absent returns true.
    pub async fn delete_backup(&self, backup_id: &str) -> Result<bool, BackupError> {
        self.store.delete(backup_id).await?;
        Ok(true)
    }

    /// Apply the retention policy to one record's backups: drop backups
    /// older than the age threshold, then keep only the newest
    /// max-per-record. Returns the number of backups deleted.
    pub async fn enforce_retention(&self, record_id: Uuid) -> Result<usize, BackupError> {
        let mut records = self.store.list_for_record(record_id).await?;
        // Newest first; deletions walk from the tail
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        let mut to_delete: Vec<String> = Vec::new();

        if let Some(max_age_days) = self.retention.max_age_days {
            let cutoff = Utc::now() - Duration::days(max_age_days);
            while records.last().is_some_and(|r| r.created_at < cutoff) {
                if let Some(record) = records.pop() {
                    to_delete.push(record.backup_id);
                }
            }
        }

        if let Some(max_per_record) = self.retention.max_per_record {
            while records.len() > max_per_record {
                if let Some(record) = records.pop() {
                    to_delete.push(record.backup_id);
                }
            }
        }

        let mut deleted = 0;
        for backup_id in &to_delete {
            if self.store.delete(backup_id).await? {
                deleted += 1;
            }
        }
        if deleted > 0 {
            info!(
                "Retention removed {} backup(s) for record {}",
                deleted, record_id
            );
        }
        Ok(deleted)
    }
}

pub mod memory;

#[cfg(feature = "native-fs")]
pub mod filesystem;
