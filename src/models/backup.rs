//! Backup record types

use super::value::FieldValue;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A durable snapshot of a record's field values at a point in time.
///
/// Immutable once created. A `None` snapshot entry records that the field
/// held no value when the snapshot was taken, so restore can return the
/// field to absent rather than leaving a stale copy behind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupRecord {
    pub backup_id: String,
    /// The snapshotted target record
    pub record_id: Uuid,
    /// Who triggered the backup
    pub actor_id: String,
    pub snapshot: BTreeMap<String, Option<FieldValue>>,
    pub created_at: DateTime<Utc>,
}

impl BackupRecord {
    pub fn new(
        record_id: Uuid,
        actor_id: impl Into<String>,
        snapshot: BTreeMap<String, Option<FieldValue>>,
    ) -> Self {
        Self {
            backup_id: format!("bkp_{}", Uuid::new_v4().simple()),
            record_id,
            actor_id: actor_id.into(),
            snapshot,
            created_at: Utc::now(),
        }
    }

    pub fn summary(&self) -> BackupSummary {
        BackupSummary {
            backup_id: self.backup_id.clone(),
            record_id: self.record_id,
            actor_id: self.actor_id.clone(),
            field_count: self.snapshot.len(),
            created_at: self.created_at,
        }
    }
}

/// Listing-friendly view of a backup, without the snapshot payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupSummary {
    pub backup_id: String,
    pub record_id: Uuid,
    pub actor_id: String,
    pub field_count: usize,
    pub created_at: DateTime<Utc>,
}
