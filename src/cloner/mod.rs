//! Field cloner
//!
//! Copies field values from a source record to a target record with
//! per-field fault isolation. Each invocation moves through
//! Validating -> BackingUp -> Copying -> Finalizing; a validation or
//! backup failure rejects the whole request with no mutation, while a
//! per-field copy fault is recorded and the remaining fields continue.

use crate::backup::{BackupManager, BackupStore};
use crate::detector::FieldDetector;
use crate::events::{CloneEvent, EventSink};
use crate::models::{BackupInfo, CloneRequest, CloneResult, FieldError};
use crate::provider::{Authorizer, SchemaProvider};
use std::sync::Arc;
use tracing::{debug, warn};

/// Cloner service wired to its collaborators by the composition root.
pub struct FieldCloner<P: SchemaProvider, A: Authorizer, S: BackupStore> {
    provider: Arc<P>,
    authorizer: Arc<A>,
    backups: Arc<BackupManager<P, S>>,
    detector: Arc<FieldDetector<P>>,
    events: Arc<dyn EventSink>,
}

impl<P: SchemaProvider, A: Authorizer, S: BackupStore> FieldCloner<P, A, S> {
    pub fn new(
        provider: Arc<P>,
        authorizer: Arc<A>,
        backups: Arc<BackupManager<P, S>>,
        detector: Arc<FieldDetector<P>>,
        events: Arc<dyn EventSink>,
    ) -> Self {
        Self {
            provider,
            authorizer,
            backups,
            detector,
            events,
        }
    }

    /// Copy the requested fields from the source record onto the target.
    ///
    /// Never returns an error: every exit path - rejection, partial
    /// completion, full success - is a structured `CloneResult`.
    pub async fn clone_fields(&self, request: &CloneRequest) -> CloneResult {
        // Validating
        if let Some(rejection) = self.validate(request).await {
            return rejection;
        }

        let field_keys = dedupe_preserving_order(&request.field_keys);

        // BackingUp
        let backup = if request.options.create_backup {
            match self
                .backups
                .create_backup(request.target_record_id, &request.actor_id, &field_keys)
                .await
            {
                Ok(record) => Some(BackupInfo {
                    backup_id: record.backup_id,
                    created_at: record.created_at,
                }),
                Err(e) => {
                    // Never clone without the backup the caller asked for
                    return CloneResult::rejected(format!("Backup creation failed: {e}"));
                }
            }
        } else {
            None
        };

        // Copying
        let mut cloned_fields = Vec::new();
        let mut skipped_fields = Vec::new();
        let mut errors = Vec::new();

        for field_key in &field_keys {
            match self.copy_field(request, field_key).await {
                Ok(CopyOutcome::Cloned) => cloned_fields.push(field_key.clone()),
                Ok(CopyOutcome::SkippedNoSource) => {
                    debug!("Skipping {}: source has no value", field_key);
                    skipped_fields.push(field_key.clone());
                }
                Ok(CopyOutcome::SkippedProtected) => {
                    debug!("Skipping {}: target value kept (overwrite disabled)", field_key);
                    skipped_fields.push(field_key.clone());
                }
                Err(reason) => {
                    warn!("Failed to clone {}: {}", field_key, reason);
                    errors.push(FieldError {
                        field_key: field_key.clone(),
                        reason,
                    });
                }
            }
        }

        // Finalizing
        self.detector.invalidate(Some(request.target_record_id));
        self.events.clone_completed(&CloneEvent {
            source_record_id: request.source_record_id,
            target_record_id: request.target_record_id,
            cloned_fields: cloned_fields.clone(),
        });
        if backup.is_some()
            && let Err(e) = self
                .backups
                .enforce_retention(request.target_record_id)
                .await
        {
            // Retention is opportunistic; its failures never reach the result
            warn!(
                "Retention sweep failed for record {}: {}",
                request.target_record_id, e
            );
        }

        CloneResult {
            success: true,
            message: None,
            cloned_fields,
            skipped_fields,
            errors,
            backup,
        }
    }

    /// Request-level validation. Returns the rejection to hand back, or
    /// None when the request may proceed. No side effects either way.
    async fn validate(&self, request: &CloneRequest) -> Option<CloneResult> {
        if request.source_record_id == request.target_record_id {
            return Some(CloneResult::rejected(
                "Source and target records must differ",
            ));
        }
        if request.field_keys.is_empty() {
            return Some(CloneResult::rejected("No fields requested"));
        }

        match self.provider.record_exists(request.source_record_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Some(CloneResult::rejected(format!(
                    "Source record {} not found",
                    request.source_record_id
                )));
            }
            Err(e) => return Some(CloneResult::rejected(format!("Validation failed: {e}"))),
        }
        match self.provider.record_exists(request.target_record_id).await {
            Ok(true) => {}
            Ok(false) => {
                return Some(CloneResult::rejected(format!(
                    "Target record {} not found",
                    request.target_record_id
                )));
            }
            Err(e) => return Some(CloneResult::rejected(format!("Validation failed: {e}"))),
        }

        match self
            .authorizer
            .can_write(&request.actor_id, request.target_record_id)
            .await
        {
            Ok(true) => None,
            Ok(false) => Some(CloneResult::rejected(format!(
                "Actor {} is not allowed to write the target record",
                request.actor_id
            ))),
            Err(e) => Some(CloneResult::rejected(format!(
                "Authorization check failed: {e}"
            ))),
        }
    }

    /// Copy one field, independently of its siblings. The whole value tree
    /// moves as one unit, so nested rows are never partially copied.
    async fn copy_field(
        &self,
        request: &CloneRequest,
        field_key: &str,
    ) -> Result<CopyOutcome, String> {
        let source_value = self
            .provider
            .value_of(request.source_record_id, field_key)
            .await
            .map_err(|e| e.to_string())?;
        let Some(source_value) = source_value else {
            return Ok(CopyOutcome::SkippedNoSource);
        };

        if !request.options.overwrite_existing {
            let target_value = self
                .provider
                .value_of(request.target_record_id, field_key)
                .await
                .map_err(|e| e.to_string())?;
            if target_value.is_some_and(|v| !v.is_empty()) {
                return Ok(CopyOutcome::SkippedProtected);
            }
        }

        let written = self
            .provider
            .set_value(request.target_record_id, field_key, source_value)
            .await
            .map_err(|e| e.to_string())?;
        if written {
            Ok(CopyOutcome::Cloned)
        } else {
            Err("Write was not applied by the storage backend".to_string())
        }
    }
}

enum CopyOutcome {
    Cloned,
    SkippedNoSource,
    SkippedProtected,
}

/// Drop duplicate field keys, keeping first-occurrence order.
fn dedupe_preserving_order(field_keys: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    field_keys
        .iter()
        .filter(|k| seen.insert(k.as_str()))
        .cloned()
        .collect()
}
