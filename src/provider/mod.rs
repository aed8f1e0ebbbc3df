//! External collaborator seams
//!
//! Defines the SchemaProvider trait (field-group registry plus value
//! read/write) and the Authorizer trait consulted during clone validation.
//! The core treats both as synchronous, possibly-failing calls: every
//! operation runs to completion within the calling task.

use crate::models::{FieldGroup, FieldValue};
use async_trait::async_trait;
use uuid::Uuid;

/// Error type for schema/value provider operations
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Record not found: {0}")]
    RecordNotFound(Uuid),
    #[error("Field read failed for {field_key}: {reason}")]
    ReadFailed { field_key: String, reason: String },
    #[error("Field write failed for {field_key}: {reason}")]
    WriteFailed { field_key: String, reason: String },
    #[error("Serialization error: {0}")]
    SerializationError(String),
    #[error("Provider backend error: {0}")]
    BackendError(String),
}

/// Trait for the field-group registry and value storage.
///
/// Implementations own how records, content types, and field values are
/// actually stored; the core only reads schemas and moves whole value trees
/// through `value_of`/`set_value`/`delete_value`.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    /// Content-type identifier of a record, or None for an unknown record
    async fn content_type_of(&self, record_id: Uuid) -> Result<Option<String>, ProviderError>;

    /// Whether a record exists at all
    async fn record_exists(&self, record_id: Uuid) -> Result<bool, ProviderError> {
        Ok(self.content_type_of(record_id).await?.is_some())
    }

    /// Field groups bound to a content type, in registry order
    async fn field_groups_for(&self, content_type: &str) -> Result<Vec<FieldGroup>, ProviderError>;

    /// The stored value for a field key on a record, or None when absent
    async fn value_of(
        &self,
        record_id: Uuid,
        field_key: &str,
    ) -> Result<Option<FieldValue>, ProviderError>;

    /// Store a value for a field key on a record. Returns false when the
    /// backend reports the write was not applied.
    async fn set_value(
        &self,
        record_id: Uuid,
        field_key: &str,
        value: FieldValue,
    ) -> Result<bool, ProviderError>;

    /// Remove a field's value entirely, returning the record to "absent"
    /// for that key. Idempotent.
    async fn delete_value(&self, record_id: Uuid, field_key: &str) -> Result<bool, ProviderError>;
}

/// Trait for write-authorization checks during clone validation.
#[async_trait]
pub trait Authorizer: Send + Sync {
    async fn can_write(&self, actor_id: &str, record_id: Uuid) -> Result<bool, ProviderError>;
}

/// Authorizer that permits every actor. Suitable for embedded/single-user
/// deployments and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

#[async_trait]
impl Authorizer for AllowAll {
    async fn can_write(&self, _actor_id: &str, _record_id: Uuid) -> Result<bool, ProviderError> {
        Ok(true)
    }
}

pub mod memory;
