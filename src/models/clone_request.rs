//! Clone request and options
//!
//! These are the strictly-typed forms handed to the cloner. Loosely-typed
//! transport payloads are normalized into them by the transport module.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strict clone options. Boolean normalization from loosely-typed
/// transports happens before this struct is built.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CloneOptions {
    /// Snapshot the target's current values before any write
    pub create_backup: bool,
    /// Copy onto fields that already hold a non-empty value
    pub overwrite_existing: bool,
}

/// A validated-shape request to copy a set of fields from one record to
/// another. `source_record_id != target_record_id` is enforced by the
/// cloner's validation stage, not silently tolerated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloneRequest {
    pub source_record_id: Uuid,
    pub target_record_id: Uuid,
    /// Who triggered the clone; checked against the authorizer and stamped
    /// on any backup created
    pub actor_id: String,
    /// Field keys to copy, in request order
    pub field_keys: Vec<String>,
    pub options: CloneOptions,
}
