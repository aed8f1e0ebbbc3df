//! Clone result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One field that could not be copied, with the reason.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldError {
    pub field_key: String,
    pub reason: String,
}

/// Identity of a backup created during a clone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupInfo {
    pub backup_id: String,
    pub created_at: DateTime<Utc>,
}

/// Outcome of one clone invocation.
///
/// `success` means the request passed validation and the operation ran to
/// completion - a result with zero cloned fields and everything skipped is
/// still successful. Per-field faults land in `errors` without failing the
/// whole result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloneResult {
    pub success: bool,
    /// Human-readable failure message; set when `success` is false
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub cloned_fields: Vec<String>,
    pub skipped_fields: Vec<String>,
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<BackupInfo>,
}

impl CloneResult {
    /// A request-level rejection: validation failed, nothing was mutated.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            cloned_fields: Vec::new(),
            skipped_fields: Vec::new(),
            errors: Vec::new(),
            backup: None,
        }
    }

    pub fn backup_id(&self) -> Option<&str> {
        self.backup.as_ref().map(|b| b.backup_id.as_str())
    }
}
