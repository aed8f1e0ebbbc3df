//! Field presence and statistics types produced by the detector

use super::field::{FieldDefinition, FieldGroup};
use serde::{Deserialize, Serialize};

/// Computed state of one field on one record. Never persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldPresenceInfo {
    /// The record holds any value for this field
    pub has_value: bool,
    /// The record holds a non-empty value, so cloning onto it would
    /// overwrite
    pub will_overwrite: bool,
}

/// A top-level field definition paired with its presence state on a record.
///
/// Structural fields are not expanded row-by-row here; callers that need
/// row detail use `FieldDetector::expand_repeater`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DetectedField {
    pub definition: FieldDefinition,
    pub presence: FieldPresenceInfo,
}

/// One field group's worth of detected fields on a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GroupListing {
    pub group_id: String,
    pub group_title: String,
    pub fields: Vec<DetectedField>,
}

impl GroupListing {
    pub fn new(group: &FieldGroup, fields: Vec<DetectedField>) -> Self {
        Self {
            group_id: group.id.clone(),
            group_title: group.title.clone(),
            fields,
        }
    }
}

/// Aggregate counts over a record's bound field groups, used for UI
/// summaries. A record with no bound groups yields all zeros.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldStatistics {
    pub total_fields: usize,
    pub cloneable_fields: usize,
    pub fields_with_values: usize,
    pub group_fields: usize,
    pub repeater_fields: usize,
    pub total_groups: usize,
}
