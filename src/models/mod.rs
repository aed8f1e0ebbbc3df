//! Models module for the SDK
//!
//! Defines the core data structures: field schemas, value trees, presence
//! info, clone requests/results, and backup records.

pub mod backup;
pub mod clone_request;
pub mod clone_result;
pub mod field;
pub mod presence;
pub mod value;

pub use backup::{BackupRecord, BackupSummary};
pub use clone_request::{CloneOptions, CloneRequest};
pub use clone_result::{BackupInfo, CloneResult, FieldError};
pub use field::{FieldDefinition, FieldGroup, FieldKind, FlexLayout};
pub use presence::{DetectedField, FieldPresenceInfo, FieldStatistics, GroupListing};
pub use value::{FieldValue, LayoutRow};
