//! Field Clone SDK - field detection, cloning, and backup/restore for
//! structured content records
//!
//! Provides unified interfaces for:
//! - Discovering which custom fields exist on a record, including nested
//!   repeater/group/flexible-content structures (detector)
//! - Copying field values between records with per-field fault isolation
//!   (cloner)
//! - Durable pre-clone snapshots with list/restore/delete and retention
//!   (backup)
//! - Boundary decoding of loosely-typed requests and JSON response encoding
//!   (transport)

pub mod backup;
pub mod cloner;
pub mod config;
pub mod detector;
pub mod events;
pub mod models;
pub mod provider;
pub mod transport;

// Re-export commonly used types
pub use provider::{AllowAll, Authorizer, ProviderError, SchemaProvider};
pub use provider::memory::InMemorySchemaProvider;

pub use backup::memory::InMemoryBackupStore;
#[cfg(feature = "native-fs")]
pub use backup::filesystem::FileSystemBackupStore;
pub use backup::{BackupError, BackupManager, BackupStore};
pub use cloner::FieldCloner;
pub use detector::FieldDetector;

pub use config::{CloneDefaults, RetentionPolicy, ServiceConfig};
pub use events::{CloneEvent, EventSink, NullEventSink, TracingEventSink};
pub use transport::{ClonePayload, CloneResponse, FlexBool};

// Re-export models
pub use models::{
    BackupInfo, BackupRecord, BackupSummary, CloneOptions, CloneRequest, CloneResult,
    DetectedField, FieldDefinition, FieldError, FieldGroup, FieldKind, FieldPresenceInfo,
    FieldStatistics, FieldValue, FlexLayout, GroupListing, LayoutRow,
};
