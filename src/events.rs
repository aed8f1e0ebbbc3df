//! Domain events emitted after a completed clone
//!
//! The cloner reports each completed copy to an `EventSink` so external
//! observers (audit trails, activity logs) can react without the core
//! knowing about them.

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Emitted once per clone invocation that reaches Finalizing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloneEvent {
    pub source_record_id: Uuid,
    pub target_record_id: Uuid,
    pub cloned_fields: Vec<String>,
}

/// Observer boundary for clone events.
pub trait EventSink: Send + Sync {
    fn clone_completed(&self, event: &CloneEvent);
}

/// Sink that logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn clone_completed(&self, event: &CloneEvent) {
        info!(
            "Cloned {} field(s) from record {} to record {}",
            event.cloned_fields.len(),
            event.source_record_id,
            event.target_record_id
        );
    }
}

/// Sink that drops events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn clone_completed(&self, _event: &CloneEvent) {}
}
