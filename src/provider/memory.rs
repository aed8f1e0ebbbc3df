//! In-memory schema provider
//!
//! Reference implementation of `SchemaProvider` backed by plain maps.
//! Used by tests and demos, and as an embeddable backend for hosts that
//! manage their own schema registry in process.

use super::{ProviderError, SchemaProvider};
use crate::models::{FieldGroup, FieldValue};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// In-memory record/value table plus a static field-group registry.
pub struct InMemorySchemaProvider {
    /// record -> content type
    records: RwLock<HashMap<Uuid, String>>,
    /// content type -> bound groups, in registration order
    groups: RwLock<HashMap<String, Vec<FieldGroup>>>,
    /// (record, field key) -> stored value
    values: RwLock<HashMap<(Uuid, String), FieldValue>>,
}

impl InMemorySchemaProvider {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            groups: RwLock::new(HashMap::new()),
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Register a record under a content type, returning its new id.
    pub fn add_record(&self, content_type: &str) -> Uuid {
        let id = Uuid::new_v4();
        self.records
            .write()
            .expect("records lock poisoned")
            .insert(id, content_type.to_string());
        id
    }

    /// Bind a field group to every content type it names.
    pub fn register_group(&self, group: FieldGroup) {
        let mut groups = self.groups.write().expect("groups lock poisoned");
        for content_type in &group.content_types {
            groups
                .entry(content_type.clone())
                .or_default()
                .push(group.clone());
        }
    }

    /// Parse a YAML field-group document and register it.
    pub fn register_group_yaml(&self, yaml: &str) -> Result<(), ProviderError> {
        let group = FieldGroup::from_yaml(yaml)
            .map_err(|e| ProviderError::SerializationError(e.to_string()))?;
        self.register_group(group);
        Ok(())
    }

    /// Seed a stored value directly, bypassing the provider trait.
    pub fn seed_value(&self, record_id: Uuid, field_key: &str, value: FieldValue) {
        self.values
            .write()
            .expect("values lock poisoned")
            .insert((record_id, field_key.to_string()), value);
    }
}

impl Default for InMemorySchemaProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaProvider for InMemorySchemaProvider {
    async fn content_type_of(&self, record_id: Uuid) -> Result<Option<String>, ProviderError> {
        Ok(self
            .records
            .read()
            .expect("records lock poisoned")
            .get(&record_id)
            .cloned())
    }

    async fn field_groups_for(&self, content_type: &str) -> Result<Vec<FieldGroup>, ProviderError> {
        Ok(self
            .groups
            .read()
            .expect("groups lock poisoned")
            .get(content_type)
            .cloned()
            .unwrap_or_default())
    }

    async fn value_of(
        &self,
        record_id: Uuid,
        field_key: &str,
    ) -> Result<Option<FieldValue>, ProviderError> {
        Ok(self
            .values
            .read()
            .expect("values lock poisoned")
            .get(&(record_id, field_key.to_string()))
            .cloned())
    }

    async fn set_value(
        &self,
        record_id: Uuid,
        field_key: &str,
        value: FieldValue,
    ) -> Result<bool, ProviderError> {
        if !self
            .records
            .read()
            .expect("records lock poisoned")
            .contains_key(&record_id)
        {
            return Err(ProviderError::RecordNotFound(record_id));
        }
        self.values
            .write()
            .expect("values lock poisoned")
            .insert((record_id, field_key.to_string()), value);
        Ok(true)
    }

    async fn delete_value(&self, record_id: Uuid, field_key: &str) -> Result<bool, ProviderError> {
        Ok(self
            .values
            .write()
            .expect("values lock poisoned")
            .remove(&(record_id, field_key.to_string()))
            .is_some())
    }
}
