//! Field detector
//!
//! Answers "what fields exist, and in what state, for record R" without the
//! caller knowing the schema. Walks the field groups bound to the record's
//! content type, reads presence per top-level field, and caches the result
//! per record. The cache is advisory only: the cloner re-reads live values
//! at clone time, so staleness can only produce stale read-side stats,
//! never an incorrect write.

use crate::models::{
    DetectedField, FieldDefinition, FieldKind, FieldPresenceInfo, FieldStatistics, GroupListing,
};
use crate::provider::{ProviderError, SchemaProvider};
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct CachedDetection {
    listings: Vec<GroupListing>,
    statistics: FieldStatistics,
}

/// Detector service over a schema provider, with a per-record cache.
pub struct FieldDetector<P: SchemaProvider> {
    provider: Arc<P>,
    cache: RwLock<HashMap<Uuid, CachedDetection>>,
}

impl<P: SchemaProvider> FieldDetector<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// List the record's fields grouped by field group, with presence info
    /// per top-level field.
    ///
    /// Structural fields are marked but not expanded row-by-row; use
    /// `expand_repeater` for row detail. An unknown record or a record with
    /// no bound field groups yields an empty listing, never an error.
    pub async fn list_fields(&self, record_id: Uuid) -> Result<Vec<GroupListing>, ProviderError> {
        if let Some(cached) = self.cached(record_id) {
            return Ok(cached.listings);
        }
        let detection = self.detect(record_id).await?;
        let listings = detection.listings.clone();
        self.cache
            .write()
            .expect("detector cache lock poisoned")
            .insert(record_id, detection);
        Ok(listings)
    }

    /// Realize the rows of a repeater field on a record as per-child
    /// presence maps.
    ///
    /// A non-repeater definition, or a record with no stored rows, yields
    /// an empty sequence - structural type mismatch is "nothing to
    /// expand," not a fault.
    pub async fn expand_repeater(
        &self,
        definition: &FieldDefinition,
        record_id: Uuid,
    ) -> Result<Vec<BTreeMap<String, FieldPresenceInfo>>, ProviderError> {
        let FieldKind::Repeater { children } = &definition.kind else {
            debug!(
                "expand_repeater called on non-repeater field {} ({})",
                definition.key,
                definition.kind.type_name()
            );
            return Ok(Vec::new());
        };

        let Some(crate::models::FieldValue::Rows { rows }) =
            self.provider.value_of(record_id, &definition.key).await?
        else {
            return Ok(Vec::new());
        };

        let realized = rows
            .iter()
            .map(|row| {
                children
                    .iter()
                    .map(|child| {
                        let presence = match row.get(&child.key) {
                            Some(value) => FieldPresenceInfo {
                                has_value: true,
                                will_overwrite: !value.is_empty(),
                            },
                            None => FieldPresenceInfo {
                                has_value: false,
                                will_overwrite: false,
                            },
                        };
                        (child.key.clone(), presence)
                    })
                    .collect()
            })
            .collect();
        Ok(realized)
    }

    /// Aggregate field counts for a record. All zeros for a record with no
    /// bound field groups.
    pub async fn field_statistics(&self, record_id: Uuid) -> Result<FieldStatistics, ProviderError> {
        if let Some(cached) = self.cached(record_id) {
            return Ok(cached.statistics);
        }
        let detection = self.detect(record_id).await?;
        let statistics = detection.statistics;
        self.cache
            .write()
            .expect("detector cache lock poisoned")
            .insert(record_id, detection);
        Ok(statistics)
    }

    /// Drop cached detection state for one record, or for every record
    /// when `record_id` is None.
    pub fn invalidate(&self, record_id: Option<Uuid>) {
        let mut cache = self.cache.write().expect("detector cache lock poisoned");
        match record_id {
            Some(id) => {
                cache.remove(&id);
            }
            None => cache.clear(),
        }
    }

    fn cached(&self, record_id: Uuid) -> Option<CachedDetection> {
        self.cache
            .read()
            .expect("detector cache lock poisoned")
            .get(&record_id)
            .cloned()
    }

    async fn detect(&self, record_id: Uuid) -> Result<CachedDetection, ProviderError> {
        let Some(content_type) = self.provider.content_type_of(record_id).await? else {
            debug!("Detection on unknown record {}, returning empty listing", record_id);
            return Ok(CachedDetection {
                listings: Vec::new(),
                statistics: FieldStatistics::default(),
            });
        };

        let groups = self.provider.field_groups_for(&content_type).await?;
        let mut listings = Vec::with_capacity(groups.len());
        let mut statistics = FieldStatistics {
            total_groups: groups.len(),
            ..FieldStatistics::default()
        };

        for group in &groups {
            let mut fields = Vec::with_capacity(group.fields.len());
            for definition in &group.fields {
                statistics.total_fields += 1;
                if definition.kind.is_cloneable() {
                    statistics.cloneable_fields += 1;
                }
                match &definition.kind {
                    FieldKind::Group { .. } => statistics.group_fields += 1,
                    FieldKind::Repeater { .. } | FieldKind::FlexibleContent { .. } => {
                        statistics.repeater_fields += 1
                    }
                    _ => {}
                }

                let value = self.provider.value_of(record_id, &definition.key).await?;
                let presence = match &value {
                    Some(v) => FieldPresenceInfo {
                        has_value: true,
                        will_overwrite: !v.is_empty(),
                    },
                    None => FieldPresenceInfo {
                        has_value: false,
                        will_overwrite: false,
                    },
                };
                if presence.has_value {
                    statistics.fields_with_values += 1;
                }
                fields.push(DetectedField {
                    definition: definition.clone(),
                    presence,
                });
            }
            listings.push(GroupListing::new(group, fields));
        }

        info!(
            "Detected {} fields ({} with values) across {} groups for record {}",
            statistics.total_fields,
            statistics.fields_with_values,
            statistics.total_groups,
            record_id
        );
        Ok(CachedDetection {
            listings,
            statistics,
        })
    }
}
