//! Transport boundary codec
//!
//! Decodes loosely-typed inbound clone payloads into strict `CloneRequest`s
//! and encodes `CloneResult`s into the JSON response envelope. The host's
//! request layer owns framing, authentication, and capability checks; this
//! module only handles the payload shapes.

use crate::config::CloneDefaults;
use crate::models::{BackupInfo, CloneOptions, CloneRequest, CloneResult, FieldError};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A boolean that arrives over a loosely-typed transport.
///
/// Accepts native booleans, the integers `0`/`1`, and the exact strings
/// `"true"`/`"false"`/`"1"`/`"0"` (word forms case-insensitive). Everything
/// else is a deserialization error. The allow-list matters: a truthiness
/// check would read the literal text `"false"` as true and silently
/// disable backups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlexBool(pub bool);

impl From<FlexBool> for bool {
    fn from(flex: FlexBool) -> bool {
        flex.0
    }
}

impl<'de> Deserialize<'de> for FlexBool {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FlexBoolVisitor;

        impl<'de> de::Visitor<'de> for FlexBoolVisitor {
            type Value = FlexBool;

            fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
                formatter.write_str("a boolean, 0/1, or the strings \"true\"/\"false\"/\"1\"/\"0\"")
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<FlexBool, E> {
                Ok(FlexBool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<FlexBool, E> {
                match v {
                    0 => Ok(FlexBool(false)),
                    1 => Ok(FlexBool(true)),
                    _ => Err(E::invalid_value(de::Unexpected::Signed(v), &self)),
                }
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<FlexBool, E> {
                match v {
                    0 => Ok(FlexBool(false)),
                    1 => Ok(FlexBool(true)),
                    _ => Err(E::invalid_value(de::Unexpected::Unsigned(v), &self)),
                }
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<FlexBool, E> {
                match v {
                    "1" => Ok(FlexBool(true)),
                    "0" => Ok(FlexBool(false)),
                    _ if v.eq_ignore_ascii_case("true") => Ok(FlexBool(true)),
                    _ if v.eq_ignore_ascii_case("false") => Ok(FlexBool(false)),
                    _ => Err(E::invalid_value(de::Unexpected::Str(v), &self)),
                }
            }
        }

        deserializer.deserialize_any(FlexBoolVisitor)
    }
}

impl Serialize for FlexBool {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

/// Wire shape of an inbound clone request. Options are optional; omitted
/// ones take the configured defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ClonePayload {
    pub source_record_id: Uuid,
    pub target_record_id: Uuid,
    pub actor_id: String,
    #[serde(default)]
    pub field_keys: Vec<String>,
    #[serde(default)]
    pub create_backup: Option<FlexBool>,
    #[serde(default)]
    pub overwrite_existing: Option<FlexBool>,
}

impl ClonePayload {
    /// Normalize into a strict request, filling omitted options from the
    /// configured defaults.
    pub fn into_request(self, defaults: &CloneDefaults) -> CloneRequest {
        CloneRequest {
            source_record_id: self.source_record_id,
            target_record_id: self.target_record_id,
            actor_id: self.actor_id,
            field_keys: self.field_keys,
            options: CloneOptions {
                create_backup: self
                    .create_backup
                    .map_or(defaults.create_backup, bool::from),
                overwrite_existing: self
                    .overwrite_existing
                    .map_or(defaults.overwrite_existing, bool::from),
            },
        }
    }
}

/// `data.backup_info` in the response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackupInfoPayload {
    pub backup_id: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// `data.operation_summary` in the response envelope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OperationSummary {
    pub total_requested: usize,
    pub successful: usize,
    pub failed: usize,
}

/// `data` in the response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloneResponseData {
    pub cloned_count: usize,
    pub skipped_count: usize,
    pub cloned_fields: Vec<String>,
    pub skipped_fields: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub errors: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup_info: Option<BackupInfoPayload>,
    pub operation_summary: OperationSummary,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// JSON-shaped response handed back to the request layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CloneResponse {
    pub success: bool,
    pub data: CloneResponseData,
}

impl CloneResponse {
    /// Encode a clone result. `total_requested` reflects the original
    /// request's field count.
    pub fn from_result(result: &CloneResult, total_requested: usize) -> Self {
        Self {
            success: result.success,
            data: CloneResponseData {
                cloned_count: result.cloned_fields.len(),
                skipped_count: result.skipped_fields.len(),
                cloned_fields: result.cloned_fields.clone(),
                skipped_fields: result.skipped_fields.clone(),
                errors: result.errors.clone(),
                backup_info: result.backup.as_ref().map(|b: &BackupInfo| {
                    BackupInfoPayload {
                        backup_id: b.backup_id.clone(),
                        created_at: b.created_at,
                    }
                }),
                operation_summary: OperationSummary {
                    total_requested,
                    successful: result.cloned_fields.len(),
                    failed: result.errors.len(),
                },
                message: result.message.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Wrapper {
        value: FlexBool,
    }

    fn parse(json: &str) -> Result<bool, serde_json::Error> {
        serde_json::from_str::<Wrapper>(&format!(r#"{{"value": {json}}}"#))
            .map(|w| w.value.into())
    }

    #[test]
    fn test_flex_bool_truthy_forms() {
        assert_eq!(parse("true").unwrap(), true);
        assert_eq!(parse("1").unwrap(), true);
        assert_eq!(parse(r#""1""#).unwrap(), true);
        assert_eq!(parse(r#""true""#).unwrap(), true);
        assert_eq!(parse(r#""TRUE""#).unwrap(), true);
    }

    #[test]
    fn test_flex_bool_falsy_forms() {
        assert_eq!(parse("false").unwrap(), false);
        assert_eq!(parse("0").unwrap(), false);
        assert_eq!(parse(r#""0""#).unwrap(), false);
        // The critical case: the literal text "false" is false, not a
        // non-empty-string truthy
        assert_eq!(parse(r#""false""#).unwrap(), false);
        assert_eq!(parse(r#""False""#).unwrap(), false);
    }

    #[test]
    fn test_flex_bool_rejects_everything_else() {
        assert!(parse(r#""yes""#).is_err());
        assert!(parse(r#""""#).is_err());
        assert!(parse("2").is_err());
        assert!(parse("-1").is_err());
    }

    #[test]
    fn test_payload_defaults_applied() {
        let defaults = CloneDefaults::default();
        let payload: ClonePayload = serde_json::from_str(&format!(
            r#"{{
                "source_record_id": "{}",
                "target_record_id": "{}",
                "actor_id": "editor-1",
                "field_keys": ["field_price"],
                "overwrite_existing": "1"
            }}"#,
            Uuid::new_v4(),
            Uuid::new_v4()
        ))
        .unwrap();

        let request = payload.into_request(&defaults);
        // Omitted option takes the configured default
        assert!(request.options.create_backup);
        assert!(request.options.overwrite_existing);
    }

    #[test]
    fn test_response_envelope_shape() {
        let result = CloneResult {
            success: true,
            message: None,
            cloned_fields: vec!["field_price".to_string()],
            skipped_fields: vec!["field_gallery".to_string()],
            errors: vec![],
            backup: Some(BackupInfo {
                backup_id: "bkp_abc".to_string(),
                created_at: chrono::Utc::now(),
            }),
        };
        let response = CloneResponse::from_result(&result, 2);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["cloned_count"], 1);
        assert_eq!(json["data"]["skipped_count"], 1);
        assert_eq!(json["data"]["backup_info"]["backup_id"], "bkp_abc");
        assert_eq!(json["data"]["operation_summary"]["total_requested"], 2);
        assert_eq!(json["data"]["operation_summary"]["successful"], 1);
        assert_eq!(json["data"]["operation_summary"]["failed"], 0);
        assert!(json["data"].get("message").is_none());
    }

    #[test]
    fn test_failure_envelope_carries_message() {
        let result = CloneResult::rejected("Source and target records must differ");
        let response = CloneResponse::from_result(&result, 1);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(
            json["data"]["message"],
            "Source and target records must differ"
        );
    }
}
