//! Field value trees
//!
//! A stored field value is either a scalar leaf or a structural node. The
//! same variant tree is moved whole by clone, snapshot, and restore, so
//! nested structures never need per-kind copy logic.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of a flexible-content field: the chosen layout name plus the
/// sub-field values for that layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LayoutRow {
    pub layout: String,
    #[serde(default)]
    pub values: BTreeMap<String, FieldValue>,
}

/// A field's stored value.
///
/// Maps are keyed by child field `key`. Ordering of rows is significant;
/// ordering of keys within a row is not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldValue {
    /// Scalar leaf (text, number, boolean, url, email, date, image ref)
    Scalar { value: serde_json::Value },
    /// Repeater rows: ordered, each an instance of the same sub-schema
    Rows { rows: Vec<BTreeMap<String, FieldValue>> },
    /// Group: a single set of named sub-field values
    Group { values: BTreeMap<String, FieldValue> },
    /// Flexible content: ordered rows, each tagged with a layout
    Layouts { rows: Vec<LayoutRow> },
}

impl FieldValue {
    /// Convenience constructor for scalar leaves.
    pub fn scalar(value: impl Into<serde_json::Value>) -> Self {
        FieldValue::Scalar {
            value: value.into(),
        }
    }

    /// Whether this value counts as empty for overwrite-protection
    /// purposes. Null and empty-string scalars are empty; structural nodes
    /// are empty when they hold no rows / no child values.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Scalar { value } => match value {
                serde_json::Value::Null => true,
                serde_json::Value::String(s) => s.is_empty(),
                serde_json::Value::Array(a) => a.is_empty(),
                _ => false,
            },
            FieldValue::Rows { rows } => rows.is_empty(),
            FieldValue::Group { values } => values.is_empty(),
            FieldValue::Layouts { rows } => rows.is_empty(),
        }
    }

    /// Number of rows for row-shaped values; 0 for scalars and groups.
    pub fn row_count(&self) -> usize {
        match self {
            FieldValue::Rows { rows } => rows.len(),
            FieldValue::Layouts { rows } => rows.len(),
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_emptiness() {
        assert!(FieldValue::scalar(serde_json::Value::Null).is_empty());
        assert!(FieldValue::scalar("").is_empty());
        assert!(!FieldValue::scalar("100").is_empty());
        assert!(!FieldValue::scalar(0).is_empty());
        assert!(!FieldValue::scalar(false).is_empty());
    }

    #[test]
    fn test_structural_emptiness() {
        assert!(FieldValue::Rows { rows: vec![] }.is_empty());
        assert!(FieldValue::Layouts { rows: vec![] }.is_empty());

        let mut row = BTreeMap::new();
        row.insert("field_caption".to_string(), FieldValue::scalar("a"));
        let rows = FieldValue::Rows { rows: vec![row] };
        assert!(!rows.is_empty());
        assert_eq!(rows.row_count(), 1);
    }

    #[test]
    fn test_nested_value_serialization() {
        let mut inner = BTreeMap::new();
        inner.insert("field_src".to_string(), FieldValue::scalar("https://x/a.png"));
        let mut layout_values = BTreeMap::new();
        layout_values.insert(
            "field_images".to_string(),
            FieldValue::Rows { rows: vec![inner] },
        );
        let value = FieldValue::Layouts {
            rows: vec![LayoutRow {
                layout: "gallery".to_string(),
                values: layout_values,
            }],
        };

        let json = serde_json::to_string(&value).unwrap();
        let parsed: FieldValue = serde_json::from_str(&json).unwrap();
        assert_eq!(value, parsed);
    }
}
