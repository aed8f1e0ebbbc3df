//! Field schema types
//!
//! A `FieldGroup` is a named, ordered set of `FieldDefinition`s bound to one
//! or more content types. Structural kinds (repeater, group, flexible
//! content) carry their sub-field schema inline, so a definition is a full
//! tree. Groups serialize to/from YAML via serde.

use serde::{Deserialize, Serialize};

/// One layout of a flexible-content field: a named sub-field schema that a
/// row can choose.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlexLayout {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub children: Vec<FieldDefinition>,
}

/// The kind of a field - determines what shape the stored value takes.
///
/// Scalar kinds hold a single JSON value. Presentational kinds (tab,
/// message) never hold a value and are excluded from cloning. Structural
/// kinds hold nested value trees described by their inline sub-schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum FieldKind {
    Text,
    Textarea,
    Number,
    Boolean,
    Url,
    Email,
    Date,
    Image,
    /// Presentation-only divider in the editing UI. Stores nothing.
    Tab,
    /// Presentation-only informational block. Stores nothing.
    Message,
    /// Ordered rows, each an instance of the same sub-field schema.
    Repeater { children: Vec<FieldDefinition> },
    /// A single set of named sub-field values, no repetition.
    Group { children: Vec<FieldDefinition> },
    /// Ordered rows, each tagged with a chosen layout whose sub-field
    /// schema varies by layout.
    FlexibleContent { layouts: Vec<FlexLayout> },
}

impl FieldKind {
    /// Stable type name as it appears on the wire (kebab-case).
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Textarea => "textarea",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Url => "url",
            FieldKind::Email => "email",
            FieldKind::Date => "date",
            FieldKind::Image => "image",
            FieldKind::Tab => "tab",
            FieldKind::Message => "message",
            FieldKind::Repeater { .. } => "repeater",
            FieldKind::Group { .. } => "group",
            FieldKind::FlexibleContent { .. } => "flexible-content",
        }
    }

    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            FieldKind::Repeater { .. } | FieldKind::Group { .. } | FieldKind::FlexibleContent { .. }
        )
    }

    /// Presentational kinds carry no value and cannot be cloned.
    pub fn is_cloneable(&self) -> bool {
        !matches!(self, FieldKind::Tab | FieldKind::Message)
    }
}

/// A single field definition.
///
/// `key` is globally unique and immutable; all value storage lookups go
/// through it. `name` is the record-scoped name shown to editors.
///
/// # Example
///
/// ```rust
/// use field_clone_sdk::models::{FieldDefinition, FieldKind};
///
/// let field = FieldDefinition::new("field_price", "price", FieldKind::Text);
/// assert!(!field.kind.is_structural());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldDefinition {
    /// Globally unique storage key
    pub key: String,
    /// Record-scoped field name
    pub name: String,
    /// Human-readable label for UI display
    #[serde(default)]
    pub label: String,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDefinition {
    pub fn new(key: impl Into<String>, name: impl Into<String>, kind: FieldKind) -> Self {
        let name = name.into();
        Self {
            key: key.into(),
            label: name.clone(),
            name,
            kind,
        }
    }

    /// Direct children of a repeater or group field; empty for scalar and
    /// flexible-content kinds (flexible content nests per layout).
    pub fn children(&self) -> &[FieldDefinition] {
        match &self.kind {
            FieldKind::Repeater { children } | FieldKind::Group { children } => children,
            _ => &[],
        }
    }
}

/// A named, ordered collection of top-level field definitions scoped to one
/// or more content types. Read-only from the core's perspective.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FieldGroup {
    pub id: String,
    pub title: String,
    /// Content-type identifiers this group is bound to
    #[serde(default)]
    pub content_types: Vec<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

impl FieldGroup {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content_types: Vec::new(),
            fields: Vec::new(),
        }
    }

    /// Parse a field group from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize this field group to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
