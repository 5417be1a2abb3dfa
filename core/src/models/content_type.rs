//! Content types: the schemas entries conform to.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::system::{HasMetadata, Link, Linkable, Metadata};
use crate::error::{Error, Result};

/// Wire name of each field type. Each maps to a JSON type, though there are
/// more field types than JSON types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldType {
    /// Short text, 1 to 256 characters. No ordering or strict equality.
    Symbol,
    /// Long text, up to 50,000 characters.
    Text,
    RichText,
    Integer,
    Number,
    /// ISO 8601, time portion optional.
    Date,
    Location,
    Boolean,
    Link,
    Array,
    Object,
}

/// One allowed field of an entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link_type: Option<String>,
    /// Element schema for `Array` fields.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Field>>,
    #[serde(default)]
    pub localized: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub disabled: bool,
    /// Still present in the management API, hidden from delivery.
    #[serde(default)]
    pub omitted: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub validations: Vec<FieldValidation>,
}

impl Field {
    pub fn new(id: impl Into<String>, name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            field_type,
            link_type: None,
            items: None,
            localized: false,
            required: false,
            disabled: false,
            omitted: false,
            validations: Vec::new(),
        }
    }

    pub fn localized(mut self) -> Self {
        self.localized = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Validation rule attached to a field. Exactly one rule is normally set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<MinMax<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<MinMax<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<MinMax<DateTime<Utc>>>,
    #[serde(default, rename = "regexp", skip_serializing_if = "Option::is_none")]
    pub regular_expression: Option<Regexp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_image_dimensions: Option<ImageDimensions>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link_mimetype_group: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub link_content_type: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub r#in: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMax<T> {
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub min: Option<T>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub max: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Regexp {
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDimensions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<MinMax<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<MinMax<f64>>,
}

/// Schema for the entries of one kind. At most 50 fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentType {
    #[serde(default)]
    pub sys: Metadata,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_field: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl ContentType {
    /// A content type with a caller-chosen id inside `space_id`.
    pub fn new(space_id: impl Into<String>, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            sys: Metadata::in_space(space_id, id),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("content type name must not be empty"));
        }
        if self.space_id().map_or(true, |id| id.trim().is_empty()) {
            return Err(Error::validation("content type must reference a space"));
        }
        if self.sys.id.trim().is_empty() {
            return Err(Error::validation("content type id must not be empty"));
        }
        Ok(())
    }

    pub(crate) fn payload(&self) -> ContentTypePayload<'_> {
        ContentTypePayload {
            name: &self.name,
            description: self.description.as_deref(),
            display_field: self.display_field.as_deref(),
            fields: &self.fields,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ContentTypePayload<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    display_field: Option<&'a str>,
    fields: &'a [Field],
}

impl HasMetadata for ContentType {
    fn sys(&self) -> &Metadata {
        &self.sys
    }
}

impl Linkable for ContentType {
    fn as_link(&self) -> Link {
        Link::content_type(self.sys.id.clone())
    }
}
