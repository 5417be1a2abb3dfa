use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::asset::Asset;
use super::collection::Pagination;
use super::system::{HasMetadata, Link, Linkable, Metadata};
use crate::error::{Error, Result};

/// Field id -> locale code -> value.
pub type EntryFields = BTreeMap<String, BTreeMap<String, serde_json::Value>>;

/// A content record conforming to a content type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    #[serde(default)]
    pub sys: Metadata,
    #[serde(default)]
    pub fields: EntryFields,
}

impl Entry {
    /// Value of `field` in `locale`.
    pub fn field(&self, field: &str, locale: &str) -> Option<&serde_json::Value> {
        self.fields.get(field)?.get(locale)
    }

    pub fn set_field(
        &mut self,
        field: impl Into<String>,
        locale: impl Into<String>,
        value: serde_json::Value,
    ) {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(locale.into(), value);
    }

    pub fn validate(&self) -> Result<()> {
        if self.space_id().map_or(true, |id| id.trim().is_empty()) {
            return Err(Error::validation("entry must reference a space"));
        }
        if self.sys.id.trim().is_empty() {
            return Err(Error::validation("entry id must not be empty"));
        }
        if self.fields.is_empty() {
            return Err(Error::validation("entry fields must not be empty"));
        }
        Ok(())
    }

    pub(crate) fn payload(&self) -> FieldsPayload<'_, EntryFields> {
        FieldsPayload {
            fields: &self.fields,
        }
    }
}

/// Create payload for an entry; the content type travels in a header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewEntry {
    pub fields: EntryFields,
}

impl NewEntry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(
        mut self,
        field: impl Into<String>,
        locale: impl Into<String>,
        value: serde_json::Value,
    ) -> Self {
        self.fields
            .entry(field.into())
            .or_default()
            .insert(locale.into(), value);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.fields.is_empty() {
            return Err(Error::validation("new entry fields must not be empty"));
        }
        Ok(())
    }
}

/// Writable part of an entry or asset.
#[derive(Debug, Serialize)]
pub(crate) struct FieldsPayload<'a, F> {
    pub(crate) fields: &'a F,
}

impl HasMetadata for Entry {
    fn sys(&self) -> &Metadata {
        &self.sys
    }
}

impl Linkable for Entry {
    fn as_link(&self) -> Link {
        Link::entry(self.sys.id.clone())
    }
}

/// Linked resources resolved by the delivery API's `include` parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Includes {
    #[serde(default, rename = "Entry")]
    pub entries: Vec<Entry>,
    #[serde(default, rename = "Asset")]
    pub assets: Vec<Asset>,
}

/// Delivery entry query result: one page plus resolved links.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub items: Vec<Entry>,
    #[serde(default)]
    pub includes: Includes,
    #[serde(flatten)]
    pub pagination: Pagination,
}

impl EntryCollection {
    /// Look up an included entry by id.
    pub fn included_entry(&self, id: &str) -> Option<&Entry> {
        self.includes.entries.iter().find(|e| e.sys.id == id)
    }

    pub fn included_asset(&self, id: &str) -> Option<&Asset> {
        self.includes.assets.iter().find(|a| a.sys.id == id)
    }
}
