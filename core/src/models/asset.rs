//! Assets: files with per-locale metadata.
//!
//! An asset is created from a `NewAsset` pointing at an upload URL, then
//! processed (the server fetches and ingests the upload asynchronously), and
//! only then published. Processing is observable by polling for a `url` on
//! the asset's file.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::entry::FieldsPayload;
use super::system::{HasMetadata, Link, Linkable, Metadata};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    #[serde(default)]
    pub sys: Metadata,
    #[serde(default)]
    pub fields: AssetFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssetFields {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub title: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub description: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub file: BTreeMap<String, AssetFile>,
}

/// File metadata for one locale.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetFile {
    /// MIME type.
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub file_name: String,
    /// Set once processing has finished.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Source URL the server ingests from; cleared after processing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upload: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<AssetDetails>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDetails {
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageDetails>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageDetails {
    pub width: u32,
    pub height: u32,
}

impl Asset {
    pub fn title(&self, locale: &str) -> Option<&str> {
        self.fields.title.get(locale).map(String::as_str)
    }

    pub fn file(&self, locale: &str) -> Option<&AssetFile> {
        self.fields.file.get(locale)
    }

    /// True once every locale's file has a served URL.
    pub fn is_processed(&self) -> bool {
        !self.fields.file.is_empty() && self.fields.file.values().all(|f| f.url.is_some())
    }

    pub fn validate(&self) -> Result<()> {
        if self.sys.id.trim().is_empty() {
            return Err(Error::validation("asset id must not be empty"));
        }
        if self.space_id().map_or(true, |id| id.trim().is_empty()) {
            return Err(Error::validation("asset must reference a space"));
        }
        Ok(())
    }

    pub(crate) fn payload(&self) -> FieldsPayload<'_, AssetFields> {
        FieldsPayload {
            fields: &self.fields,
        }
    }
}

impl HasMetadata for Asset {
    fn sys(&self) -> &Metadata {
        &self.sys
    }
}

impl Linkable for Asset {
    fn as_link(&self) -> Link {
        Link::asset(self.sys.id.clone())
    }
}

/// Create payload for an asset, prior to upload processing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAsset {
    /// Target space; part of the path, not the body.
    #[serde(skip)]
    pub space_id: String,
    pub fields: NewAssetFields,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewAssetFields {
    pub title: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub description: BTreeMap<String, String>,
    pub file: BTreeMap<String, FileUpload>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileUpload {
    pub content_type: String,
    pub file_name: String,
    pub upload: String,
}

impl NewAsset {
    pub fn new(space_id: impl Into<String>) -> Self {
        Self {
            space_id: space_id.into(),
            fields: NewAssetFields::default(),
        }
    }

    /// Add a title and file for `locale`.
    pub fn localized(
        mut self,
        locale: impl Into<String>,
        title: impl Into<String>,
        file: FileUpload,
    ) -> Self {
        let locale = locale.into();
        self.fields.title.insert(locale.clone(), title.into());
        self.fields.file.insert(locale, file);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.space_id.trim().is_empty() {
            return Err(Error::validation("new asset space id must not be empty"));
        }
        if self.fields.file.is_empty() {
            return Err(Error::validation("new asset file must not be empty"));
        }
        if self.fields.title.is_empty() {
            return Err(Error::validation("new asset title must not be empty"));
        }
        for (locale, file) in &self.fields.file {
            if file.file_name.trim().is_empty() {
                return Err(Error::validation(format!("file name for {locale} must not be empty")));
            }
            if file.content_type.trim().is_empty() {
                return Err(Error::validation(format!("MIME type for {locale} must not be empty")));
            }
            if file.upload.trim().is_empty() {
                return Err(Error::validation(format!("upload URL for {locale} must not be empty")));
            }
        }
        Ok(())
    }
}
