use serde::{Deserialize, Serialize};

use super::system::{HasMetadata, Link, Linkable, Metadata};
use crate::error::{Error, Result};

/// Top-level container for content types, entries, assets and locales.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Space {
    #[serde(default)]
    pub sys: Metadata,
    #[serde(default)]
    pub name: String,
    /// Only honoured on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,
}

impl Space {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("space name must not be empty"));
        }
        Ok(())
    }

    pub(crate) fn payload(&self) -> SpacePayload<'_> {
        SpacePayload {
            name: &self.name,
            default_locale: self.default_locale.as_deref(),
        }
    }
}

/// Writable part of a space.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SpacePayload<'a> {
    name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_locale: Option<&'a str>,
}

impl HasMetadata for Space {
    fn sys(&self) -> &Metadata {
        &self.sys
    }
}

impl Linkable for Space {
    fn as_link(&self) -> Link {
        Link::space(self.sys.id.clone())
    }
}
