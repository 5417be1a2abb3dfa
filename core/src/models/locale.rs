use serde::{Deserialize, Serialize};

use super::system::{HasMetadata, Metadata};
use crate::error::{Error, Result};

/// A translation target for entries and assets, e.g. `en-US`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Locale {
    #[serde(default)]
    pub sys: Metadata,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, rename = "internal_code", skip_serializing_if = "Option::is_none")]
    pub internal_code: Option<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_code: Option<String>,
    #[serde(default = "enabled")]
    pub content_management_api: bool,
    #[serde(default = "enabled")]
    pub content_delivery_api: bool,
}

fn enabled() -> bool {
    true
}

impl Locale {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            content_management_api: true,
            content_delivery_api: true,
            ..Self::default()
        }
    }

    pub fn with_fallback(mut self, code: impl Into<String>) -> Self {
        self.fallback_code = Some(code.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::validation("locale name must not be empty"));
        }
        if self.code.trim().is_empty() {
            return Err(Error::validation("locale code must not be empty"));
        }
        Ok(())
    }

    pub(crate) fn payload(&self) -> LocalePayload<'_> {
        LocalePayload {
            name: &self.name,
            code: &self.code,
            optional: self.optional,
            fallback_code: self.fallback_code.as_deref(),
            content_management_api: self.content_management_api,
            content_delivery_api: self.content_delivery_api,
        }
    }
}

/// Writable part of a locale. `default` is server-managed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LocalePayload<'a> {
    name: &'a str,
    code: &'a str,
    optional: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_code: Option<&'a str>,
    content_management_api: bool,
    content_delivery_api: bool,
}

impl HasMetadata for Locale {
    fn sys(&self) -> &Metadata {
        &self.sys
    }
}
