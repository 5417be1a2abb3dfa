use serde::de::IgnoredAny;

use super::{resource_path, space_path, version_of, ManagementClient};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::models::{Collection, Locale};
use crate::request::{require, segment};

impl ManagementClient {
    /// Every locale of the space. Spaces hold few locales, so this is a
    /// single unpaginated call.
    pub fn list_locales(&self, space_id: &str) -> Result<Collection<Locale>> {
        require(space_id, "space id")?;
        let req = self
            .api
            .request(HttpMethod::Get, &space_path(space_id, "/locales"))
            .build();
        self.api.execute(req)
    }

    pub fn create_locale(&self, space_id: &str, locale: &Locale) -> Result<Locale> {
        require(space_id, "space id")?;
        locale.validate()?;
        let req = self
            .api
            .request(HttpMethod::Post, &space_path(space_id, "/locales"))
            .json(&locale.payload())?
            .build();
        self.api.execute(req)
    }

    pub fn fetch_locale(&self, space_id: &str, locale_id: &str) -> Result<Locale> {
        require(space_id, "space id")?;
        require(locale_id, "locale id")?;
        let path = space_path(space_id, &format!("/locales/{}", segment(locale_id)));
        let req = self.api.request(HttpMethod::Get, &path).build();
        self.api.execute(req)
    }

    /// The space and id come from the locale's own metadata.
    pub fn update_locale(&self, locale: &Locale) -> Result<Locale> {
        locale.validate()?;
        let version = version_of(locale, "locale")?;
        let path = resource_path(locale, "/locales", "locale")?;
        let req = self
            .api
            .request(HttpMethod::Put, &path)
            .version(version)
            .json(&locale.payload())?
            .build();
        self.api.execute(req)
    }

    pub fn delete_locale(&self, space_id: &str, locale_id: &str) -> Result<()> {
        require(space_id, "space id")?;
        require(locale_id, "locale id")?;
        let path = space_path(space_id, &format!("/locales/{}", segment(locale_id)));
        let req = self.api.request(HttpMethod::Delete, &path).build();
        let _: IgnoredAny = self.api.execute(req)?;
        Ok(())
    }
}
