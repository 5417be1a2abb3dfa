use serde::de::IgnoredAny;

use super::{page, resource_path, space_path, version_of, ManagementClient};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::models::{Asset, Collection, NewAsset};
use crate::request::{require, segment};

impl ManagementClient {
    /// Lists assets; `published` restricts to the public listing.
    pub fn list_assets(
        &self,
        space_id: &str,
        published: bool,
        limit: u32,
        skip: u32,
    ) -> Result<Collection<Asset>> {
        require(space_id, "space id")?;
        let path = if published {
            space_path(space_id, "/public/assets")
        } else {
            space_path(space_id, "/assets")
        };
        let req = self
            .api
            .request(HttpMethod::Get, &path)
            .page(page(limit, skip)?)
            .build();
        self.api.execute(req)
    }

    pub fn fetch_asset(&self, space_id: &str, asset_id: &str) -> Result<Asset> {
        require(space_id, "space id")?;
        require(asset_id, "asset id")?;
        let path = space_path(space_id, &format!("/assets/{}", segment(asset_id)));
        let req = self.api.request(HttpMethod::Get, &path).build();
        self.api.execute(req)
    }

    /// Creates an unprocessed asset; follow with `process_asset` for each
    /// locale before publishing.
    pub fn create_asset(&self, asset: &NewAsset) -> Result<Asset> {
        asset.validate()?;
        let req = self
            .api
            .request(HttpMethod::Post, &space_path(&asset.space_id, "/assets"))
            .json(asset)?
            .build();
        self.api.execute(req)
    }

    pub fn update_asset(&self, asset: &Asset) -> Result<Asset> {
        asset.validate()?;
        let version = version_of(asset, "asset")?;
        let path = resource_path(asset, "/assets", "asset")?;
        let req = self
            .api
            .request(HttpMethod::Put, &path)
            .version(version)
            .json(&asset.payload())?
            .build();
        self.api.execute(req)
    }

    /// Asks the server to ingest the upload for `locale`. Processing is
    /// asynchronous: poll `fetch_asset` until the file has a `url`.
    pub fn process_asset(&self, asset: &Asset, locale: &str) -> Result<()> {
        asset.validate()?;
        require(locale, "locale")?;
        let version = version_of(asset, "asset")?;
        let path = resource_path(asset, "/assets", "asset")?;
        let req = self
            .api
            .request(
                HttpMethod::Put,
                &format!("{path}/files/{}/process", segment(locale)),
            )
            .version(version)
            .build();
        let _: IgnoredAny = self.api.execute(req)?;
        Ok(())
    }

    pub fn publish_asset(&self, asset: &Asset) -> Result<Asset> {
        self.transition_asset(asset, HttpMethod::Put, "/published")
    }

    pub fn unpublish_asset(&self, asset: &Asset) -> Result<Asset> {
        self.transition_asset(asset, HttpMethod::Delete, "/published")
    }

    pub fn archive_asset(&self, asset: &Asset) -> Result<Asset> {
        self.transition_asset(asset, HttpMethod::Put, "/archived")
    }

    pub fn unarchive_asset(&self, asset: &Asset) -> Result<Asset> {
        self.transition_asset(asset, HttpMethod::Delete, "/archived")
    }

    pub fn delete_asset(&self, asset: &Asset) -> Result<()> {
        asset.validate()?;
        let path = resource_path(asset, "/assets", "asset")?;
        let req = self.api.request(HttpMethod::Delete, &path).build();
        let _: IgnoredAny = self.api.execute(req)?;
        Ok(())
    }

    fn transition_asset(&self, asset: &Asset, method: HttpMethod, state: &str) -> Result<Asset> {
        asset.validate()?;
        let version = version_of(asset, "asset")?;
        let path = resource_path(asset, "/assets", "asset")?;
        let req = self
            .api
            .request(method, &format!("{path}{state}"))
            .version(version)
            .build();
        self.api.execute(req)
    }
}
