use serde::de::IgnoredAny;

use super::{page, space_path, version_of, ManagementClient};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::models::{Collection, Space};
use crate::request::{require, HEADER_ORGANIZATION};

impl ManagementClient {
    pub fn list_spaces(&self, limit: u32, skip: u32) -> Result<Collection<Space>> {
        let req = self
            .api
            .request(HttpMethod::Get, "/spaces")
            .page(page(limit, skip)?)
            .build();
        self.api.execute(req)
    }

    pub fn fetch_space(&self, space_id: &str) -> Result<Space> {
        require(space_id, "space id")?;
        let req = self.api.request(HttpMethod::Get, &space_path(space_id, "")).build();
        self.api.execute(req)
    }

    /// Creates a space, optionally under `organization` when the account
    /// belongs to more than one.
    pub fn create_space(&self, space: &Space, organization: Option<&str>) -> Result<Space> {
        space.validate()?;
        let mut builder = self.api.request(HttpMethod::Post, "/spaces");
        if let Some(org) = organization.filter(|o| !o.trim().is_empty()) {
            builder = builder.header(HEADER_ORGANIZATION, org);
        }
        let req = builder.json(&space.payload())?.build();
        self.api.execute(req)
    }

    pub fn update_space(&self, space: &Space) -> Result<Space> {
        space.validate()?;
        require(&space.sys.id, "space id")?;
        let version = version_of(space, "space")?;
        let req = self
            .api
            .request(HttpMethod::Put, &space_path(&space.sys.id, ""))
            .version(version)
            .json(&space.payload())?
            .build();
        self.api.execute(req)
    }

    pub fn delete_space(&self, space_id: &str) -> Result<()> {
        require(space_id, "space id")?;
        let req = self
            .api
            .request(HttpMethod::Delete, &space_path(space_id, ""))
            .build();
        let _: IgnoredAny = self.api.execute(req)?;
        Ok(())
    }
}
