use serde::de::IgnoredAny;

use super::{page, resource_path, space_path, version_of, ManagementClient};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::models::{Collection, ContentType};
use crate::request::{require, segment};

impl ManagementClient {
    /// Lists content types. With `published` set only activated ones are
    /// returned, served from the space's public listing.
    pub fn list_content_types(
        &self,
        space_id: &str,
        published: bool,
        limit: u32,
        skip: u32,
    ) -> Result<Collection<ContentType>> {
        require(space_id, "space id")?;
        let path = if published {
            space_path(space_id, "/public/content_types")
        } else {
            space_path(space_id, "/content_types")
        };
        let req = self
            .api
            .request(HttpMethod::Get, &path)
            .page(page(limit, skip)?)
            .build();
        self.api.execute(req)
    }

    pub fn fetch_content_type(&self, space_id: &str, content_type_id: &str) -> Result<ContentType> {
        require(space_id, "space id")?;
        require(content_type_id, "content type id")?;
        let path = space_path(
            space_id,
            &format!("/content_types/{}", segment(content_type_id)),
        );
        let req = self.api.request(HttpMethod::Get, &path).build();
        self.api.execute(req)
    }

    /// Creates a content type under the id chosen in `sys.id`.
    pub fn create_content_type(&self, content_type: &ContentType) -> Result<ContentType> {
        content_type.validate()?;
        let path = resource_path(content_type, "/content_types", "content type")?;
        let req = self
            .api
            .request(HttpMethod::Put, &path)
            .json(&content_type.payload())?
            .build();
        self.api.execute(req)
    }

    pub fn update_content_type(&self, content_type: &ContentType) -> Result<ContentType> {
        content_type.validate()?;
        let version = version_of(content_type, "content type")?;
        let path = resource_path(content_type, "/content_types", "content type")?;
        let req = self
            .api
            .request(HttpMethod::Put, &path)
            .version(version)
            .json(&content_type.payload())?
            .build();
        self.api.execute(req)
    }

    /// Only inactive content types can be deleted; the server enforces it.
    pub fn delete_content_type(&self, content_type: &ContentType) -> Result<()> {
        let path = resource_path(content_type, "/content_types", "content type")?;
        let req = self.api.request(HttpMethod::Delete, &path).build();
        let _: IgnoredAny = self.api.execute(req)?;
        Ok(())
    }

    /// Publishes the schema so entries can be created against it.
    pub fn activate_content_type(&self, content_type: &ContentType) -> Result<ContentType> {
        let version = version_of(content_type, "content type")?;
        let path = resource_path(content_type, "/content_types", "content type")?;
        let req = self
            .api
            .request(HttpMethod::Put, &format!("{path}/published"))
            .version(version)
            .build();
        self.api.execute(req)
    }

    pub fn deactivate_content_type(&self, content_type: &ContentType) -> Result<ContentType> {
        let path = resource_path(content_type, "/content_types", "content type")?;
        let req = self
            .api
            .request(HttpMethod::Delete, &format!("{path}/published"))
            .build();
        self.api.execute(req)
    }
}
