use serde::de::IgnoredAny;

use super::{page, resource_path, space_path, version_of, ManagementClient};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::models::{Collection, ContentType, Entry, HasMetadata, NewEntry};
use crate::request::{require, segment, Query, HEADER_CONTENT_TYPE_ID};

impl ManagementClient {
    /// Search entries. `query` carries the API's search parameters (e.g.
    /// `content_type`, `fields.title[match]`, `include`); `limit` and `skip`
    /// override any the caller put in it.
    pub fn query_entries(
        &self,
        space_id: &str,
        query: &Query,
        limit: u32,
        skip: u32,
    ) -> Result<Collection<Entry>> {
        require(space_id, "space id")?;
        let req = self
            .api
            .request(HttpMethod::Get, &space_path(space_id, "/entries"))
            .query(query)
            .page(page(limit, skip)?)
            .build();
        self.api.execute(req)
    }

    pub fn fetch_entry(&self, space_id: &str, entry_id: &str) -> Result<Entry> {
        require(space_id, "space id")?;
        require(entry_id, "entry id")?;
        let path = space_path(space_id, &format!("/entries/{}", segment(entry_id)));
        let req = self.api.request(HttpMethod::Get, &path).build();
        self.api.execute(req)
    }

    /// Creates a draft entry of `content_type` in the content type's space.
    /// The server assigns the id.
    pub fn create_entry(&self, entry: &NewEntry, content_type: &ContentType) -> Result<Entry> {
        entry.validate()?;
        let space_id = content_type.space_id().unwrap_or_default();
        require(space_id, "content type space id")?;
        require(content_type.id(), "content type id")?;
        let req = self
            .api
            .request(HttpMethod::Post, &space_path(space_id, "/entries"))
            .header(HEADER_CONTENT_TYPE_ID, content_type.id())
            .json(entry)?
            .build();
        self.api.execute(req)
    }

    pub fn update_entry(&self, entry: &Entry) -> Result<Entry> {
        entry.validate()?;
        let version = version_of(entry, "entry")?;
        let path = resource_path(entry, "/entries", "entry")?;
        let req = self
            .api
            .request(HttpMethod::Put, &path)
            .version(version)
            .json(&entry.payload())?
            .build();
        self.api.execute(req)
    }

    pub fn delete_entry(&self, entry: &Entry) -> Result<()> {
        let path = resource_path(entry, "/entries", "entry")?;
        let req = self.api.request(HttpMethod::Delete, &path).build();
        let _: IgnoredAny = self.api.execute(req)?;
        Ok(())
    }

    pub fn publish_entry(&self, entry: &Entry) -> Result<Entry> {
        self.transition_entry(entry, HttpMethod::Put, "/published")
    }

    pub fn unpublish_entry(&self, entry: &Entry) -> Result<Entry> {
        self.transition_entry(entry, HttpMethod::Delete, "/published")
    }

    /// Published entries must be unpublished first.
    pub fn archive_entry(&self, entry: &Entry) -> Result<Entry> {
        self.transition_entry(entry, HttpMethod::Put, "/archived")
    }

    pub fn unarchive_entry(&self, entry: &Entry) -> Result<Entry> {
        self.transition_entry(entry, HttpMethod::Delete, "/archived")
    }

    fn transition_entry(&self, entry: &Entry, method: HttpMethod, state: &str) -> Result<Entry> {
        let version = version_of(entry, "entry")?;
        let path = resource_path(entry, "/entries", "entry")?;
        let req = self
            .api
            .request(method, &format!("{path}{state}"))
            .version(version)
            .build();
        self.api.execute(req)
    }
}
