//! Read-only surface serving published content.
//!
//! Entry and asset requests always ask for every locale (`locale=*`), so
//! fields decode into the same field -> locale -> value shape the management
//! surface uses.

use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::{ClientConfig, Surface};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::limiter::Throttle;
use crate::models::{Asset, Collection, ContentType, Entry, EntryCollection, Space};
use crate::request::{require, segment, Page, Query, RequestBuilder};
use crate::transport::Transport;

const ALL_LOCALES: &str = "*";

#[derive(Debug, Clone)]
pub struct DeliveryClient {
    api: ApiClient,
    page_limit: u32,
}

impl DeliveryClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            api: ApiClient::new(Surface::Delivery, &config),
            page_limit: config.delivery_page_limit,
        }
    }

    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        throttle: Arc<dyn Throttle>,
    ) -> Self {
        Self {
            api: ApiClient::with_parts(Surface::Delivery, &config, transport, throttle),
            page_limit: config.delivery_page_limit,
        }
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }

    pub fn fetch_space(&self, space_id: &str) -> Result<Space> {
        require(space_id, "space id")?;
        let req = self.get(space_id, "").build();
        self.api.execute(req)
    }

    pub fn list_content_types(
        &self,
        space_id: &str,
        limit: u32,
        skip: u32,
    ) -> Result<Collection<ContentType>> {
        require(space_id, "space id")?;
        let req = self
            .get(space_id, "/content_types")
            .page(self.page(limit, skip)?)
            .build();
        self.api.execute(req)
    }

    pub fn fetch_content_type(&self, space_id: &str, content_type_id: &str) -> Result<ContentType> {
        require(space_id, "space id")?;
        require(content_type_id, "content type id")?;
        let rest = format!("/content_types/{}", segment(content_type_id));
        let req = self.get(space_id, &rest).build();
        self.api.execute(req)
    }

    /// Search published entries. Linked entries and assets requested with
    /// `include` come back in `EntryCollection::includes`.
    pub fn query_entries(
        &self,
        space_id: &str,
        query: &Query,
        limit: u32,
        skip: u32,
    ) -> Result<EntryCollection> {
        require(space_id, "space id")?;
        let req = self
            .get(space_id, "/entries")
            .query(query)
            .page(self.page(limit, skip)?)
            .param("locale", ALL_LOCALES)
            .build();
        self.api.execute(req)
    }

    pub fn fetch_entry(&self, space_id: &str, entry_id: &str) -> Result<Entry> {
        require(space_id, "space id")?;
        require(entry_id, "entry id")?;
        let rest = format!("/entries/{}", segment(entry_id));
        let req = self
            .get(space_id, &rest)
            .param("locale", ALL_LOCALES)
            .build();
        self.api.execute(req)
    }

    pub fn list_assets(&self, space_id: &str, limit: u32, skip: u32) -> Result<Collection<Asset>> {
        require(space_id, "space id")?;
        let req = self
            .get(space_id, "/assets")
            .page(self.page(limit, skip)?)
            .param("locale", ALL_LOCALES)
            .build();
        self.api.execute(req)
    }

    pub fn fetch_asset(&self, space_id: &str, asset_id: &str) -> Result<Asset> {
        require(space_id, "space id")?;
        require(asset_id, "asset id")?;
        let rest = format!("/assets/{}", segment(asset_id));
        let req = self
            .get(space_id, &rest)
            .param("locale", ALL_LOCALES)
            .build();
        self.api.execute(req)
    }

    fn get(&self, space_id: &str, rest: &str) -> RequestBuilder {
        self.api
            .request(HttpMethod::Get, &format!("/spaces/{}{rest}", segment(space_id)))
    }

    fn page(&self, limit: u32, skip: u32) -> Result<Page> {
        Page::new(limit, skip, self.page_limit)
    }
}
