use super::{page, space_path, ManagementClient};
use crate::error::Result;
use crate::http::HttpMethod;
use crate::models::api_key::ApiKeyPayload;
use crate::models::{ApiKey, Collection};
use crate::request::require;

impl ManagementClient {
    pub fn list_api_keys(&self, space_id: &str, limit: u32, skip: u32) -> Result<Collection<ApiKey>> {
        require(space_id, "space id")?;
        let req = self
            .api
            .request(HttpMethod::Get, &space_path(space_id, "/api_keys"))
            .page(page(limit, skip)?)
            .build();
        self.api.execute(req)
    }

    /// Creates a delivery key; its `access_token` configures a
    /// `DeliveryClient`.
    pub fn create_api_key(&self, space_id: &str, name: &str) -> Result<ApiKey> {
        require(space_id, "space id")?;
        require(name, "api key name")?;
        let req = self
            .api
            .request(HttpMethod::Post, &space_path(space_id, "/api_keys"))
            .json(&ApiKeyPayload { name })?
            .build();
        self.api.execute(req)
    }
}
