use serde::{Deserialize, Serialize};

use super::system::{HasMetadata, Metadata};

/// A delivery API key. `access_token` is what a `DeliveryClient` is
/// configured with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    #[serde(default)]
    pub sys: Metadata,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub access_token: String,
}

#[derive(Debug, Serialize)]
pub(crate) struct ApiKeyPayload<'a> {
    pub(crate) name: &'a str,
}

impl HasMetadata for ApiKey {
    fn sys(&self) -> &Metadata {
        &self.sys
    }
}
