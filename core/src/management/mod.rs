//! Read-write authoring surface.
//!
//! Endpoint methods are grouped by resource in the submodules; each one is a
//! single request through the shared `ApiClient` pipeline. Writes that target
//! an existing version send it in `X-Contentful-Version` and fail validation
//! when the resource carries no version.

mod api_keys;
mod assets;
mod content_types;
mod entries;
mod locales;
mod spaces;

use std::sync::Arc;

use crate::client::ApiClient;
use crate::config::{ClientConfig, Surface, MANAGEMENT_PAGE_LIMIT};
use crate::error::{Error, Result};
use crate::limiter::Throttle;
use crate::models::HasMetadata;
use crate::request::{require, segment, Page};
use crate::transport::Transport;

#[derive(Debug, Clone)]
pub struct ManagementClient {
    api: ApiClient,
}

impl ManagementClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            api: ApiClient::new(Surface::Management, &config),
        }
    }

    /// Client with a caller-supplied transport and throttle.
    pub fn with_transport(
        config: ClientConfig,
        transport: Arc<dyn Transport>,
        throttle: Arc<dyn Throttle>,
    ) -> Self {
        Self {
            api: ApiClient::with_parts(Surface::Management, &config, transport, throttle),
        }
    }

    pub fn base_url(&self) -> &str {
        self.api.base_url()
    }
}

fn page(limit: u32, skip: u32) -> Result<Page> {
    Page::new(limit, skip, MANAGEMENT_PAGE_LIMIT)
}

/// `/spaces/{space}{rest}` with the space id percent-encoded.
fn space_path(space_id: &str, rest: &str) -> String {
    format!("/spaces/{}{rest}", segment(space_id))
}

/// Path of a space-scoped resource, e.g. `/spaces/s/entries/e`.
fn resource_path<R: HasMetadata>(resource: &R, collection: &str, what: &str) -> Result<String> {
    let space_id = resource.space_id().unwrap_or_default();
    require(space_id, &format!("{what} space id"))?;
    require(resource.id(), &format!("{what} id"))?;
    Ok(format!(
        "{}/{}",
        space_path(space_id, collection),
        segment(resource.id())
    ))
}

fn version_of<R: HasMetadata>(resource: &R, what: &str) -> Result<u64> {
    resource
        .version()
        .ok_or_else(|| Error::validation(format!("{what} version must be set")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Entry, Metadata};

    #[test]
    fn management_page_ceiling_is_100() {
        assert_eq!(page(250, 5).unwrap(), Page { limit: 100, skip: 5 });
        assert!(page(0, 0).is_err());
    }

    #[test]
    fn resource_path_escapes_ids() {
        let entry = Entry {
            sys: Metadata::in_space("my space", "e/1"),
            ..Entry::default()
        };
        assert_eq!(
            resource_path(&entry, "/entries", "entry").unwrap(),
            "/spaces/my%20space/entries/e%2F1"
        );
    }

    #[test]
    fn resource_path_requires_space() {
        let entry = Entry {
            sys: Metadata {
                id: "e1".into(),
                ..Metadata::default()
            },
            ..Entry::default()
        };
        let err = resource_path(&entry, "/entries", "entry").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn missing_version_is_a_validation_error() {
        let entry = Entry {
            sys: Metadata::in_space("s", "e"),
            ..Entry::default()
        };
        assert!(version_of(&entry, "entry").unwrap_err().is_validation());
        let entry = Entry {
            sys: Metadata::in_space("s", "e").with_version(3),
            ..Entry::default()
        };
        assert_eq!(version_of(&entry, "entry").unwrap(), 3);
    }
}
