//! The `sys` envelope and links shared by every resource.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const LINK: &str = "Link";

/// Server-managed metadata. None of it is editable; only `id` may be chosen
/// by the caller on creation (except for spaces).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    /// Optimistic-concurrency token; echoed on every write.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub archived_version: Option<u64>,
}

impl Metadata {
    /// Metadata naming a resource by id inside a space, as needed to address
    /// it for writes.
    pub fn in_space(space_id: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            space: Some(Link::space(space_id)),
            ..Self::default()
        }
    }

    pub fn with_version(mut self, version: u64) -> Self {
        self.version = Some(version);
        self
    }
}

/// Accessors delegated to a resource's `sys`.
pub trait HasMetadata {
    fn sys(&self) -> &Metadata;

    fn id(&self) -> &str {
        &self.sys().id
    }

    fn version(&self) -> Option<u64> {
        self.sys().version
    }

    fn space_id(&self) -> Option<&str> {
        self.sys().space.as_ref().map(Link::id)
    }

    fn content_type_id(&self) -> Option<&str> {
        self.sys().content_type.as_ref().map(Link::id)
    }

    fn is_published(&self) -> bool {
        self.sys().published_at.is_some()
    }

    fn is_archived(&self) -> bool {
        self.sys().archived_at.is_some()
    }
}

/// `{"sys": {"type": "Link", "linkType": ..., "id": ...}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub sys: LinkData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkData {
    #[serde(rename = "type", default = "link_kind")]
    pub kind: String,
    pub link_type: String,
    pub id: String,
}

fn link_kind() -> String {
    LINK.to_string()
}

impl Link {
    pub fn new(link_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            sys: LinkData {
                kind: link_kind(),
                link_type: link_type.into(),
                id: id.into(),
            },
        }
    }

    pub fn space(id: impl Into<String>) -> Self {
        Self::new("Space", id)
    }

    pub fn entry(id: impl Into<String>) -> Self {
        Self::new("Entry", id)
    }

    pub fn asset(id: impl Into<String>) -> Self {
        Self::new("Asset", id)
    }

    pub fn content_type(id: impl Into<String>) -> Self {
        Self::new("ContentType", id)
    }

    pub fn id(&self) -> &str {
        &self.sys.id
    }

    pub fn link_type(&self) -> &str {
        &self.sys.link_type
    }
}

/// Resources that can be referenced by a `Link`.
pub trait Linkable {
    fn as_link(&self) -> Link;
}
