//! In-memory state: spaces and the resources they own.
//!
//! Every resource is kept as its `sys` block plus an opaque JSON body, so
//! the server stores whatever fields the client sends and only interprets
//! the few it needs for lifecycle rules.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::ApiError;

pub type Db = Arc<RwLock<Store>>;

pub const HEADER_VERSION: &str = "x-contentful-version";
pub const HEADER_CONTENT_TYPE_ID: &str = "x-contentful-content-type";

const DEFAULT_LIMIT: usize = 100;
const MAX_LIMIT: usize = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Space,
    ContentType,
    Entry,
    Asset,
    Locale,
    ApiKey,
}

impl Kind {
    pub fn type_name(&self) -> &'static str {
        match self {
            Kind::Space => "Space",
            Kind::ContentType => "ContentType",
            Kind::Entry => "Entry",
            Kind::Asset => "Asset",
            Kind::Locale => "Locale",
            Kind::ApiKey => "ApiKey",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Kind::Space => "space",
            Kind::ContentType => "content type",
            Kind::Entry => "entry",
            Kind::Asset => "asset",
            Kind::Locale => "locale",
            Kind::ApiKey => "api key",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub sys: LinkSys,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSys {
    #[serde(rename = "type")]
    pub kind: String,
    pub link_type: String,
    pub id: String,
}

impl Link {
    pub fn to(link_type: &str, id: &str) -> Self {
        Self {
            sys: LinkSys {
                kind: "Link".to_string(),
                link_type: link_type.to_string(),
                id: id.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sys {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub space: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_version: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_version: Option<u64>,
}

impl Sys {
    pub fn new(kind: Kind, id: &str, space_id: Option<&str>) -> Self {
        let now = Utc::now();
        Self {
            id: id.to_string(),
            kind: kind.type_name().to_string(),
            version: 1,
            created_at: now,
            updated_at: now,
            space: space_id.map(|s| Link::to("Space", s)),
            content_type: None,
            first_published_at: None,
            published_at: None,
            published_version: None,
            archived_at: None,
            archived_version: None,
        }
    }
}

/// One stored resource: server-owned `sys` plus the client-owned body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub sys: Sys,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl Resource {
    pub fn new(sys: Sys, mut body: Map<String, Value>) -> Self {
        body.remove("sys");
        Self { sys, body }
    }

    fn kind_label(&self) -> &'static str {
        match self.sys.kind.as_str() {
            "ContentType" => Kind::ContentType.label(),
            "Asset" => Kind::Asset.label(),
            _ => Kind::Entry.label(),
        }
    }

    pub fn is_published(&self) -> bool {
        self.sys.published_at.is_some()
    }

    pub fn is_archived(&self) -> bool {
        self.sys.archived_at.is_some()
    }

    /// Bump the version after any change.
    pub fn touch(&mut self) {
        self.sys.version += 1;
        self.sys.updated_at = Utc::now();
    }

    /// Replace the client-owned body, keeping `sys`.
    pub fn replace(&mut self, mut body: Map<String, Value>) {
        body.remove("sys");
        self.body = body;
        self.touch();
    }

    pub fn publish(&mut self) -> Result<(), ApiError> {
        if self.is_archived() {
            return Err(ApiError::bad_request(format!(
                "Cannot publish an archived {}",
                self.kind_label()
            )));
        }
        let now = Utc::now();
        self.sys.published_at = Some(now);
        self.sys.first_published_at.get_or_insert(now);
        self.sys.published_version = Some(self.sys.version);
        self.touch();
        Ok(())
    }

    pub fn unpublish(&mut self) -> Result<(), ApiError> {
        if !self.is_published() {
            return Err(ApiError::bad_request(format!(
                "The {} is not published",
                self.kind_label()
            )));
        }
        self.sys.published_at = None;
        self.sys.published_version = None;
        self.touch();
        Ok(())
    }

    pub fn archive(&mut self) -> Result<(), ApiError> {
        if self.is_published() {
            return Err(ApiError::bad_request(format!(
                "Cannot archive a published {}",
                self.kind_label()
            )));
        }
        if self.is_archived() {
            return Err(ApiError::bad_request(format!(
                "The {} is already archived",
                self.kind_label()
            )));
        }
        self.sys.archived_at = Some(Utc::now());
        self.sys.archived_version = Some(self.sys.version);
        self.touch();
        Ok(())
    }

    pub fn unarchive(&mut self) -> Result<(), ApiError> {
        if !self.is_archived() {
            return Err(ApiError::bad_request(format!(
                "The {} is not archived",
                self.kind_label()
            )));
        }
        self.sys.archived_at = None;
        self.sys.archived_version = None;
        self.touch();
        Ok(())
    }

    /// String field of the body.
    pub fn str_field(&self, key: &str) -> Option<&str> {
        self.body.get(key).and_then(Value::as_str)
    }
}

/// A space and everything inside it.
#[derive(Debug, Clone)]
pub struct SpaceData {
    pub space: Resource,
    items: HashMap<Kind, BTreeMap<String, Resource>>,
}

impl SpaceData {
    pub fn new(space: Resource) -> Self {
        Self {
            space,
            items: HashMap::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.space.sys.id
    }

    pub fn get(&self, kind: Kind, id: &str) -> Result<&Resource, ApiError> {
        self.items
            .get(&kind)
            .and_then(|m| m.get(id))
            .ok_or_else(ApiError::not_found)
    }

    pub fn get_mut(&mut self, kind: Kind, id: &str) -> Result<&mut Resource, ApiError> {
        self.items
            .get_mut(&kind)
            .and_then(|m| m.get_mut(id))
            .ok_or_else(ApiError::not_found)
    }

    pub fn contains(&self, kind: Kind, id: &str) -> bool {
        self.items.get(&kind).is_some_and(|m| m.contains_key(id))
    }

    pub fn insert(&mut self, kind: Kind, resource: Resource) {
        self.items
            .entry(kind)
            .or_default()
            .insert(resource.sys.id.clone(), resource);
    }

    pub fn remove(&mut self, kind: Kind, id: &str) -> Result<Resource, ApiError> {
        self.items
            .get_mut(&kind)
            .and_then(|m| m.remove(id))
            .ok_or_else(ApiError::not_found)
    }

    pub fn list(&self, kind: Kind) -> Vec<&Resource> {
        self.items
            .get(&kind)
            .map(|m| m.values().collect())
            .unwrap_or_default()
    }

    /// A new resource of `kind` in this space.
    pub fn sys(&self, kind: Kind, id: &str) -> Sys {
        Sys::new(kind, id, Some(self.id()))
    }
}

#[derive(Debug, Default)]
pub struct Store {
    spaces: BTreeMap<String, SpaceData>,
}

impl Store {
    pub fn space(&self, id: &str) -> Result<&SpaceData, ApiError> {
        self.spaces.get(id).ok_or_else(ApiError::not_found)
    }

    pub fn space_mut(&mut self, id: &str) -> Result<&mut SpaceData, ApiError> {
        self.spaces.get_mut(id).ok_or_else(ApiError::not_found)
    }

    pub fn insert_space(&mut self, data: SpaceData) {
        self.spaces.insert(data.id().to_string(), data);
    }

    pub fn remove_space(&mut self, id: &str) -> Result<SpaceData, ApiError> {
        self.spaces.remove(id).ok_or_else(ApiError::not_found)
    }

    pub fn spaces(&self) -> Vec<&Resource> {
        self.spaces.values().map(|d| &d.space).collect()
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

/// Reject writes whose `X-Contentful-Version` is missing or stale.
pub fn check_version(headers: &HeaderMap, resource: &Resource) -> Result<(), ApiError> {
    let sent = headers
        .get(HEADER_VERSION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    match sent {
        Some(v) if v == resource.sys.version => Ok(()),
        _ => Err(ApiError::version_mismatch()),
    }
}

/// Requests carrying the delivery media type only see published content.
pub fn is_delivery(headers: &HeaderMap) -> bool {
    headers
        .get(axum::http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains(".delivery."))
}

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub skip: Option<usize>,
    pub limit: Option<usize>,
    pub content_type: Option<String>,
}

/// `{"sys": {"type": "Array"}, "total", "skip", "limit", "items"}` for one
/// page of `items`.
pub fn page(items: Vec<&Resource>, params: &ListParams) -> Value {
    let skip = params.skip.unwrap_or(0);
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let total = items.len();
    let items: Vec<&Resource> = items.into_iter().skip(skip).take(limit).collect();
    json!({
        "sys": {"type": "Array"},
        "total": total,
        "skip": skip,
        "limit": limit,
        "items": items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> Resource {
        Resource::new(
            Sys::new(Kind::Entry, "e1", Some("s1")),
            json!({"fields": {}, "sys": {"id": "ignored"}})
                .as_object()
                .cloned()
                .unwrap(),
        )
    }

    #[test]
    fn body_never_holds_sys() {
        let e = entry();
        assert!(!e.body.contains_key("sys"));
        let json = serde_json::to_value(&e).unwrap();
        assert_eq!(json["sys"]["id"], "e1");
        assert_eq!(json["sys"]["space"]["sys"]["linkType"], "Space");
    }

    #[test]
    fn publish_records_version_and_bumps() {
        let mut e = entry();
        e.publish().unwrap();
        assert_eq!(e.sys.published_version, Some(1));
        assert_eq!(e.sys.version, 2);
        assert!(e.sys.first_published_at.is_some());
    }

    #[test]
    fn archive_requires_unpublished() {
        let mut e = entry();
        e.publish().unwrap();
        assert_eq!(e.archive().unwrap_err().status, axum::http::StatusCode::BAD_REQUEST);
        e.unpublish().unwrap();
        e.archive().unwrap();
        assert!(e.publish().is_err());
        e.unarchive().unwrap();
        assert!(!e.is_archived());
    }

    #[test]
    fn version_check() {
        let e = entry();
        let mut headers = HeaderMap::new();
        assert!(check_version(&headers, &e).is_err());
        headers.insert(HEADER_VERSION, "2".parse().unwrap());
        assert!(check_version(&headers, &e).is_err());
        headers.insert(HEADER_VERSION, "1".parse().unwrap());
        assert!(check_version(&headers, &e).is_ok());
    }

    #[test]
    fn page_slices_and_reports_total() {
        let a = entry();
        let b = entry();
        let c = entry();
        let params = ListParams {
            skip: Some(1),
            limit: Some(1),
            content_type: None,
        };
        let value = page(vec![&a, &b, &c], &params);
        assert_eq!(value["total"], 3);
        assert_eq!(value["skip"], 1);
        assert_eq!(value["limit"], 1);
        assert_eq!(value["items"].as_array().unwrap().len(), 1);
    }
}
