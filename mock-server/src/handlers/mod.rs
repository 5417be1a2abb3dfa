//! Route handlers, one module per resource. The helpers here hold the
//! behaviour entries, assets and content types share.

pub mod api_keys;
pub mod assets;
pub mod content_types;
pub mod entries;
pub mod locales;
pub mod spaces;

use axum::{http::HeaderMap, http::StatusCode, Json};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::ApiError;
use crate::store::{check_version, is_delivery, page, Db, Kind, ListParams, Resource};

pub type Body = Map<String, Value>;

#[derive(Debug, Clone, Copy)]
pub enum Transition {
    Publish,
    Unpublish,
    Archive,
    Unarchive,
}

/// Non-empty string field of a request body.
pub fn required_str(body: &Body, key: &str) -> Result<String, ApiError> {
    body.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ApiError::validation(format!("{key} is required")))
}

/// Object field of a request body.
pub fn required_object<'a>(body: &'a Body, key: &str) -> Result<&'a Body, ApiError> {
    body.get(key)
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::validation(format!("{key} must be an object")))
}

/// List resources of `kind`; delivery requests and public listings only see
/// published ones.
pub async fn list(
    db: &Db,
    kind: Kind,
    space: &str,
    params: &ListParams,
    published_only: bool,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    let items = store
        .space(space)?
        .list(kind)
        .into_iter()
        .filter(|r| !published_only || r.is_published())
        .filter(|r| match &params.content_type {
            Some(ct) => r.sys.content_type.as_ref().is_some_and(|l| &l.sys.id == ct),
            None => true,
        })
        .collect();
    Ok(Json(page(items, params)))
}

pub async fn fetch(
    db: &Db,
    kind: Kind,
    space: &str,
    id: &str,
    headers: &HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    let store = db.read().await;
    let resource = store.space(space)?.get(kind, id)?;
    if is_delivery(headers) && !resource.is_published() {
        return Err(ApiError::not_found());
    }
    Ok(Json(resource.clone()))
}

/// Replace the body of an existing resource at the sent version.
pub async fn update(
    db: &Db,
    kind: Kind,
    space: &str,
    id: &str,
    headers: &HeaderMap,
    body: Body,
) -> Result<Json<Resource>, ApiError> {
    let mut store = db.write().await;
    let resource = store.space_mut(space)?.get_mut(kind, id)?;
    check_version(headers, resource)?;
    resource.replace(body);
    debug!(kind = kind.label(), id, version = resource.sys.version, "updated");
    Ok(Json(resource.clone()))
}

/// Delete a resource; published ones must be unpublished first.
pub async fn remove(db: &Db, kind: Kind, space: &str, id: &str) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    let data = store.space_mut(space)?;
    if data.get(kind, id)?.is_published() {
        return Err(ApiError::bad_request(format!(
            "Cannot delete a published {}",
            kind.label()
        )));
    }
    data.remove(kind, id)?;
    debug!(kind = kind.label(), id, "deleted");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn transition(
    db: &Db,
    kind: Kind,
    space: &str,
    id: &str,
    headers: &HeaderMap,
    step: Transition,
) -> Result<Json<Resource>, ApiError> {
    let mut store = db.write().await;
    let resource = store.space_mut(space)?.get_mut(kind, id)?;
    check_version(headers, resource)?;
    match step {
        Transition::Publish => resource.publish()?,
        Transition::Unpublish => resource.unpublish()?,
        Transition::Archive => resource.archive()?,
        Transition::Unarchive => resource.unarchive()?,
    }
    debug!(kind = kind.label(), id, ?step, version = resource.sys.version, "transitioned");
    Ok(Json(resource.clone()))
}
