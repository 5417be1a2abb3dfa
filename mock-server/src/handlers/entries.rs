use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use tracing::debug;

use super::{required_object, transition, Body, Transition};
use crate::error::ApiError;
use crate::store::{is_delivery, new_id, Db, Kind, Link, ListParams, Resource, HEADER_CONTENT_TYPE_ID};

/// Entries of the space, optionally narrowed by `content_type`.
pub async fn list(
    State(db): State<Db>,
    Path(space): Path<String>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    super::list(&db, Kind::Entry, &space, &params, is_delivery(&headers)).await
}

/// Draft entry of the content type named in `X-Contentful-Content-Type`,
/// which must exist and be active.
pub async fn create(
    State(db): State<Db>,
    Path(space): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Body>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    required_object(&body, "fields")?;
    let ct_id = headers
        .get(HEADER_CONTENT_TYPE_ID)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| ApiError::validation("X-Contentful-Content-Type header is required"))?
        .to_string();

    let mut store = db.write().await;
    let data = store.space_mut(&space)?;
    let active = data
        .get(Kind::ContentType, &ct_id)
        .map_err(|_| ApiError::validation(format!("Unknown content type {ct_id}")))?
        .is_published();
    if !active {
        return Err(ApiError::validation(format!(
            "Content type {ct_id} is not active"
        )));
    }

    let id = new_id();
    let mut sys = data.sys(Kind::Entry, &id);
    sys.content_type = Some(Link::to("ContentType", &ct_id));
    let entry = Resource::new(sys, body);
    data.insert(Kind::Entry, entry.clone());
    debug!(space = %space, id = %id, content_type = %ct_id, "entry created");
    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn fetch(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    super::fetch(&db, Kind::Entry, &space, &id, &headers).await
}

pub async fn update(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Body>,
) -> Result<Json<Resource>, ApiError> {
    required_object(&body, "fields")?;
    super::update(&db, Kind::Entry, &space, &id, &headers, body).await
}

pub async fn delete(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    super::remove(&db, Kind::Entry, &space, &id).await
}

pub async fn publish(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    transition(&db, Kind::Entry, &space, &id, &headers, Transition::Publish).await
}

pub async fn unpublish(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    transition(&db, Kind::Entry, &space, &id, &headers, Transition::Unpublish).await
}

pub async fn archive(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    transition(&db, Kind::Entry, &space, &id, &headers, Transition::Archive).await
}

pub async fn unarchive(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    transition(&db, Kind::Entry, &space, &id, &headers, Transition::Unarchive).await
}
