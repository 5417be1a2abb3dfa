use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use tracing::debug;

use super::{required_str, transition, Body, Transition};
use crate::error::ApiError;
use crate::store::{check_version, is_delivery, Db, Kind, ListParams, Resource};

pub async fn list(
    State(db): State<Db>,
    Path(space): Path<String>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    super::list(&db, Kind::ContentType, &space, &params, is_delivery(&headers)).await
}

pub async fn list_public(
    State(db): State<Db>,
    Path(space): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    super::list(&db, Kind::ContentType, &space, &params, true).await
}

pub async fn fetch(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    super::fetch(&db, Kind::ContentType, &space, &id, &headers).await
}

/// Content types are addressed by a caller-chosen id: an unknown id creates,
/// a known one updates at the sent version.
pub async fn put(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Body>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    required_str(&body, "name")?;
    let mut store = db.write().await;
    let data = store.space_mut(&space)?;
    if data.contains(Kind::ContentType, &id) {
        let ct = data.get_mut(Kind::ContentType, &id)?;
        check_version(&headers, ct)?;
        ct.replace(body);
        return Ok((StatusCode::OK, Json(ct.clone())));
    }
    let ct = Resource::new(data.sys(Kind::ContentType, &id), body);
    data.insert(Kind::ContentType, ct.clone());
    debug!(space = %space, id = %id, "content type created");
    Ok((StatusCode::CREATED, Json(ct)))
}

pub async fn delete(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    let data = store.space_mut(&space)?;
    if data.get(Kind::ContentType, &id)?.is_published() {
        return Err(ApiError::bad_request(
            "Cannot delete an active content type; deactivate it first",
        ));
    }
    data.remove(Kind::ContentType, &id)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn activate(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    transition(&db, Kind::ContentType, &space, &id, &headers, Transition::Publish).await
}

/// Deactivation needs no version.
pub async fn deactivate(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
) -> Result<Json<Resource>, ApiError> {
    let mut store = db.write().await;
    let ct = store.space_mut(&space)?.get_mut(Kind::ContentType, &id)?;
    ct.unpublish()?;
    Ok(Json(ct.clone()))
}
