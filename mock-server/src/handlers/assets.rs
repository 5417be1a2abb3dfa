use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use tracing::debug;

use super::{required_object, transition, Body, Transition};
use crate::error::ApiError;
use crate::store::{check_version, is_delivery, new_id, Db, Kind, ListParams, Resource};

pub async fn list(
    State(db): State<Db>,
    Path(space): Path<String>,
    Query(params): Query<ListParams>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    super::list(&db, Kind::Asset, &space, &params, is_delivery(&headers)).await
}

pub async fn list_public(
    State(db): State<Db>,
    Path(space): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    super::list(&db, Kind::Asset, &space, &params, true).await
}

/// Unprocessed asset: every locale's file must name an `upload` URL.
pub async fn create(
    State(db): State<Db>,
    Path(space): Path<String>,
    Json(body): Json<Body>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let fields = required_object(&body, "fields")?;
    let files = required_object(fields, "file")?;
    if files.is_empty() {
        return Err(ApiError::validation("file must name at least one locale"));
    }
    for (locale, file) in files {
        if file.get("upload").and_then(Value::as_str).is_none() {
            return Err(ApiError::validation(format!("file for {locale} needs an upload URL")));
        }
    }

    let mut store = db.write().await;
    let data = store.space_mut(&space)?;
    let id = new_id();
    let asset = Resource::new(data.sys(Kind::Asset, &id), body);
    data.insert(Kind::Asset, asset.clone());
    debug!(space = %space, id = %id, "asset created");
    Ok((StatusCode::CREATED, Json(asset)))
}

pub async fn fetch(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    super::fetch(&db, Kind::Asset, &space, &id, &headers).await
}

pub async fn update(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Body>,
) -> Result<Json<Resource>, ApiError> {
    required_object(&body, "fields")?;
    super::update(&db, Kind::Asset, &space, &id, &headers, body).await
}

/// Ingest the upload for one locale: the file gains a `url` and loses its
/// `upload`. Completes immediately.
pub async fn process(
    State(db): State<Db>,
    Path((space, id, locale)): Path<(String, String, String)>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    let asset = store.space_mut(&space)?.get_mut(Kind::Asset, &id)?;
    check_version(&headers, asset)?;

    let file = asset
        .body
        .get_mut("fields")
        .and_then(|f| f.get_mut("file"))
        .and_then(|f| f.get_mut(&locale))
        .and_then(Value::as_object_mut)
        .ok_or_else(|| ApiError::validation(format!("no file for locale {locale}")))?;
    let upload = file
        .remove("upload")
        .and_then(|u| u.as_str().map(str::to_string))
        .ok_or_else(|| ApiError::bad_request(format!("file for {locale} is already processed")))?;
    file.insert("url".to_string(), Value::from(upload));
    asset.touch();
    debug!(space = %space, id = %id, locale = %locale, "asset processed");
    Ok(StatusCode::NO_CONTENT)
}

/// Publishing requires every locale's file to be processed.
pub async fn publish(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    {
        let store = db.read().await;
        let asset = store.space(&space)?.get(Kind::Asset, &id)?;
        let processed = asset
            .body
            .get("fields")
            .and_then(|f| f.get("file"))
            .and_then(Value::as_object)
            .is_some_and(|files| files.values().all(|f| f.get("url").is_some()));
        if !processed {
            return Err(ApiError::validation("asset files must be processed before publishing"));
        }
    }
    transition(&db, Kind::Asset, &space, &id, &headers, Transition::Publish).await
}

pub async fn unpublish(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    transition(&db, Kind::Asset, &space, &id, &headers, Transition::Unpublish).await
}

pub async fn archive(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    transition(&db, Kind::Asset, &space, &id, &headers, Transition::Archive).await
}

pub async fn unarchive(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
) -> Result<Json<Resource>, ApiError> {
    transition(&db, Kind::Asset, &space, &id, &headers, Transition::Unarchive).await
}

pub async fn delete(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    super::remove(&db, Kind::Asset, &space, &id).await
}
