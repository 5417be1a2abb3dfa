use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use tracing::debug;

use super::{required_str, Body};
use crate::error::ApiError;
use crate::handlers::locales::default_locale;
use crate::store::{check_version, new_id, page, Db, Kind, ListParams, Resource, SpaceData, Sys};

const DEFAULT_LOCALE: &str = "en-US";

fn space_body(name: String) -> Body {
    let mut body = Body::new();
    body.insert("name".to_string(), Value::from(name));
    body
}

pub async fn list(State(db): State<Db>, Query(params): Query<ListParams>) -> Json<Value> {
    let store = db.read().await;
    Json(page(store.spaces(), &params))
}

/// New space with its default locale. `X-Contentful-Organization` is
/// accepted and ignored.
pub async fn create(
    State(db): State<Db>,
    Json(body): Json<Body>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let name = required_str(&body, "name")?;
    let locale = body
        .get("defaultLocale")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_LOCALE)
        .to_string();

    let id = new_id();
    let space = Resource::new(Sys::new(Kind::Space, &id, None), space_body(name));
    let mut data = SpaceData::new(space.clone());
    let locale = default_locale(&data, &locale);
    data.insert(Kind::Locale, locale);

    db.write().await.insert_space(data);
    debug!(space = %id, "space created");
    Ok((StatusCode::CREATED, Json(space)))
}

pub async fn fetch(
    State(db): State<Db>,
    Path(space): Path<String>,
) -> Result<Json<Resource>, ApiError> {
    let store = db.read().await;
    Ok(Json(store.space(&space)?.space.clone()))
}

pub async fn update(
    State(db): State<Db>,
    Path(space): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Body>,
) -> Result<Json<Resource>, ApiError> {
    let name = required_str(&body, "name")?;
    let mut store = db.write().await;
    let data = store.space_mut(&space)?;
    check_version(&headers, &data.space)?;
    data.space.replace(space_body(name));
    Ok(Json(data.space.clone()))
}

pub async fn delete(
    State(db): State<Db>,
    Path(space): Path<String>,
) -> Result<StatusCode, ApiError> {
    db.write().await.remove_space(&space)?;
    debug!(space = %space, "space deleted");
    Ok(StatusCode::NO_CONTENT)
}
