use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use super::{required_str, Body};
use crate::error::ApiError;
use crate::store::{new_id, page, Db, Kind, ListParams, Resource};

pub async fn list(
    State(db): State<Db>,
    Path(space): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    Ok(Json(page(store.space(&space)?.list(Kind::ApiKey), &params)))
}

/// New delivery key with a generated access token.
pub async fn create(
    State(db): State<Db>,
    Path(space): Path<String>,
    Json(body): Json<Body>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let name = required_str(&body, "name")?;
    let mut key = Body::new();
    key.insert("name".into(), Value::from(name));
    if let Some(description) = body.get("description").filter(|d| d.is_string()) {
        key.insert("description".into(), description.clone());
    }
    key.insert("accessToken".into(), Value::from(new_id()));

    let mut store = db.write().await;
    let data = store.space_mut(&space)?;
    let resource = Resource::new(data.sys(Kind::ApiKey, &new_id()), key);
    data.insert(Kind::ApiKey, resource.clone());
    Ok((StatusCode::CREATED, Json(resource)))
}
