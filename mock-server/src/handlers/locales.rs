use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use serde_json::Value;
use tracing::debug;

use super::{required_str, Body};
use crate::error::ApiError;
use crate::store::{check_version, new_id, page, Db, Kind, ListParams, Resource, SpaceData};

/// Body stored for a locale: the client-writable fields plus the
/// server-managed `default` and `internal_code`.
fn locale_body(input: &Body, code: &str, name: &str, default: bool) -> Body {
    let flag = |key: &str, fallback: bool| input.get(key).and_then(Value::as_bool).unwrap_or(fallback);
    let mut body = Body::new();
    body.insert("name".into(), Value::from(name));
    body.insert("code".into(), Value::from(code));
    body.insert("internal_code".into(), Value::from(code));
    body.insert("default".into(), Value::from(default));
    body.insert("optional".into(), Value::from(flag("optional", false)));
    body.insert(
        "fallbackCode".into(),
        input.get("fallbackCode").cloned().unwrap_or(Value::Null),
    );
    body.insert(
        "contentManagementApi".into(),
        Value::from(flag("contentManagementApi", true)),
    );
    body.insert(
        "contentDeliveryApi".into(),
        Value::from(flag("contentDeliveryApi", true)),
    );
    body
}

/// The locale every new space starts with.
pub fn default_locale(data: &SpaceData, code: &str) -> Resource {
    let name = if code == "en-US" { "English (United States)" } else { code };
    Resource::new(
        data.sys(Kind::Locale, &new_id()),
        locale_body(&Body::new(), code, name, true),
    )
}

fn is_default(locale: &Resource) -> bool {
    locale.body.get("default").and_then(Value::as_bool).unwrap_or(false)
}

pub async fn list(
    State(db): State<Db>,
    Path(space): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Value>, ApiError> {
    let store = db.read().await;
    Ok(Json(page(store.space(&space)?.list(Kind::Locale), &params)))
}

pub async fn create(
    State(db): State<Db>,
    Path(space): Path<String>,
    Json(body): Json<Body>,
) -> Result<(StatusCode, Json<Resource>), ApiError> {
    let name = required_str(&body, "name")?;
    let code = required_str(&body, "code")?;

    let mut store = db.write().await;
    let data = store.space_mut(&space)?;
    if data
        .list(Kind::Locale)
        .iter()
        .any(|l| l.str_field("code") == Some(code.as_str()))
    {
        return Err(ApiError::validation(format!("locale code {code} already exists")));
    }
    let locale = Resource::new(
        data.sys(Kind::Locale, &new_id()),
        locale_body(&body, &code, &name, false),
    );
    data.insert(Kind::Locale, locale.clone());
    debug!(space = %space, code = %code, "locale created");
    Ok((StatusCode::CREATED, Json(locale)))
}

pub async fn fetch(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
) -> Result<Json<Resource>, ApiError> {
    let store = db.read().await;
    Ok(Json(store.space(&space)?.get(Kind::Locale, &id)?.clone()))
}

/// `default` cannot be changed through an update.
pub async fn update(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
    headers: HeaderMap,
    Json(body): Json<Body>,
) -> Result<Json<Resource>, ApiError> {
    let name = required_str(&body, "name")?;
    let code = required_str(&body, "code")?;

    let mut store = db.write().await;
    let locale = store.space_mut(&space)?.get_mut(Kind::Locale, &id)?;
    check_version(&headers, locale)?;
    let default = is_default(locale);
    locale.replace(locale_body(&body, &code, &name, default));
    Ok(Json(locale.clone()))
}

pub async fn delete(
    State(db): State<Db>,
    Path((space, id)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    let mut store = db.write().await;
    let data = store.space_mut(&space)?;
    if is_default(data.get(Kind::Locale, &id)?) {
        return Err(ApiError::bad_request("Cannot delete the default locale"));
    }
    data.remove(Kind::Locale, &id)?;
    Ok(StatusCode::NO_CONTENT)
}
