//! In-memory imitation of the CMS management and delivery APIs.
//!
//! # Design
//! One axum router serves both surfaces; requests carrying the delivery
//! media type only see published content. State lives in a single
//! `RwLock<Store>`: spaces own their content types, entries, assets, locales
//! and API keys. The server enforces the rules a real backend would:
//! bearer auth, optimistic-concurrency versions (409 `VersionMismatch`) and
//! the publish/archive lifecycle. Failures use the API's error envelope.

pub mod error;
pub mod handlers;
pub mod store;

use std::sync::Arc;

use axum::{
    extract::Request,
    http::header::AUTHORIZATION,
    middleware::{self, Next},
    response::Response,
    routing::{get, put},
    Router,
};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

pub use error::ApiError;
pub use store::{Db, Resource, Store, Sys};

use handlers::{api_keys, assets, content_types, entries, locales, spaces};

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route("/spaces", get(spaces::list).post(spaces::create))
        .route(
            "/spaces/{space}",
            get(spaces::fetch).put(spaces::update).delete(spaces::delete),
        )
        .route("/spaces/{space}/content_types", get(content_types::list))
        .route(
            "/spaces/{space}/public/content_types",
            get(content_types::list_public),
        )
        .route(
            "/spaces/{space}/content_types/{id}",
            get(content_types::fetch)
                .put(content_types::put)
                .delete(content_types::delete),
        )
        .route(
            "/spaces/{space}/content_types/{id}/published",
            put(content_types::activate).delete(content_types::deactivate),
        )
        .route(
            "/spaces/{space}/entries",
            get(entries::list).post(entries::create),
        )
        .route(
            "/spaces/{space}/entries/{id}",
            get(entries::fetch).put(entries::update).delete(entries::delete),
        )
        .route(
            "/spaces/{space}/entries/{id}/published",
            put(entries::publish).delete(entries::unpublish),
        )
        .route(
            "/spaces/{space}/entries/{id}/archived",
            put(entries::archive).delete(entries::unarchive),
        )
        .route(
            "/spaces/{space}/assets",
            get(assets::list).post(assets::create),
        )
        .route("/spaces/{space}/public/assets", get(assets::list_public))
        .route(
            "/spaces/{space}/assets/{id}",
            get(assets::fetch).put(assets::update).delete(assets::delete),
        )
        .route(
            "/spaces/{space}/assets/{id}/files/{locale}/process",
            put(assets::process),
        )
        .route(
            "/spaces/{space}/assets/{id}/published",
            put(assets::publish).delete(assets::unpublish),
        )
        .route(
            "/spaces/{space}/assets/{id}/archived",
            put(assets::archive).delete(assets::unarchive),
        )
        .route(
            "/spaces/{space}/locales",
            get(locales::list).post(locales::create),
        )
        .route(
            "/spaces/{space}/locales/{id}",
            get(locales::fetch).put(locales::update).delete(locales::delete),
        )
        .route(
            "/spaces/{space}/api_keys",
            get(api_keys::list).post(api_keys::create),
        )
        .route_layer(middleware::from_fn(authorize))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

/// Any non-empty bearer token is accepted.
async fn authorize(request: Request, next: Next) -> Result<Response, ApiError> {
    let authorized = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        return Err(ApiError::unauthorized());
    }
    debug!(method = %request.method(), uri = %request.uri(), "request");
    Ok(next.run(request).await)
}
