use axum::http::{self, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use mock_server::app;
use serde_json::{json, Value};
use tower::ServiceExt;

const MANAGEMENT: &str = "application/vnd.contentful.management.v1+json";
const DELIVERY: &str = "application/vnd.contentful.delivery.v1+json";

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

fn request(method: &str, uri: &str) -> http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(http::header::AUTHORIZATION, "Bearer test-token")
        .header(http::header::CONTENT_TYPE, MANAGEMENT)
}

fn empty(method: &str, uri: &str) -> Request<String> {
    request(method, uri).body(String::new()).unwrap()
}

fn versioned(method: &str, uri: &str, version: u64) -> Request<String> {
    request(method, uri)
        .header("X-Contentful-Version", version.to_string())
        .body(String::new())
        .unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<String> {
    request(method, uri).body(body.to_string()).unwrap()
}

async fn send(app: &Router, req: Request<String>) -> axum::response::Response {
    app.clone().oneshot(req).await.unwrap()
}

async fn create_space(app: &Router) -> String {
    let resp = send(app, json_request("POST", "/spaces", json!({"name": "Blog"}))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["sys"]["id"].as_str().unwrap().to_string()
}

/// Creates and activates `blogPost` in `space`.
async fn active_content_type(app: &Router, space: &str) {
    let uri = format!("/spaces/{space}/content_types/blogPost");
    let resp = send(
        app,
        json_request("PUT", &uri, json!({"name": "Blog Post", "fields": []})),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let resp = send(app, versioned("PUT", &format!("{uri}/published"), 1)).await;
    assert_eq!(resp.status(), StatusCode::OK);
}

// --- auth ---

#[tokio::test]
async fn missing_token_is_rejected_with_envelope() {
    let app = app();
    let resp = app
        .oneshot(Request::builder().uri("/spaces").body(String::new()).unwrap())
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(resp).await;
    assert_eq!(body["sys"]["type"], "Error");
    assert_eq!(body["sys"]["id"], "AccessTokenInvalid");
    assert!(!body["requestId"].as_str().unwrap().is_empty());
}

// --- spaces ---

#[tokio::test]
async fn list_spaces_empty() {
    let app = app();
    let resp = send(&app, empty("GET", "/spaces")).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["sys"]["type"], "Array");
    assert_eq!(body["total"], 0);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn new_space_has_default_locale() {
    let app = app();
    let space = create_space(&app).await;

    let resp = send(&app, empty("GET", &format!("/spaces/{space}/locales"))).await;
    let body = body_json(resp).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["items"][0]["code"], "en-US");
    assert_eq!(body["items"][0]["default"], true);
}

#[tokio::test]
async fn create_space_without_name_returns_422() {
    let app = app();
    let resp = send(&app, json_request("POST", "/spaces", json!({}))).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(resp).await["sys"]["id"], "ValidationFailed");
}

#[tokio::test]
async fn unknown_space_not_found() {
    let app = app();
    let resp = send(&app, empty("GET", "/spaces/missing")).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = body_json(resp).await;
    assert_eq!(body["sys"]["id"], "NotFound");
    assert!(!body["message"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn stale_version_conflicts() {
    let app = app();
    let space = create_space(&app).await;
    let uri = format!("/spaces/{space}");

    let resp = send(
        &app,
        request("PUT", &uri)
            .header("X-Contentful-Version", "7")
            .body(json!({"name": "Renamed"}).to_string())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(resp).await["sys"]["id"], "VersionMismatch");

    let resp = send(
        &app,
        request("PUT", &uri)
            .header("X-Contentful-Version", "1")
            .body(json!({"name": "Renamed"}).to_string())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["name"], "Renamed");
    assert_eq!(body["sys"]["version"], 2);
}

// --- content types ---

#[tokio::test]
async fn public_listing_only_shows_active_content_types() {
    let app = app();
    let space = create_space(&app).await;
    active_content_type(&app, &space).await;
    let resp = send(
        &app,
        json_request(
            "PUT",
            &format!("/spaces/{space}/content_types/draft"),
            json!({"name": "Draft", "fields": []}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let all = body_json(send(&app, empty("GET", &format!("/spaces/{space}/content_types"))).await).await;
    assert_eq!(all["total"], 2);
    let public =
        body_json(send(&app, empty("GET", &format!("/spaces/{space}/public/content_types"))).await).await;
    assert_eq!(public["total"], 1);
    assert_eq!(public["items"][0]["sys"]["id"], "blogPost");
}

#[tokio::test]
async fn active_content_type_cannot_be_deleted() {
    let app = app();
    let space = create_space(&app).await;
    active_content_type(&app, &space).await;
    let uri = format!("/spaces/{space}/content_types/blogPost");

    let resp = send(&app, empty("DELETE", &uri)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let resp = send(&app, empty("DELETE", &format!("{uri}/published"))).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&app, empty("DELETE", &uri)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    assert!(body_bytes(resp).await.is_empty());
}

// --- entries ---

#[tokio::test]
async fn entry_needs_active_content_type() {
    let app = app();
    let space = create_space(&app).await;
    let resp = send(
        &app,
        request("POST", &format!("/spaces/{space}/entries"))
            .header("X-Contentful-Content-Type", "blogPost")
            .body(json!({"fields": {}}).to_string())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn entry_lifecycle() {
    let app = app();
    let space = create_space(&app).await;
    active_content_type(&app, &space).await;

    // create
    let resp = send(
        &app,
        request("POST", &format!("/spaces/{space}/entries"))
            .header("X-Contentful-Content-Type", "blogPost")
            .body(json!({"fields": {"title": {"en-US": "Hello"}}}).to_string())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = body_json(resp).await;
    assert_eq!(created["sys"]["version"], 1);
    assert_eq!(created["sys"]["contentType"]["sys"]["id"], "blogPost");
    let uri = format!("/spaces/{space}/entries/{}", created["sys"]["id"].as_str().unwrap());

    // delivery cannot see drafts
    let resp = send(
        &app,
        Request::builder()
            .uri(&uri)
            .header(http::header::AUTHORIZATION, "Bearer cda")
            .header(http::header::CONTENT_TYPE, DELIVERY)
            .body(String::new())
            .unwrap(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    // publish
    let resp = send(&app, versioned("PUT", &format!("{uri}/published"), 1)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let published = body_json(resp).await;
    assert_eq!(published["sys"]["publishedVersion"], 1);
    assert_eq!(published["sys"]["version"], 2);

    // archive while published is refused
    let resp = send(&app, versioned("PUT", &format!("{uri}/archived"), 2)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // published entries cannot be deleted
    let resp = send(&app, empty("DELETE", &uri)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    // unpublish, archive, unarchive
    let resp = send(&app, versioned("DELETE", &format!("{uri}/published"), 2)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let resp = send(&app, versioned("PUT", &format!("{uri}/archived"), 3)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await["sys"]["archivedAt"].is_string());
    let resp = send(&app, versioned("PUT", &format!("{uri}/published"), 4)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let resp = send(&app, versioned("DELETE", &format!("{uri}/archived"), 4)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    // delete
    let resp = send(&app, empty("DELETE", &uri)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
    let resp = send(&app, empty("GET", &uri)).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn entries_filter_and_paginate() {
    let app = app();
    let space = create_space(&app).await;
    active_content_type(&app, &space).await;
    for i in 0..3 {
        let resp = send(
            &app,
            request("POST", &format!("/spaces/{space}/entries"))
                .header("X-Contentful-Content-Type", "blogPost")
                .body(json!({"fields": {"n": {"en-US": i}}}).to_string())
                .unwrap(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let uri = format!("/spaces/{space}/entries?content_type=blogPost&skip=1&limit=1&include=all");
    let body = body_json(send(&app, empty("GET", &uri)).await).await;
    assert_eq!(body["total"], 3);
    assert_eq!(body["skip"], 1);
    assert_eq!(body["limit"], 1);
    assert_eq!(body["items"].as_array().unwrap().len(), 1);

    let uri = format!("/spaces/{space}/entries?content_type=other");
    let body = body_json(send(&app, empty("GET", &uri)).await).await;
    assert_eq!(body["total"], 0);
}

// --- assets ---

#[tokio::test]
async fn asset_must_be_processed_before_publishing() {
    let app = app();
    let space = create_space(&app).await;
    let resp = send(
        &app,
        json_request(
            "POST",
            &format!("/spaces/{space}/assets"),
            json!({"fields": {
                "title": {"en-US": "Cat"},
                "file": {"en-US": {"contentType": "image/png", "fileName": "cat.png", "upload": "https://example.com/cat.png"}}
            }}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let id = body_json(resp).await["sys"]["id"].as_str().unwrap().to_string();
    let uri = format!("/spaces/{space}/assets/{id}");

    let resp = send(&app, versioned("PUT", &format!("{uri}/published"), 1)).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let resp = send(&app, versioned("PUT", &format!("{uri}/files/en-US/process"), 1)).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let asset = body_json(send(&app, empty("GET", &uri)).await).await;
    let file = &asset["fields"]["file"]["en-US"];
    assert_eq!(file["url"], "https://example.com/cat.png");
    assert!(file.get("upload").is_none());
    assert_eq!(asset["sys"]["version"], 2);

    let resp = send(&app, versioned("PUT", &format!("{uri}/published"), 2)).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let public = body_json(send(&app, empty("GET", &format!("/spaces/{space}/public/assets"))).await).await;
    assert_eq!(public["total"], 1);
}

#[tokio::test]
async fn asset_without_upload_returns_422() {
    let app = app();
    let space = create_space(&app).await;
    let resp = send(
        &app,
        json_request(
            "POST",
            &format!("/spaces/{space}/assets"),
            json!({"fields": {"title": {"en-US": "Cat"}, "file": {"en-US": {"fileName": "cat.png"}}}}),
        ),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// --- locales & api keys ---

#[tokio::test]
async fn locale_codes_are_unique_and_default_is_permanent() {
    let app = app();
    let space = create_space(&app).await;
    let uri = format!("/spaces/{space}/locales");

    let resp = send(&app, json_request("POST", &uri, json!({"name": "German", "code": "de-DE"}))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let german = body_json(resp).await;
    assert_eq!(german["default"], false);

    let resp = send(&app, json_request("POST", &uri, json!({"name": "Again", "code": "de-DE"}))).await;
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let locales = body_json(send(&app, empty("GET", &uri)).await).await;
    let default_id = locales["items"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["default"] == true)
        .unwrap()["sys"]["id"]
        .as_str()
        .unwrap()
        .to_string();
    let resp = send(&app, empty("DELETE", &format!("{uri}/{default_id}"))).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let german_id = german["sys"]["id"].as_str().unwrap();
    let resp = send(&app, empty("DELETE", &format!("{uri}/{german_id}"))).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn api_key_carries_generated_token() {
    let app = app();
    let space = create_space(&app).await;
    let uri = format!("/spaces/{space}/api_keys");

    let resp = send(&app, json_request("POST", &uri, json!({"name": "Website"}))).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let key = body_json(resp).await;
    assert_eq!(key["name"], "Website");
    assert!(!key["accessToken"].as_str().unwrap().is_empty());

    let keys = body_json(send(&app, empty("GET", &uri)).await).await;
    assert_eq!(keys["total"], 1);
}
