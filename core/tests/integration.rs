//! Full authoring lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives both clients over
//! real HTTP through the default ureq transport and rate limiter. Checks that
//! request building, versioning and response decoding agree with a server
//! that enforces the same rules as the real API.

use std::time::Duration;

use contentful_core::{
    ClientConfig, ContentType, DeliveryClient, Error, Field, FieldType, FileUpload, HasMetadata,
    Locale, ManagementClient, NewAsset, NewEntry, Query, Space, TransportError,
};
use pretty_assertions::assert_eq;
use serde_json::json;

fn start_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

fn config(base_url: &str, token: &str) -> ClientConfig {
    ClientConfig::builder(token)
        .base_url(base_url)
        .rate_limit(50, Duration::from_secs(1))
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

#[test]
fn authoring_lifecycle() {
    let base = start_server();
    let cma = ManagementClient::new(config(&base, "cma-token"));

    // Step 1: space with its default locale.
    let space = cma.create_space(&Space::new("Integration"), None).unwrap();
    let space_id = space.id().to_string();
    assert_eq!(space.name, "Integration");
    assert_eq!(space.version(), Some(1));
    let fetched = cma.fetch_space(&space_id).unwrap();
    assert_eq!(fetched.sys.id, space_id);

    let locales = cma.list_locales(&space_id).unwrap();
    assert_eq!(locales.len(), 1);
    assert!(locales.items[0].default);
    assert_eq!(locales.items[0].code, "en-US");

    // Step 2: an extra locale, updated at its version.
    let german = cma
        .create_locale(&space_id, &Locale::new("German", "de-DE").with_fallback("en-US"))
        .unwrap();
    assert_eq!(german.fallback_code.as_deref(), Some("en-US"));
    let mut renamed = german.clone();
    renamed.name = "Deutsch".into();
    let renamed = cma.update_locale(&renamed).unwrap();
    assert_eq!(renamed.name, "Deutsch");
    assert_eq!(renamed.version(), Some(2));

    // Step 3: content type, created then activated.
    let mut blog_post = ContentType::new(space_id.as_str(), "blogPost", "Blog Post");
    blog_post.display_field = Some("title".into());
    blog_post
        .fields
        .push(Field::new("title", "Title", FieldType::Symbol).required().localized());
    let blog_post = cma.create_content_type(&blog_post).unwrap();
    assert_eq!(blog_post.fields.len(), 1);
    let blog_post = cma.activate_content_type(&blog_post).unwrap();
    assert!(blog_post.is_published());

    let public = cma.list_content_types(&space_id, true, 10, 0).unwrap();
    assert_eq!(public.pagination.total, 1);

    // Step 4: entry create, update, publish.
    let entry = cma
        .create_entry(
            &NewEntry::new().field("title", "en-US", json!("Hello")),
            &blog_post,
        )
        .unwrap();
    assert_eq!(entry.content_type_id(), Some("blogPost"));
    assert_eq!(entry.space_id(), Some(space_id.as_str()));

    let mut edited = entry.clone();
    edited.set_field("title", "de-DE", json!("Hallo"));
    let edited = cma.update_entry(&edited).unwrap();
    assert_eq!(edited.field("title", "de-DE"), Some(&json!("Hallo")));
    assert_eq!(edited.version(), Some(2));

    // A stale version is refused by the server.
    let err = cma.update_entry(&entry).unwrap_err();
    assert!(err.api().is_some_and(|e| e.is_version_mismatch()), "{err:?}");

    let published = cma.publish_entry(&edited).unwrap();
    assert!(published.is_published());

    let found = cma
        .query_entries(&space_id, &Query::from([("content_type", "blogPost")]), 500, 0)
        .unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found.pagination.limit, 100);

    // Step 5: delivery sees the published entry in every locale.
    let key = cma.create_api_key(&space_id, "Website").unwrap();
    let cda = DeliveryClient::new(config(&base, &key.access_token));
    let delivered = cda.fetch_entry(&space_id, published.id()).unwrap();
    assert_eq!(delivered.field("title", "en-US"), Some(&json!("Hello")));
    let page = cda
        .query_entries(&space_id, &Query::from([("include", "2")]), 10, 0)
        .unwrap();
    assert_eq!(page.items.len(), 1);

    // Step 6: archive needs an unpublish first.
    let err = cma.archive_entry(&published).unwrap_err();
    assert!(matches!(err, Error::Api(_)), "{err:?}");
    let draft = cma.unpublish_entry(&published).unwrap();
    assert!(!draft.is_published());
    let archived = cma.archive_entry(&draft).unwrap();
    assert!(archived.is_archived());
    let restored = cma.unarchive_entry(&archived).unwrap();
    cma.delete_entry(&restored).unwrap();
    let err = cma.fetch_entry(&space_id, restored.id()).unwrap_err();
    assert!(err.api().is_some_and(|e| e.is_not_found()));

    // Step 7: asset create, process, poll, publish.
    let upload = FileUpload {
        content_type: "image/png".into(),
        file_name: "cat.png".into(),
        upload: "https://example.com/cat.png".into(),
    };
    let asset = cma
        .create_asset(&NewAsset::new(space_id.as_str()).localized("en-US", "Cat", upload))
        .unwrap();
    assert!(!asset.is_processed());
    cma.process_asset(&asset, "en-US").unwrap();
    let asset = cma.fetch_asset(&space_id, asset.id()).unwrap();
    assert!(asset.is_processed());
    assert_eq!(
        asset.file("en-US").and_then(|f| f.url.as_deref()),
        Some("https://example.com/cat.png")
    );
    let asset = cma.publish_asset(&asset).unwrap();
    let delivered = cda.fetch_asset(&space_id, asset.id()).unwrap();
    assert_eq!(delivered.title("en-US"), Some("Cat"));
    assert_eq!(cda.list_assets(&space_id, 10, 0).unwrap().len(), 1);
    let asset = cma.unpublish_asset(&asset).unwrap();
    cma.delete_asset(&asset).unwrap();

    // Step 8: tear down the content type and the space.
    let blog_post = cma.deactivate_content_type(&blog_post).unwrap();
    cma.delete_content_type(&blog_post).unwrap();
    cma.delete_locale(&space_id, renamed.id()).unwrap();
    cma.delete_space(&space_id).unwrap();
    let err = cma.fetch_space(&space_id).unwrap_err();
    assert!(err.api().is_some_and(|e| e.is_not_found()));
}

#[test]
fn delivery_does_not_see_drafts() {
    let base = start_server();
    let cma = ManagementClient::new(config(&base, "cma-token"));
    let space = cma.create_space(&Space::new("Drafts"), None).unwrap();
    let ct = cma
        .create_content_type(&ContentType::new(space.id(), "note", "Note"))
        .unwrap();
    let ct = cma.activate_content_type(&ct).unwrap();
    let draft = cma
        .create_entry(&NewEntry::new().field("body", "en-US", json!("wip")), &ct)
        .unwrap();

    let cda = DeliveryClient::new(config(&base, "cda-token"));
    let err = cda.fetch_entry(space.id(), draft.id()).unwrap_err();
    assert!(err.api().is_some_and(|e| e.is_not_found()), "{err:?}");
    let page = cda.query_entries(space.id(), &Query::new(), 10, 0).unwrap();
    assert!(page.items.is_empty());

    // The management surface still lists it.
    assert_eq!(cma.list_content_types(space.id(), false, 10, 0).unwrap().len(), 1);
    assert_eq!(cma.query_entries(space.id(), &Query::new(), 10, 0).unwrap().len(), 1);
}

#[test]
fn unreachable_server_is_a_transport_error() {
    let cma = ManagementClient::new(config("http://127.0.0.1:9", "t"));
    let err = cma.fetch_space("s").unwrap_err();
    assert!(
        matches!(
            err,
            Error::Transport(TransportError::Connection(_) | TransportError::Other(_))
        ),
        "{err:?}"
    );
}
