//! Synchronous typed client for a headless CMS REST API.
//!
//! # Overview
//! Two clients share one data model (spaces, content types, entries, assets,
//! locales): `ManagementClient` for read-write authoring and `DeliveryClient`
//! for read-only published content. Every method is one HTTP round trip:
//! validate the input, build an `HttpRequest`, take a rate-limit permit,
//! send it through a `Transport`, and decode the `HttpResponse`.
//!
//! # Design
//! - Requests and responses are plain owned data (`http`); the network sits
//!   behind the `Transport` trait, ureq by default. Tests swap in a
//!   recording transport and assert on the exact request.
//! - The rate limiter is an injected `Arc<dyn Throttle>`, owned by the
//!   client that was constructed with it; there is no global state.
//! - Success and error bodies share an exchange, so `decode` reads both
//!   shapes and the error envelope wins.
//! - No retries, caches or cursor logic. Pagination is caller-driven
//!   `limit`/`skip`, clamped to the surface's ceiling.
//!
//! ```no_run
//! use contentful_core::{ClientConfig, DeliveryClient, Query};
//!
//! let config = ClientConfig::builder("delivery-token").build()?;
//! let client = DeliveryClient::new(config);
//! let page = client.query_entries("space123", &Query::from([("content_type", "blogPost")]), 10, 0)?;
//! for entry in &page.items {
//!     println!("{:?}", entry.field("title", "en-US"));
//! }
//! # Ok::<(), contentful_core::Error>(())
//! ```

pub mod client;
pub mod config;
pub mod decode;
pub mod delivery;
pub mod error;
pub mod http;
pub mod limiter;
pub mod management;
pub mod models;
pub mod request;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::ApiClient;
pub use config::{ClientConfig, ClientConfigBuilder, RateLimitConfig, Surface};
pub use delivery::DeliveryClient;
pub use error::{ApiError, Error, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use limiter::{Clock, RateLimiter, SystemClock, Throttle, Unthrottled};
pub use management::ManagementClient;
pub use models::{
    ApiKey, Asset, Collection, ContentType, Entry, EntryCollection, Field, FieldType, FileUpload,
    HasMetadata, Link, Linkable, Locale, Metadata, NewAsset, NewEntry, Pagination, Space,
};
pub use request::{Page, Query, RequestBuilder};
pub use transport::{Transport, TransportError, UreqTransport};
