//! The request pipeline shared by both API surfaces.
//!
//! # Design
//! `ApiClient` owns everything a call needs besides its own arguments: the
//! base URL, the surface-wide headers, the transport and the throttle. An
//! endpoint method validates its input, builds an `HttpRequest` from
//! `ApiClient::request`, and hands it to `ApiClient::execute`, which takes a
//! rate-limit permit, dispatches, and decodes. Nothing is cached or retried;
//! the only shared mutable state is inside the throttle.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::config::{ClientConfig, Surface};
use crate::decode::decode;
use crate::error::Result;
use crate::http::{HttpMethod, HttpRequest};
use crate::limiter::{RateLimiter, Throttle};
use crate::request::{RequestBuilder, HEADER_CONTENT_TYPE};
use crate::transport::{Transport, UreqTransport};

#[derive(Clone)]
pub struct ApiClient {
    surface: Surface,
    base_url: String,
    access_token: String,
    media_type: String,
    transport: Arc<dyn Transport>,
    throttle: Arc<dyn Throttle>,
}

impl ApiClient {
    /// ureq transport with the configured timeout, throttled by a
    /// `RateLimiter` built from the configured rate.
    pub fn new(surface: Surface, config: &ClientConfig) -> Self {
        let transport = Arc::new(UreqTransport::with_timeout(config.timeout));
        let throttle = Arc::new(RateLimiter::new(
            config.rate_limit.permits,
            config.rate_limit.window,
        ));
        Self::with_parts(surface, config, transport, throttle)
    }

    pub fn with_parts(
        surface: Surface,
        config: &ClientConfig,
        transport: Arc<dyn Transport>,
        throttle: Arc<dyn Throttle>,
    ) -> Self {
        Self {
            surface,
            base_url: config.base_url_for(surface),
            access_token: config.access_token.clone(),
            media_type: surface.media_type(&config.api_version),
            transport,
            throttle,
        }
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// A builder for `path` carrying the authorization and media-type headers.
    pub fn request(&self, method: HttpMethod, path: &str) -> RequestBuilder {
        RequestBuilder::new(method, &self.base_url, path)
            .bearer(&self.access_token)
            .header(HEADER_CONTENT_TYPE, self.media_type.as_str())
    }

    /// Throttle, dispatch and decode one request.
    #[instrument(skip(self, request), fields(method = %request.method, url = %request.url))]
    pub fn execute<T: DeserializeOwned>(&self, request: HttpRequest) -> Result<T> {
        self.throttle.acquire();
        let response = self.transport.send(&request)?;
        debug!(status = response.status, bytes = response.body.len(), "response received");
        decode(&response)
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("surface", &self.surface)
            .field("base_url", &self.base_url)
            .field("media_type", &self.media_type)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::limiter::Unthrottled;
    use crate::testing::Recorder;
    use crate::transport::TransportError;

    fn config() -> ClientConfig {
        ClientConfig::builder("secret").build().unwrap()
    }

    #[test]
    fn request_carries_surface_headers() {
        let recorder = Recorder::new();
        let client = ApiClient::with_parts(
            Surface::Management,
            &config(),
            recorder.clone(),
            Arc::new(Unthrottled),
        );
        let req = client.request(HttpMethod::Get, "/spaces").build();
        assert_eq!(req.url, "https://api.contentful.com/spaces");
        assert_eq!(req.header("Authorization"), Some("Bearer secret"));
        assert_eq!(
            req.header("Content-Type"),
            Some("application/vnd.contentful.management.v1+json")
        );
    }

    #[test]
    fn transport_failure_is_returned_verbatim() {
        let recorder = Recorder::new();
        recorder.fail(TransportError::Timeout);
        let client = ApiClient::with_parts(
            Surface::Delivery,
            &config(),
            recorder.clone(),
            Arc::new(Unthrottled),
        );
        let req = client.request(HttpMethod::Get, "/spaces/s").build();
        let err = client.execute::<serde_json::Value>(req).unwrap_err();
        assert!(matches!(err, Error::Transport(TransportError::Timeout)));
    }

    #[test]
    fn every_execute_takes_a_permit() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        #[derive(Default)]
        struct Counting(AtomicUsize);
        impl Throttle for Counting {
            fn acquire(&self) {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }

        let throttle = Arc::new(Counting::default());
        let client = ApiClient::with_parts(
            Surface::Management,
            &config(),
            Recorder::new(),
            throttle.clone(),
        );
        for _ in 0..3 {
            let req = client.request(HttpMethod::Get, "/spaces").build();
            client.execute::<serde_json::Value>(req).unwrap();
        }
        assert_eq!(throttle.0.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn debug_hides_token() {
        let client = ApiClient::new(Surface::Management, &config());
        let text = format!("{client:?}");
        assert!(!text.contains("secret"));
    }
}
