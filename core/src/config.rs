//! Client configuration.
//!
//! A `ClientConfig` is built once and handed to `ManagementClient` or
//! `DeliveryClient`; both read it and never mutate it afterwards.

use std::time::Duration;

use crate::error::{Error, Result};

pub const DEFAULT_API_VERSION: &str = "v1";

/// Page-size ceiling the management API enforces.
pub const MANAGEMENT_PAGE_LIMIT: u32 = 100;

/// Largest page the delivery API will serve.
pub const DELIVERY_PAGE_LIMIT_MAX: u32 = 1000;

pub const ENV_ACCESS_TOKEN: &str = "CONTENTFUL_ACCESS_TOKEN";
pub const ENV_API_VERSION: &str = "CONTENTFUL_API_VERSION";
pub const ENV_BASE_URL: &str = "CONTENTFUL_BASE_URL";

/// Which of the two API surfaces a client talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Delivery,
    Management,
}

impl Surface {
    pub fn default_base_url(&self) -> &'static str {
        match self {
            Surface::Delivery => "https://cdn.contentful.com",
            Surface::Management => "https://api.contentful.com",
        }
    }

    /// Vendor media type sent as `Content-Type`, e.g.
    /// `application/vnd.contentful.management.v1+json`.
    pub fn media_type(&self, api_version: &str) -> String {
        let name = match self {
            Surface::Delivery => "delivery",
            Surface::Management => "management",
        };
        format!("application/vnd.contentful.{name}.{api_version}+json")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub permits: u32,
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            permits: 10,
            window: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub access_token: String,
    pub api_version: String,
    /// Overrides the surface's default host. Trailing slashes are trimmed.
    pub base_url: Option<String>,
    pub rate_limit: RateLimitConfig,
    /// Page ceiling for delivery list/query calls.
    pub delivery_page_limit: u32,
    /// Deadline for a whole HTTP round trip. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn builder(access_token: impl Into<String>) -> ClientConfigBuilder {
        ClientConfigBuilder::new(access_token)
    }

    /// Reads the token, API version and base URL from `CONTENTFUL_*`
    /// environment variables. Only the token is required.
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(ENV_ACCESS_TOKEN)
            .map_err(|_| Error::Config(format!("{ENV_ACCESS_TOKEN} is not set")))?;
        let mut builder = Self::builder(token);
        if let Ok(version) = std::env::var(ENV_API_VERSION) {
            builder = builder.api_version(version);
        }
        if let Ok(url) = std::env::var(ENV_BASE_URL) {
            builder = builder.base_url(url);
        }
        builder.build()
    }

    pub fn validate(&self) -> Result<()> {
        if self.access_token.trim().is_empty() {
            return Err(Error::Config("access token must not be empty".to_string()));
        }
        if self.api_version.trim().is_empty() {
            return Err(Error::Config("api version must not be empty".to_string()));
        }
        if self.rate_limit.permits == 0 {
            return Err(Error::Config("rate limit permits must be greater than 0".to_string()));
        }
        if self.rate_limit.window.is_zero() {
            return Err(Error::Config("rate limit window must be greater than zero".to_string()));
        }
        if self.delivery_page_limit == 0 || self.delivery_page_limit > DELIVERY_PAGE_LIMIT_MAX {
            return Err(Error::Config(format!(
                "delivery page limit must be between 1 and {DELIVERY_PAGE_LIMIT_MAX}"
            )));
        }
        Ok(())
    }

    /// Base URL for `surface` without a trailing slash.
    pub fn base_url_for(&self, surface: Surface) -> String {
        self.base_url
            .as_deref()
            .unwrap_or_else(|| surface.default_base_url())
            .trim_end_matches('/')
            .to_string()
    }
}

#[derive(Debug)]
pub struct ClientConfigBuilder {
    config: ClientConfig,
}

impl ClientConfigBuilder {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            config: ClientConfig {
                access_token: access_token.into(),
                api_version: DEFAULT_API_VERSION.to_string(),
                base_url: None,
                rate_limit: RateLimitConfig::default(),
                delivery_page_limit: MANAGEMENT_PAGE_LIMIT,
                timeout: None,
            },
        }
    }

    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.config.api_version = version.into();
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    pub fn rate_limit(mut self, permits: u32, window: Duration) -> Self {
        self.config.rate_limit = RateLimitConfig { permits, window };
        self
    }

    pub fn delivery_page_limit(mut self, limit: u32) -> Self {
        self.config.delivery_page_limit = limit;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = Some(timeout);
        self
    }

    pub fn build(self) -> Result<ClientConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}
