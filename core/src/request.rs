//! Request construction.
//!
//! `RequestBuilder` turns a verb, a path and optional query/body into an
//! `HttpRequest`. The surface-wide headers (authorization and the vendor
//! media type) are stamped on by the client before a builder is handed to an
//! endpoint method; endpoints add the per-call pieces.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::http::{HttpMethod, HttpRequest};

pub const HEADER_AUTHORIZATION: &str = "Authorization";
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
pub const HEADER_VERSION: &str = "X-Contentful-Version";
pub const HEADER_CONTENT_TYPE_ID: &str = "X-Contentful-Content-Type";
pub const HEADER_ORGANIZATION: &str = "X-Contentful-Organization";

/// Query parameters. Keys are unique; setting an existing key replaces its
/// value. Encoded in key order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(BTreeMap<String, String>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Merge `other` into `self`; `other` wins on conflicts.
    pub fn extend(&mut self, other: &Query) {
        for (k, v) in &other.0 {
            self.0.insert(k.clone(), v.clone());
        }
    }

    /// `k=v&k2=v2` with percent-encoded keys and values.
    pub fn encode(&self) -> String {
        self.0
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Query {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: u32,
    pub skip: u32,
}

impl Page {
    /// Rejects a zero `limit` and clamps anything above `ceiling` down to it.
    pub fn new(limit: u32, skip: u32, ceiling: u32) -> Result<Self> {
        if limit == 0 {
            return Err(Error::validation("limit must be greater than 0"));
        }
        Ok(Self {
            limit: limit.min(ceiling),
            skip,
        })
    }

    fn apply(&self, query: &mut Query) {
        query.set("skip", self.skip.to_string());
        query.set("limit", self.limit.to_string());
    }
}

/// Reject an empty or whitespace-only identifier.
pub(crate) fn require(value: &str, what: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::validation(format!("{what} must not be empty")));
    }
    Ok(())
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: HttpMethod,
    url: String,
    query: Query,
    headers: Vec<(String, String)>,
    body: Option<String>,
}

impl RequestBuilder {
    /// `path` is appended to `base_url` and must start with `/`.
    pub fn new(method: HttpMethod, base_url: &str, path: &str) -> Self {
        Self {
            method,
            url: format!("{base_url}{path}"),
            query: Query::new(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// Set a header, replacing any previous value with the same name.
    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header(HEADER_AUTHORIZATION, format!("Bearer {token}"))
    }

    /// Optimistic-concurrency token for writes against a known version.
    pub fn version(self, version: u64) -> Self {
        self.header(HEADER_VERSION, version.to_string())
    }

    /// Caller-supplied parameters, applied before pagination and defaults.
    pub fn query(mut self, query: &Query) -> Self {
        self.query.extend(query);
        self
    }

    pub fn param(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.set(key, value);
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        page.apply(&mut self.query);
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        let body = serde_json::to_string(body).map_err(Error::Encode)?;
        self.body = Some(body);
        Ok(self)
    }

    pub fn build(self) -> HttpRequest {
        let url = if self.query.is_empty() {
            self.url
        } else {
            format!("{}?{}", self.url, self.query.encode())
        };
        HttpRequest {
            method: self.method,
            url,
            headers: self.headers,
            body: self.body,
        }
    }
}
