//! Error types for the content API client.
//!
//! # Design
//! Three failure kinds reach callers: validation failures raised before any
//! request leaves the process, transport failures from the HTTP layer, and
//! failures the remote API reported in its JSON error envelope. The
//! remaining variants cover payloads that could not be encoded or decoded
//! and non-2xx responses that carried no envelope at all.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::transport::TransportError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Errors returned by every client operation.
#[derive(Debug, Error)]
pub enum Error {
    /// A required argument was missing, empty or out of range. No request
    /// was built and no rate-limit permit was consumed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The HTTP dispatch itself failed.
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// The API answered with its error envelope.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Non-2xx response whose body was not an error envelope.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to encode request body: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode response body: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }

    /// The API error envelope, if the server reported one.
    pub fn api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// Error envelope returned by the API.
///
/// A zero value (empty `message` and `request_id`) means "no error"; see
/// `crate::decode`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Error)]
#[error("{message} (id: {}, request: {request_id})", .sys.id)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[serde(default)]
    pub request_id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub sys: ApiErrorSys,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorSys {
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub id: String,
}

impl ApiError {
    /// True when the envelope carries any error information at all.
    pub fn is_present(&self) -> bool {
        !self.message.is_empty() || !self.request_id.is_empty()
    }

    pub fn is_not_found(&self) -> bool {
        self.sys.id == "NotFound"
    }

    /// The write carried a stale `X-Contentful-Version`.
    pub fn is_version_mismatch(&self) -> bool {
        self.sys.id == "VersionMismatch"
    }
}
