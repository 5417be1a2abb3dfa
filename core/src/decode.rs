//! Response decoding.
//!
//! The API answers successes and failures inside the same HTTP exchange with
//! different JSON shapes. Every body is therefore read twice: once as the
//! error envelope and once as the expected success type. `Outcome` records
//! which of the two the body turned out to be, and `decode` folds it into a
//! `Result` with this precedence:
//!
//! 1. a transport failure is returned as is (handled before we get here);
//! 2. a non-empty envelope (`message` or `requestId`) is an API error, even
//!    if the success shape also parsed;
//! 3. a non-2xx status without an envelope is `Error::Status`;
//! 4. otherwise the success value. An empty body parses as JSON `null`, so
//!    `()` accepts `204 No Content`.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiErrorSys, Error, Result};
use crate::http::HttpResponse;

/// What a response body turned out to be.
#[derive(Debug)]
pub enum Outcome<T> {
    Success(T),
    Failure(ApiError),
}

impl<T> Outcome<T> {
    pub fn into_result(self) -> Result<T> {
        match self {
            Outcome::Success(value) => Ok(value),
            Outcome::Failure(err) => Err(Error::Api(err)),
        }
    }
}

/// Classify `response` as success or API failure.
pub fn classify<T: DeserializeOwned>(response: &HttpResponse) -> Result<Outcome<T>> {
    let value: Value = if response.body.trim().is_empty() {
        Value::Null
    } else {
        match serde_json::from_str(&response.body) {
            Ok(value) => value,
            Err(e) if response.is_success() => return Err(Error::Decode(e)),
            Err(_) => {
                return Err(Error::Status {
                    status: response.status,
                    body: response.body.clone(),
                })
            }
        }
    };

    let envelope = envelope(&value);
    let success = serde_json::from_value::<T>(value);

    if envelope.is_present() {
        return Ok(Outcome::Failure(envelope));
    }
    if !response.is_success() {
        return Err(Error::Status {
            status: response.status,
            body: response.body.clone(),
        });
    }
    success.map(Outcome::Success).map_err(Error::Decode)
}

/// Decode `response` into `T` or the normalized error.
pub fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T> {
    classify(response)?.into_result()
}

/// Envelope view of an arbitrary body. Each field is read on its own, so a
/// mistyped sibling never hides a `message` or `requestId`. Anything that is
/// not an object yields the zero value.
fn envelope(value: &Value) -> ApiError {
    let Some(object) = value.as_object() else {
        return ApiError::default();
    };
    let sys = object.get("sys");
    ApiError {
        request_id: text(object.get("requestId")),
        message: text(object.get("message")),
        sys: ApiErrorSys {
            kind: text(sys.and_then(|s| s.get("type"))),
            id: text(sys.and_then(|s| s.get("id"))),
        },
        details: object.get("details").filter(|d| !d.is_null()).cloned(),
    }
}

/// Strings as is, numbers in their JSON form, anything else empty.
fn text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}
