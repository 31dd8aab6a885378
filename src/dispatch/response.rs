//! Response shaping.
//!
//! # Design Decisions
//! - Only 2xx is success; the error names the logical (un-prefixed) path
//! - Empty bodies decode as JSON `null`, so `()` and `Option<T>` work
//! - Bodies that are not JSON, or whose JSON does not fit the return type,
//!   are retried as a JSON string (plain-text replies)

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::dispatch::transport::InboundResponse;
use crate::error::RestClientError;

const BODY_PREVIEW_CHARS: usize = 256;

pub(crate) fn check_status(path: &str, response: &InboundResponse) -> Result<(), RestClientError> {
    if response.status.is_success() {
        return Ok(());
    }
    Err(RestClientError::RemoteCall {
        path: path.to_string(),
        status: response.status,
        body_preview: response.body.chars().take(BODY_PREVIEW_CHARS).collect(),
    })
}

pub(crate) fn decode<R: DeserializeOwned>(path: &str, body: &str) -> Result<R, RestClientError> {
    let decode_err = |source: serde_json::Error| RestClientError::Decode {
        path: path.to_string(),
        source,
    };

    if body.trim().is_empty() {
        return serde_json::from_value(Value::Null).map_err(decode_err);
    }

    let as_text = || serde_json::from_value::<R>(Value::String(body.to_string()));

    match serde_json::from_str::<Value>(body) {
        // Plain text that happens to parse as a JSON scalar still fits a `String`.
        Ok(value) => serde_json::from_value(value)
            .or_else(|err| as_text().map_err(|_| decode_err(err))),
        Err(_) => as_text().map_err(decode_err),
    }
}
