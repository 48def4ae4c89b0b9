//! Response mapping
//!
//! Successful responses are decoded into a generic JSON value and handed back
//! verbatim. Failures are written to the error log and turned into
//! [`Error::Transport`]; no attempt is made to classify them further.

use crate::error::{Error, Result};
use crate::types::JsonValue;
use reqwest::Response;
use tracing::error;

/// Decode a response body, or map a non-2xx status to a transport failure
pub async fn decode_response(action: &str, response: Response) -> Result<JsonValue> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| transport_failure(action, &e.to_string(), None))?;

    if !status.is_success() {
        return Err(transport_failure(action, &format!("HTTP {status}"), Some(body.as_str())));
    }

    serde_json::from_str(&body).map_err(|e| Error::decode(format!("{action}: {e}")))
}

/// Log a failed request and build the error returned to the caller.
///
/// The response body is preferred over `description` when it is non-empty.
pub fn transport_failure(action: &str, description: &str, body: Option<&str>) -> Error {
    match body.filter(|b| !b.trim().is_empty()) {
        Some(body) => {
            error!("Solr {} error: {}", action, body);
            Error::transport(action, format!("{description}: {body}"))
        }
        None => {
            error!("Solr {} error: {}", action, description);
            Error::transport(action, description)
        }
    }
}
