//! Error responses from the Dental Office API
//!
//! Failed calls usually carry a JSON body with a `message` or `error` field.
//! The first one present becomes the error message; otherwise the HTTP
//! status line is used.

use dentaloffice_domain::DentalOfficeError;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<Value>,
    #[serde(default)]
    error: Option<Value>,
}

/// Human-readable message from an error body, if it has one.
pub fn extract_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    non_empty(parsed.message).or_else(|| non_empty(parsed.error))
}

fn non_empty(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

/// Map a non-2xx response to `DentalOfficeError::Api`.
pub fn map_status_error(status: StatusCode, body: &str, endpoint: &str) -> DentalOfficeError {
    let message = extract_message(body).unwrap_or_else(|| status.to_string());
    DentalOfficeError::Api { status: Some(status.as_u16()), message, endpoint: endpoint.to_string() }
}
