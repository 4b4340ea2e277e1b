//! Helpers over the backend's decoded JSON bodies.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::errors::Error;

/// Decoded response body. Its shape is endpoint-specific.
pub type Payload = Value;

/// True when a transport-successful body carries `success: false`.
///
/// Only the boolean `false` counts; bodies without the flag, or with a
/// non-boolean value, are left alone.
pub fn signals_failure(payload: &Payload) -> bool {
    matches!(payload.get("success"), Some(Value::Bool(false)))
}

/// Human-readable description supplied by the backend, if any.
pub fn description(payload: &Payload) -> Option<String> {
    ["message", "error"]
        .iter()
        .filter_map(|key| payload.get(*key).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())
        .map(str::to_string)
}

/// Unwraps a `{ data: ... }` envelope when present, otherwise returns the body as is.
pub fn data_or_self(payload: Payload) -> Payload {
    match payload {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

pub fn decode<T: DeserializeOwned>(payload: Payload) -> Result<T, Error> {
    serde_json::from_value(data_or_self(payload)).map_err(|e| Error::Decode(e.to_string()))
}
