//! Response payload validation.
//!
//! JSON-RPC 1.0 responses must echo the request id and carry both a
//! `result` and an `error` key, even when one is null. A non-null `error`
//! takes precedence over whatever `result` holds.

use serde_json::Value;

use crate::error::{Error, Result};

/// Validate a decoded response payload against the envelope rules and the
/// request id, returning the `result` value on success.
///
/// Each structural violation fails with its own [`Error::InvalidResponse`]
/// message; a validated non-null `error` fails with [`Error::Server`].
pub fn validate_payload(payload: Value, request_id: u64) -> Result<Value> {
    let mut map = match payload {
        Value::Object(map) => map,
        _ => return Err(invalid("response body is not a map")),
    };

    let id = map
        .get("id")
        .ok_or_else(|| invalid("response body is missing the id"))?;
    if *id != Value::from(request_id) {
        return Err(Error::InvalidResponse(format!(
            "response id ({id}) does not match request id ({request_id})"
        )));
    }

    if !map.contains_key("result") || !map.contains_key("error") {
        return Err(invalid("response body must have a result and an error"));
    }

    let error = &map["error"];
    if !error.is_null() {
        let (code, message) = validate_error_body(error)?;
        return Err(Error::Server { code, message });
    }

    Ok(map.remove("result").unwrap_or(Value::Null))
}

fn validate_error_body(error: &Value) -> Result<(i64, String)> {
    let map = error
        .as_object()
        .ok_or_else(|| invalid("response error is not a map"))?;
    let code = map
        .get("code")
        .ok_or_else(|| invalid("response error is missing the code"))?
        .as_i64()
        .ok_or_else(|| invalid("response error code is not an integer"))?;
    let message = map
        .get("message")
        .ok_or_else(|| invalid("response error is missing the message"))?
        .as_str()
        .ok_or_else(|| invalid("response error message is not a string"))?;
    Ok((code, message.to_owned()))
}

fn invalid(message: &str) -> Error {
    Error::InvalidResponse(message.to_owned())
}
