//! Authenticated session client.
//!
//! Owns the session key obtained at construction and presents the uniform
//! call interface the RemoteControl methods forward to. Successful results
//! that carry a `status` sentinel are translated into typed outcomes; a
//! reported session expiry is absorbed by re-authenticating and
//! re-dispatching the call.

use std::sync::{Arc, OnceLock};

use regex_lite::Regex;
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result};
use crate::rpc::RpcClient;
use crate::transport::{HttpTransport, RetryConfig};

/// Client for the RemoteControl API.
///
/// A client owns one session for its lifetime: [`disconnect`](Self::disconnect)
/// releases it at the server and leaves the instance permanently unusable.
/// Calls take `&mut self` (the session key is the one piece of mutable
/// state), so sharing an instance across threads requires external
/// synchronization, e.g. a `Mutex`.
pub struct Client {
    username: String,
    password: String,
    /// `None` once disconnected.
    inner: Option<Inner>,
}

struct Inner {
    rpc: RpcClient,
    session_key: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("username", &self.username)
            .field("connected", &self.inner.is_some())
            .finish()
    }
}

impl Client {
    /// Connect to `endpoint` and authenticate with the given credentials.
    ///
    /// Fails with [`Error::InvalidEndpoint`] for a malformed URI and with
    /// [`Error::InvalidCredentials`] when the server rejects the
    /// username/password combination.
    pub fn new(
        endpoint: &str,
        username: &str,
        password: &str,
        retry: RetryConfig,
    ) -> Result<Self> {
        Self::connect(RpcClient::new(endpoint, retry)?, username, password)
    }

    /// Authenticate through a caller-supplied transport.
    pub fn with_transport(
        transport: Arc<dyn HttpTransport>,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        Self::connect(RpcClient::with_transport(transport), username, password)
    }

    fn connect(rpc: RpcClient, username: &str, password: &str) -> Result<Self> {
        let session_key = authenticate(&rpc, username, password)?;
        Ok(Self {
            username: username.to_owned(),
            password: password.to_owned(),
            inner: Some(Inner { rpc, session_key }),
        })
    }

    /// Is the client ready to send requests to the endpoint?
    pub fn connected(&self) -> bool {
        self.inner.is_some()
    }

    /// Release the session at the server and clear local state.
    ///
    /// Returns `Ok(false)` without touching the server when already
    /// disconnected. A disconnected client cannot be reconnected.
    pub fn disconnect(&mut self) -> Result<bool> {
        if !self.connected() {
            return Ok(false);
        }
        // The release result carries no semantics beyond error propagation.
        self.call("release_session_key", Vec::new())?;
        self.inner = None;
        Ok(true)
    }

    /// Invoke a RemoteControl method with the session key prepended to
    /// `params`, translating `status` sentinels per the sentinel table.
    ///
    /// A result reporting session expiry re-authenticates with the stored
    /// credentials and re-dispatches the same method and arguments with the
    /// fresh key; the caller only observes the final outcome. The expiry
    /// loop has no attempt bound, so a server that never accepts a fresh
    /// key keeps the call spinning. A failed re-authentication propagates
    /// [`Error::InvalidCredentials`].
    pub fn call(&mut self, method: &str, params: Vec<Value>) -> Result<Value> {
        loop {
            let inner = self.inner.as_mut().ok_or(Error::Disconnected)?;
            let mut full_params = Vec::with_capacity(params.len() + 1);
            full_params.push(Value::from(inner.session_key.clone()));
            full_params.extend(params.iter().cloned());

            let result = inner.rpc.invoke(method, full_params)?;
            match interpret(method, result)? {
                Interpretation::Value(value) => return Ok(value),
                Interpretation::SessionExpired => {
                    debug!(method, "session key expired, re-authenticating");
                    inner.session_key = authenticate(&inner.rpc, &self.username, &self.password)?;
                }
            }
        }
    }
}

/// Outcome of applying the sentinel table to one result.
#[derive(Debug)]
enum Interpretation {
    Value(Value),
    SessionExpired,
}

/// Apply the status-sentinel table to a successful RPC result.
///
/// First match wins. Matching is exact and case-sensitive except for the
/// two suffix rules, which fold case; the inconsistency is the server's
/// informal protocol, preserved verbatim rather than generalized.
fn interpret(method: &str, result: Value) -> Result<Interpretation> {
    let map = match result {
        Value::Object(map) => map,
        other => return Ok(Interpretation::Value(other)),
    };
    let status = match map.get("status") {
        None | Some(Value::Null) => return Ok(Interpretation::Value(Value::Object(map))),
        Some(Value::String(status)) => status.clone(),
        // Present but not a string: nothing in the table can match it.
        Some(other) => {
            return Err(Error::Api {
                method: method.to_owned(),
                status: other.to_string(),
            })
        }
    };

    let value = match status.as_str() {
        "OK" => Value::Bool(true),
        "No surveys found" | "No Tokens found" => Value::Array(Vec::new()),
        "No survey participants table" => Value::Bool(false),
        s if s.ends_with("left to send") || s.ends_with("No candidate tokens") => {
            Value::Object(map)
        }
        s if invalid_survey_id().is_match(s) => Value::Null,
        s if invalid_session_key().is_match(s) => return Ok(Interpretation::SessionExpired),
        _ => {
            return Err(Error::Api {
                method: method.to_owned(),
                status,
            })
        }
    };
    Ok(Interpretation::Value(value))
}

fn invalid_survey_id() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Invalid surveyid$").expect("static pattern"))
}

fn invalid_session_key() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)Invalid session key$").expect("static pattern"))
}

/// Obtain a session key with the given credentials.
///
/// The endpoint signals rejected credentials by answering with a mapping
/// instead of the bare key string; the mapping's `status` field becomes the
/// error message when present.
fn authenticate(rpc: &RpcClient, username: &str, password: &str) -> Result<String> {
    let result = rpc.invoke(
        "get_session_key",
        vec![Value::from(username), Value::from(password)],
    )?;
    match result {
        Value::String(session_key) => Ok(session_key),
        Value::Object(map) => Err(Error::InvalidCredentials(failure_message(map))),
        other => Err(Error::InvalidResponse(format!(
            "session key is not a string: {other}"
        ))),
    }
}

fn failure_message(map: Map<String, Value>) -> String {
    match map.get("status") {
        Some(Value::String(status)) => status.clone(),
        _ => Value::Object(map).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapped(method: &str, result: Value) -> Value {
        match interpret(method, result).unwrap() {
            Interpretation::Value(value) => value,
            Interpretation::SessionExpired => panic!("unexpected session expiry"),
        }
    }

    #[test]
    fn ok_maps_to_true() {
        assert_eq!(mapped("activate_survey", json!({"status": "OK"})), json!(true));
    }

    #[test]
    fn empty_collection_sentinels_map_to_empty_array() {
        assert_eq!(mapped("list_surveys", json!({"status": "No surveys found"})), json!([]));
        assert_eq!(mapped("list_participants", json!({"status": "No Tokens found"})), json!([]));
    }

    #[test]
    fn missing_participants_table_maps_to_false() {
        assert_eq!(
            mapped("list_participants", json!({"status": "No survey participants table"})),
            json!(false)
        );
    }

    #[test]
    fn send_tally_sentinels_pass_the_mapping_through() {
        let raw = json!({"status": "2 left to send", "sent": ["a@example.org"]});
        assert_eq!(mapped("invite_participants", raw.clone()), raw);
        let raw = json!({"status": "0 No candidate tokens"});
        assert_eq!(mapped("remind_participants", raw.clone()), raw);
    }

    #[test]
    fn invalid_survey_id_maps_to_null_case_insensitively() {
        assert_eq!(mapped("get_summary", json!({"status": "Invalid surveyid"})), Value::Null);
        assert_eq!(mapped("get_summary", json!({"status": "Error: invalid surveyID"})), Value::Null);
    }

    #[test]
    fn invalid_session_key_is_reported_as_expiry() {
        for status in ["Invalid session key", "Invalid Session Key", "INVALID SESSION KEY"] {
            assert!(matches!(
                interpret("get_summary", json!({ "status": status })).unwrap(),
                Interpretation::SessionExpired
            ));
        }
    }

    #[test]
    fn suffix_rules_do_not_match_mid_string() {
        // "Invalid session key" only counts at the end of the status.
        let err = interpret("get_summary", json!({"status": "Invalid session key detected"}))
            .unwrap_err();
        assert!(matches!(err, Error::Api { .. }));
    }

    #[test]
    fn unknown_status_is_an_api_error_with_method_and_status() {
        let err = interpret("copy_survey", json!({"status": "Copy failed"})).unwrap_err();
        match err {
            Error::Api { method, status } => {
                assert_eq!(method, "copy_survey");
                assert_eq!(status, "Copy failed");
            }
            other => panic!("expected Api, got {other:?}"),
        }
    }

    #[test]
    fn non_string_status_is_an_api_error() {
        let err = interpret("copy_survey", json!({"status": 5})).unwrap_err();
        assert!(matches!(err, Error::Api { ref status, .. } if status == "5"));
    }

    #[test]
    fn results_without_status_pass_through() {
        let raw = json!({"sid": 123, "title": "Customer survey"});
        assert_eq!(mapped("get_survey_properties", raw.clone()), raw);
        assert_eq!(mapped("list_surveys", json!([1, 2, 3])), json!([1, 2, 3]));
        assert_eq!(mapped("get_summary", json!("42")), json!("42"));
        let null_status = json!({"status": null, "rows": 3});
        assert_eq!(mapped("export_responses", null_status.clone()), null_status);
    }
}
