//! JSON-RPC 1.0 transport component.
//!
//! One [`RpcClient::invoke`] is one validated HTTP round trip: serialize
//! the envelope, POST it, then check the response structurally before
//! handing the `result` value back. RPC-level failures are never retried
//! here; only the HTTP layer underneath retries, per its own
//! configuration.

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::protocol::{validate_payload, RpcRequest};
use crate::transport::{HttpTransport, ReqwestTransport, RetryConfig};

/// JSON-RPC 1.0 client over an [`HttpTransport`].
pub struct RpcClient {
    transport: Arc<dyn HttpTransport>,
}

impl RpcClient {
    /// Connect to `endpoint` through a [`ReqwestTransport`].
    ///
    /// Fails with [`Error::InvalidEndpoint`] when the URI does not parse.
    pub fn new(endpoint: &str, retry: RetryConfig) -> Result<Self> {
        let transport = ReqwestTransport::new(endpoint, retry)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    /// Use a caller-supplied transport (mock transports included).
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Invoke `method` with `params`, returning the decoded `result` value.
    ///
    /// The result may be any JSON value, including null. Fails with
    /// [`Error::Server`] when the response carries a well-formed error
    /// object, and with [`Error::InvalidResponse`] on any envelope
    /// violation.
    pub fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let request = RpcRequest::new(method, params);
        debug!(method, id = request.id, params = ?request.params, "invoking RPC method");

        let body = serde_json::to_string(&request).expect("request envelope serializes");
        let response = self.transport.post(&body)?;
        debug!(status = response.status, body = %response.body, "raw RPC response");

        if response.body.is_empty() {
            return Err(Error::InvalidResponse("response body is empty".to_owned()));
        }
        let payload: Value = match serde_json::from_str(&response.body) {
            Ok(payload) => payload,
            Err(error) => {
                info!(body = %response.body, "failed to parse JSON from response body");
                return Err(Error::InvalidResponse(error.to_string()));
            }
        };

        validate_payload(payload, request.id)
    }
}
