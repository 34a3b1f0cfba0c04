//! JSON-RPC 1.0 request envelope.

use rand::Rng;
use serde::Serialize;
use serde_json::Value;

/// Protocol version sent with every request. MUST be exactly "1.0".
pub const JSON_RPC_VERSION: &str = "1.0";

/// Request ids are drawn uniformly from `[0, 10^12)`.
const REQUEST_ID_BOUND: u64 = 1_000_000_000_000;

/// JSON-RPC 1.0 request envelope.
///
/// Serialized compactly and POSTed as the request body. The id only has to
/// match the response of the one in-flight call; uniqueness across calls is
/// neither guaranteed nor required.
#[derive(Debug, Clone, Serialize)]
pub struct RpcRequest {
    /// Protocol version, always [`JSON_RPC_VERSION`].
    pub jsonrpc: &'static str,
    /// Remote method name.
    pub method: String,
    /// Positional parameters, in call order.
    pub params: Vec<Value>,
    /// Caller-generated id echoed back by the server.
    pub id: u64,
}

impl RpcRequest {
    /// Build a request with a freshly generated id.
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            jsonrpc: JSON_RPC_VERSION,
            method: method.into(),
            params,
            id: make_id(),
        }
    }
}

fn make_id() -> u64 {
    rand::thread_rng().gen_range(0..REQUEST_ID_BOUND)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn serializes_version_method_params_and_id() {
        let request = RpcRequest::new("get_summary", vec![json!(7), json!("all")]);
        let body = serde_json::to_string(&request).unwrap();
        let parsed: Value = serde_json::from_str(&body).unwrap();

        assert_eq!(parsed["jsonrpc"], "1.0");
        assert_eq!(parsed["method"], "get_summary");
        assert_eq!(parsed["params"], json!([7, "all"]));
        assert!(parsed["id"].is_u64());
    }

    #[test]
    fn generated_ids_stay_in_range() {
        for _ in 0..1_000 {
            let request = RpcRequest::new("probe", Vec::new());
            assert!(request.id < REQUEST_ID_BOUND);
        }
    }
}
