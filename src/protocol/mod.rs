//! JSON-RPC 1.0 envelope types and validation.
//!
//! Protocol: a single JSON request POSTed to the endpoint, a single JSON
//! response in the body. Both `result` and `error` must be present in every
//! response; the request id must be echoed back.

pub mod request;
pub mod response;

pub use request::{RpcRequest, JSON_RPC_VERSION};
pub use response::validate_payload;
