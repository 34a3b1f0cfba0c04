//! HTTP transport abstraction.
//!
//! The RPC layer performs one logical round trip per call through the
//! [`HttpTransport`] trait. Implementations may retry internally;
//! application-level outcomes (JSON-RPC errors, status sentinels) are
//! opaque to them.

mod http;
mod retry;

pub use http::ReqwestTransport;
pub use retry::{AttemptContext, FailureKind, RetryConfig};

use crate::error::Result;

/// A single logical HTTP POST of a JSON body to the configured endpoint.
pub trait HttpTransport: Send + Sync {
    /// POST `body` and return the raw response.
    fn post(&self, body: &str) -> Result<HttpResponse>;
}

/// Raw outcome of an HTTP round trip.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body, possibly empty.
    pub body: String,
}
