//! Error types for the RemoteControl client.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the transport and session layers.
///
/// Session expiry never appears here: the session client absorbs it by
/// re-authenticating and re-dispatching the call. Only a failed
/// re-authentication surfaces, as [`Error::InvalidCredentials`].
#[derive(Debug, Error)]
pub enum Error {
    /// The endpoint URI could not be parsed at construction time.
    #[error("invalid endpoint URI: {0}")]
    InvalidEndpoint(#[from] url::ParseError),

    /// The server rejected the username/password combination.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The HTTP response violated the JSON-RPC envelope contract.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// A well-formed JSON-RPC error object was returned.
    #[error("server error {code}: {message}")]
    Server {
        /// Error code reported by the endpoint, preserved verbatim.
        code: i64,
        /// Error message reported by the endpoint, preserved verbatim.
        message: String,
    },

    /// A successful response carried an unrecognized `status` sentinel.
    #[error("API method '{method}' returned a failure status: {status}")]
    Api {
        /// Remote method that produced the status.
        method: String,
        /// The raw status string.
        status: String,
    },

    /// The client was used after `disconnect`.
    #[error("attempting to use a disconnected client")]
    Disconnected,

    /// The HTTP layer failed after exhausting its configured retries.
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),
}
