//! Client for the LimeSurvey RemoteControl API.
//!
//! The RemoteControl interface speaks JSON-RPC 1.0 over HTTP POST. This
//! crate layers a strict transport (envelope validation, request-id echo
//! checking) under a session-authenticated client that normalizes the
//! server's informal `status` sentinels and transparently re-authenticates
//! when the session key expires.
//!
//! Log output goes through `tracing`; install whatever subscriber the host
//! application wants, the crate only emits events.
//!
//! ```no_run
//! use surveyrc::{Client, RetryConfig};
//!
//! # fn main() -> surveyrc::Result<()> {
//! let mut client = Client::new(
//!     "https://surveys.example.org/admin/remotecontrol",
//!     "admin",
//!     "secret",
//!     RetryConfig::default(),
//! )?;
//! let surveys = client.list_surveys(Vec::new())?;
//! println!("{surveys}");
//! client.disconnect()?;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod methods;
pub mod mock;
pub mod protocol;
pub mod rpc;
pub mod transport;

pub use client::Client;
pub use error::{Error, Result};
pub use methods::METHOD_NAMES;
pub use rpc::RpcClient;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport, RetryConfig};
