//! Blocking HTTP transport backed by `reqwest`.

use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

use super::retry::{AttemptContext, FailureKind, RetryConfig};
use super::{HttpResponse, HttpTransport};

/// [`HttpTransport`] implementation over a blocking `reqwest` client,
/// retrying per [`RetryConfig`].
///
/// Retried attempts resend the identical body, so the JSON-RPC id of the
/// logical call is stable across them.
pub struct ReqwestTransport {
    endpoint: Url,
    client: reqwest::blocking::Client,
    retry: RetryConfig,
}

impl ReqwestTransport {
    /// Build a transport for the given endpoint. Fails with
    /// [`Error::InvalidEndpoint`] when the URI does not parse.
    pub fn new(endpoint: &str, retry: RetryConfig) -> Result<Self> {
        Self::with_timeout(endpoint, retry, None)
    }

    /// Like [`new`](Self::new), with a whole-request deadline. The deadline
    /// is the only cancellation surface this client exposes.
    pub fn with_timeout(
        endpoint: &str,
        retry: RetryConfig,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let endpoint = Url::parse(endpoint)?;
        let mut builder = reqwest::blocking::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;
        Ok(Self {
            endpoint,
            client,
            retry,
        })
    }

    /// Endpoint this transport POSTs to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn attempt(&self, body: &str) -> std::result::Result<HttpResponse, reqwest::Error> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_owned())
            .send()?;
        let status = response.status().as_u16();
        let body = response.text()?;
        Ok(HttpResponse { status, body })
    }
}

fn classify(error: &reqwest::Error) -> Option<FailureKind> {
    if error.is_timeout() {
        Some(FailureKind::Timeout)
    } else if error.is_connect() {
        Some(FailureKind::Connect)
    } else {
        None
    }
}

impl HttpTransport for ReqwestTransport {
    fn post(&self, body: &str) -> Result<HttpResponse> {
        let mut retries = 0;
        loop {
            // Keep the terminal outcome of the attempt so it can be handed
            // back unmodified once retries are exhausted or ineligible.
            let (failure, outcome) = match self.attempt(body) {
                Ok(response) => {
                    if self.retry.retry_statuses.contains(&response.status) {
                        (FailureKind::RetriableStatus, Ok(response))
                    } else {
                        return Ok(response);
                    }
                }
                Err(error) => match classify(&error) {
                    Some(kind) => (kind, Err(error)),
                    None => return Err(Error::Http(error)),
                },
            };

            let context = AttemptContext {
                method: "POST",
                retries,
                failure,
            };
            if !self.retry.should_retry(&context) {
                return outcome.map_err(Error::Http);
            }
            if let Some(hook) = &self.retry.retry_block {
                hook(&context);
            }
            let delay = self.retry.delay_for(retries);
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            retries += 1;
            debug!(retries, ?failure, "retrying HTTP request");
        }
    }
}
