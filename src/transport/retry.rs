//! Retry policy for the HTTP layer.
//!
//! A bounded number of retries with exponential backoff, jitter, a
//! retriable-status allowlist, and caller-supplied hooks. Only transport
//! failures are handled here; JSON-RPC errors and status sentinels are
//! application-level outcomes and never retried at this layer.

use std::fmt;
use std::time::Duration;

use rand::Rng;

/// Failure kinds the retry layer is willing to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// The request timed out.
    Timeout,
    /// The connection could not be established.
    Connect,
    /// The server answered with a status listed in
    /// [`RetryConfig::retry_statuses`].
    RetriableStatus,
}

/// Context handed to [`RetryConfig::retry_if`] and
/// [`RetryConfig::retry_block`].
#[derive(Debug, Clone, Copy)]
pub struct AttemptContext<'a> {
    /// HTTP verb of the attempt (always `POST` for this client).
    pub method: &'a str,
    /// Retries already performed for this logical request.
    pub retries: u32,
    /// Classified failure that triggered the retry decision.
    pub failure: FailureKind,
}

type RetryPredicate = Box<dyn Fn(&AttemptContext<'_>) -> bool + Send + Sync>;
type RetryHook = Box<dyn Fn(&AttemptContext<'_>) + Send + Sync>;

/// Configuration for the retrying HTTP layer.
///
/// Defaults: two retries, no pause, no backoff, and no automatic retry for
/// POST — POST is absent from [`methods`](Self::methods), so a failed call
/// is only retried when [`retry_if`](Self::retry_if) approves it.
pub struct RetryConfig {
    /// Maximum number of retries after the first attempt.
    pub max: u32,
    /// Base pause between retries.
    pub interval: Duration,
    /// Jitter fraction (`0..1`) added on top of the computed interval.
    pub interval_randomness: f64,
    /// Upper bound for the computed interval, applied before jitter.
    pub max_interval: Duration,
    /// Multiplier applied to the interval per successive retry.
    pub backoff_factor: f64,
    /// Failure kinds eligible for retry at all.
    pub exceptions: Vec<FailureKind>,
    /// HTTP statuses treated as retriable responses.
    pub retry_statuses: Vec<u16>,
    /// Verbs retried automatically without consulting `retry_if`.
    pub methods: Vec<&'static str>,
    /// Predicate consulted for verbs outside `methods`.
    pub retry_if: Option<RetryPredicate>,
    /// Hook invoked before each retry sleep.
    pub retry_block: Option<RetryHook>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max: 2,
            interval: Duration::ZERO,
            interval_randomness: 0.0,
            max_interval: Duration::MAX,
            backoff_factor: 1.0,
            exceptions: vec![
                FailureKind::Timeout,
                FailureKind::Connect,
                FailureKind::RetriableStatus,
            ],
            retry_statuses: vec![429, 503],
            methods: vec!["delete", "get", "head", "options", "put"],
            retry_if: None,
            retry_block: None,
        }
    }
}

impl fmt::Debug for RetryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryConfig")
            .field("max", &self.max)
            .field("interval", &self.interval)
            .field("interval_randomness", &self.interval_randomness)
            .field("max_interval", &self.max_interval)
            .field("backoff_factor", &self.backoff_factor)
            .field("exceptions", &self.exceptions)
            .field("retry_statuses", &self.retry_statuses)
            .field("methods", &self.methods)
            .field("retry_if", &self.retry_if.is_some())
            .field("retry_block", &self.retry_block.is_some())
            .finish()
    }
}

impl RetryConfig {
    /// Decide whether the failure described by `context` should be retried.
    pub fn should_retry(&self, context: &AttemptContext<'_>) -> bool {
        if context.retries >= self.max {
            return false;
        }
        if !self.exceptions.contains(&context.failure) {
            return false;
        }
        if self
            .methods
            .iter()
            .any(|m| m.eq_ignore_ascii_case(context.method))
        {
            return true;
        }
        match &self.retry_if {
            Some(predicate) => predicate(context),
            None => false,
        }
    }

    /// Pause before retry `retries` (0-based): `interval * backoff_factor ^
    /// retries`, capped at `max_interval`, plus a random fraction of that
    /// governed by `interval_randomness`.
    pub fn delay_for(&self, retries: u32) -> Duration {
        let base = self.interval.as_secs_f64() * self.backoff_factor.powi(retries as i32);
        let capped = base.min(self.max_interval.as_secs_f64());
        let jitter = if self.interval_randomness > 0.0 {
            rand::thread_rng().gen::<f64>() * self.interval_randomness * capped
        } else {
            0.0
        };
        Duration::try_from_secs_f64(capped + jitter).unwrap_or(Duration::MAX)
    }
}
