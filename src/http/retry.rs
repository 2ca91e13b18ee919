//! Retry policy for transport-level failures.
//!
//! Only connection-establishment failures are retried; a response that was
//! delivered with an error status never reaches this layer.

use anyhow::{Result, anyhow};
use log::{debug, warn};

/// Default total attempt budget (one retry).
pub const DEFAULT_MAX_ATTEMPTS: usize = 2;

/// Predicate deciding whether a transport failure is worth another attempt.
pub type RetryPredicate = fn(&anyhow::Error) -> bool;

/// Bounded retry policy: a total attempt budget plus a predicate over the
/// transport failure.
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    max_attempts: usize,
    predicate: RetryPredicate,
}

impl RetryPolicy {
    /// Policy retrying connection timeouts up to `max_attempts` total attempts.
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            predicate: is_connect_timeout,
        }
    }

    /// Policy with a custom retry predicate.
    pub fn with_predicate(max_attempts: usize, predicate: RetryPredicate) -> Self {
        Self {
            max_attempts,
            predicate,
        }
    }

    /// Total attempt budget (first attempt included).
    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Whether the given failure should be retried.
    pub fn should_retry(&self, error: &anyhow::Error) -> bool {
        (self.predicate)(error)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

/// Default predicate: true only for connection-establishment failures and
/// attempt timeouts. Delivered responses with error statuses never come
/// through here.
pub fn is_connect_timeout(error: &anyhow::Error) -> bool {
    if let Some(e) = error.downcast_ref::<reqwest::Error>() {
        return e.is_connect() || e.is_timeout();
    }

    // Non-reqwest failures: fall back to message matching.
    let message = error.to_string();
    message.contains("connection") || message.contains("timeout")
}

/// Executes an async operation under the given policy. Retries are immediate,
/// with no delay between attempts. On exhaustion the last failure is surfaced
/// unmodified.
pub async fn with_retry<F, Fut, T>(
    policy: &RetryPolicy,
    operation_name: &str,
    operation: F,
) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts();
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => {
                if !policy.should_retry(&e) {
                    debug!("{}: non-retryable error: {}", operation_name, e);
                    return Err(e);
                }

                if attempt < max_attempts {
                    warn!(
                        "{}: attempt {}/{} failed ({}), retrying...",
                        operation_name, attempt, max_attempts, e
                    );
                }
                last_error = Some(e);
            }
        }
    }

    Err(last_error
        .unwrap_or_else(|| anyhow!("{}: failed after {} attempts", operation_name, max_attempts)))
}
