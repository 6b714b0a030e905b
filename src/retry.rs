//! Bounded exponential backoff around relay calls.

use std::future::Future;
use std::time::Duration;

use crate::error::Result;
use crate::observability::{RETRY_ATTEMPTS, RETRY_BACKOFF};

/// Total calls made before giving up, including the first one.
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Base unit of the backoff series.
const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// A sequential retry loop for transient relay failures.
///
/// The policy attempts the wrapped call, returning immediately on success or
/// on any non-retryable failure. Retryable failures (transport or transient,
/// per [`Error::is_retryable`](crate::Error::is_retryable)) wait
/// `base_delay * 2^attempt` plus up to one second of jitter, then try again
/// with the same request. After `max_attempts` calls the last failure is
/// returned. Exactly one call is in flight at any time.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy making at most `max_attempts` calls.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }

    /// Sets the base unit of the backoff series.
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Returns the configured attempt bound.
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// The wait before retrying after the zero-based `attempt` has failed.
    fn backoff_delay(&self, attempt: u32) -> Duration {
        let exponential = self.base_delay.saturating_mul(1u32 << attempt.min(16));
        let jitter = Duration::from_secs_f64(rand::random::<f64>());
        exponential + jitter
    }

    /// Runs `op`, retrying retryable failures until the attempt bound.
    ///
    /// `op` is invoked once even when `max_attempts` is zero.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 0u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_retryable() && attempt + 1 < self.max_attempts => {
                    let delay = self.backoff_delay(attempt);
                    RETRY_ATTEMPTS.click();
                    RETRY_BACKOFF.add(delay.as_secs_f64());
                    tracing::debug!(
                        attempt,
                        delay_secs = delay.as_secs_f64(),
                        error = %err,
                        "retrying after retryable failure"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn defaults() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.base_delay, Duration::from_secs(1));
    }

    #[test]
    fn backoff_delay_doubles_with_jitter() {
        let policy = RetryPolicy::default();
        for attempt in 0..4 {
            let delay = policy.backoff_delay(attempt);
            let floor = Duration::from_secs(1 << attempt);
            assert!(delay >= floor);
            assert!(delay < floor + Duration::from_secs(1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn always_transient_stops_after_max_attempts() {
        let policy = RetryPolicy::default();
        let mut calls = 0u32;
        let result: Result<()> = policy
            .run(|| {
                calls += 1;
                async { Err(Error::upstream(503, "overloaded")) }
            })
            .await;

        assert_eq!(calls, 5);
        match result {
            Err(Error::Upstream { status_code, .. }) => assert_eq!(status_code, 503),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn permanent_failure_makes_exactly_one_call() {
        let policy = RetryPolicy::default();
        let mut calls = 0u32;
        let result: Result<()> = policy
            .run(|| {
                calls += 1;
                async { Err(Error::api(400, "bad payload")) }
            })
            .await;

        assert_eq!(calls, 1);
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn transient_then_success_makes_two_calls() {
        let policy = RetryPolicy::default();
        let mut calls = 0u32;
        let result = policy
            .run(|| {
                calls += 1;
                let outcome = if calls == 1 {
                    Err(Error::rate_limit("slow down", None))
                } else {
                    Ok("answer".to_string())
                };
                async move { outcome }
            })
            .await;

        assert_eq!(calls, 2);
        assert_eq!(result.unwrap(), "answer");
    }

    #[tokio::test(start_paused = true)]
    async fn transport_failures_are_retried() {
        let policy = RetryPolicy::new(3);
        let mut calls = 0u32;
        let result: Result<()> = policy
            .run(|| {
                calls += 1;
                async { Err(Error::connection("refused", None)) }
            })
            .await;

        assert_eq!(calls, 3);
        assert!(result.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn zero_attempts_still_calls_once() {
        let policy = RetryPolicy::new(0);
        let mut calls = 0u32;
        let result = policy
            .run(|| {
                calls += 1;
                async { Ok(42) }
            })
            .await;

        assert_eq!(calls, 1);
        assert_eq!(result.unwrap(), 42);
    }
}
