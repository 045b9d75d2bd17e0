//! Bounded retry with linear backoff.
//!
//! A policy wraps one logical call: the action runs, and on failure an
//! `on_retry` hook fires before the backoff sleep and the next attempt.
//! The hook is the extension point the paginated collector uses to shrink
//! the in-flight page before the generic backoff logic runs. On
//! exhaustion the last failure propagates wrapped with the correlation
//! marker and URL — it is never swallowed.
//!
//! Two variants with identical retry counts, delays, and logging are
//! provided: [`RetryPolicy::execute`] blocks the calling thread,
//! [`RetryPolicy::execute_async`] suspends and can be cancelled.

use crate::clients::TransportError;
use crate::engine::cancel::CancellationToken;
use crate::engine::marker::Marker;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Correlation data threaded through every attempt of one logical call.
///
/// Created per logical call, not per attempt.
#[derive(Clone, Debug)]
pub struct RetryContext {
    marker: Marker,
    url: String,
}

impl RetryContext {
    /// Creates a context for one logical call against `url`.
    #[must_use]
    pub fn new(marker: Marker, url: impl Into<String>) -> Self {
        Self {
            marker,
            url: url.into(),
        }
    }

    /// The correlation marker.
    #[must_use]
    pub const fn marker(&self) -> &Marker {
        &self.marker
    }

    /// The target URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Error from a logical call that went through a [`RetryPolicy`].
#[derive(Debug, Error)]
pub enum RetryError {
    /// All retry attempts failed; the last failure is the cause.
    #[error("call to '{url}' failed after {attempts} retries (marker: {marker})")]
    Exhausted {
        /// The correlation marker of the logical call.
        marker: String,
        /// The target URL.
        url: String,
        /// How many retries were attempted after the initial call.
        attempts: u32,
        /// The failure of the final attempt.
        #[source]
        source: TransportError,
    },

    /// The cancellation token fired during a backoff wait or an attempt.
    #[error("operation was cancelled")]
    Cancelled,
}

/// Bounded retry with `base + attempt * increment` backoff.
///
/// Policies are explicit instances passed into the collector, never
/// global singletons, so tests can inject zero-wait policies without
/// touching shared state.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use bigcommerce_access::engine::RetryPolicy;
///
/// let policy = RetryPolicy::new(3, Duration::from_secs(5), Duration::from_secs(20));
/// assert_eq!(policy.max_attempts(), 3);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
    delay_increment: Duration,
}

impl Default for RetryPolicy {
    /// The production policy: 10 retries, 5 s base, 20 s per-attempt increment.
    fn default() -> Self {
        Self::new(10, Duration::from_secs(5), Duration::from_secs(20))
    }
}

impl RetryPolicy {
    /// Creates a policy with the given retry ceiling and backoff parameters.
    #[must_use]
    pub const fn new(max_attempts: u32, base_delay: Duration, delay_increment: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            delay_increment,
        }
    }

    /// A policy that retries without sleeping between attempts.
    #[must_use]
    pub const fn no_backoff(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO, Duration::ZERO)
    }

    /// The retry ceiling (retries after the initial attempt).
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay + self.delay_increment * attempt
    }

    fn log_retry(&self, ctx: &RetryContext, err: &TransportError, attempt: u32, delay: Duration) {
        tracing::warn!(
            marker = %ctx.marker,
            url = %ctx.url,
            attempt,
            total_attempts = self.max_attempts,
            delay_ms = delay.as_millis() as u64,
            category = "retry",
            error = %err,
            "retrying BigCommerce API call"
        );
    }

    fn exhausted(&self, ctx: &RetryContext, source: TransportError) -> RetryError {
        RetryError::Exhausted {
            marker: ctx.marker.to_string(),
            url: ctx.url.clone(),
            attempts: self.max_attempts,
            source,
        }
    }

    /// Runs `action` with bounded retry, blocking the calling thread
    /// during backoff sleeps.
    ///
    /// `on_retry(failure, attempt)` runs before each backoff, so state
    /// changed there (such as a shrunk page) takes effect on the next
    /// attempt.
    ///
    /// # Errors
    ///
    /// Returns [`RetryError::Exhausted`] wrapping the last failure once
    /// the retry ceiling is reached.
    pub fn execute<T, A, R>(
        &self,
        ctx: &RetryContext,
        mut action: A,
        mut on_retry: R,
    ) -> Result<T, RetryError>
    where
        A: FnMut() -> Result<T, TransportError>,
        R: FnMut(&TransportError, u32),
    {
        let mut last_err = match action() {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        for attempt in 1..=self.max_attempts {
            on_retry(&last_err, attempt);
            let delay = self.backoff(attempt);
            self.log_retry(ctx, &last_err, attempt, delay);
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }

            match action() {
                Ok(value) => return Ok(value),
                Err(err) => last_err = err,
            }
        }

        Err(self.exhausted(ctx, last_err))
    }

    /// Runs `action` with bounded retry, suspending during backoff sleeps.
    ///
    /// Behavioral parity with [`RetryPolicy::execute`] — identical retry
    /// counts, delays, and logging for the same inputs — plus cooperative
    /// cancellation: the token aborts an in-progress backoff wait or an
    /// in-flight attempt promptly.
    ///
    /// # Errors
    ///
    /// Returns [`RetryError::Exhausted`] once the retry ceiling is
    /// reached, or [`RetryError::Cancelled`] when the token fires.
    pub async fn execute_async<T, A, Fut, R>(
        &self,
        ctx: &RetryContext,
        cancel: &CancellationToken,
        mut action: A,
        mut on_retry: R,
    ) -> Result<T, RetryError>
    where
        A: FnMut() -> Fut,
        Fut: Future<Output = Result<T, TransportError>>,
        R: FnMut(&TransportError, u32),
    {
        if cancel.is_cancelled() {
            return Err(RetryError::Cancelled);
        }

        let first = tokio::select! {
            () = cancel.cancelled() => return Err(RetryError::Cancelled),
            result = action() => result,
        };
        let mut last_err = match first {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        for attempt in 1..=self.max_attempts {
            on_retry(&last_err, attempt);
            let delay = self.backoff(attempt);
            self.log_retry(ctx, &last_err, attempt, delay);
            tokio::select! {
                () = cancel.cancelled() => return Err(RetryError::Cancelled),
                () = tokio::time::sleep(delay) => {}
            }

            let outcome = tokio::select! {
                () = cancel.cancelled() => return Err(RetryError::Cancelled),
                result = action() => result,
            };
            match outcome {
                Ok(value) => return Ok(value),
                Err(err) => last_err = err,
            }
        }

        Err(self.exhausted(ctx, last_err))
    }
}
