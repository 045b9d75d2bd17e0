//! Pacing delays between outgoing API calls.
//!
//! The quota is consumed by successes, not failures, so the scheduler is
//! consulted after every successful call and before the next one. The wait
//! length comes from the last response's rate-limit snapshot: nothing for
//! unlimited plans, the server's own window-reset hint when it sent one,
//! and a fixed pacing interval otherwise.

use crate::engine::{Cancelled, CancellationToken};
use crate::throttling::limits::{RateLimits, UnlimitedThresholds, UNKNOWN};
use std::time::Duration;

/// Converts a rate-limit snapshot into a concrete pacing wait.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use bigcommerce_access::throttling::{DelayScheduler, RateLimits, UnlimitedThresholds};
///
/// let scheduler = DelayScheduler::new(Duration::from_millis(200), UnlimitedThresholds::default());
/// let limits = RateLimits::unknown();
/// assert_eq!(scheduler.compute_delay(limits), Duration::from_millis(200));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct DelayScheduler {
    default_pacing: Duration,
    thresholds: UnlimitedThresholds,
}

impl DelayScheduler {
    /// Creates a scheduler with the given default pacing interval and
    /// plan-tier thresholds.
    #[must_use]
    pub const fn new(default_pacing: Duration, thresholds: UnlimitedThresholds) -> Self {
        Self {
            default_pacing,
            thresholds,
        }
    }

    /// Computes the wait before the next call.
    ///
    /// Zero for unlimited plans; the server's reset hint when present;
    /// the default pacing interval otherwise.
    #[must_use]
    pub fn compute_delay(&self, limits: RateLimits) -> Duration {
        if limits.is_unlimited(self.thresholds) {
            return Duration::ZERO;
        }
        let reset_ms = limits.time_reset_ms();
        if reset_ms != UNKNOWN {
            #[allow(clippy::cast_sign_loss)]
            return Duration::from_millis(reset_ms.max(0) as u64);
        }
        self.default_pacing
    }

    /// Blocks the calling thread for the computed wait.
    pub fn wait(&self, limits: RateLimits) {
        let delay = self.compute_delay(limits);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    /// Suspends for the computed wait, aborting early on cancellation.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] when the token fires during the wait; the
    /// caller must treat the overall operation as cancelled, not as ready
    /// to proceed.
    pub async fn wait_async(
        &self,
        limits: RateLimits,
        cancel: &CancellationToken,
    ) -> Result<(), Cancelled> {
        if cancel.is_cancelled() {
            return Err(Cancelled);
        }
        let delay = self.compute_delay(limits);
        if delay.is_zero() {
            return Ok(());
        }
        tokio::select! {
            () = cancel.cancelled() => Err(Cancelled),
            () = tokio::time::sleep(delay) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::CancellationSource;

    fn scheduler() -> DelayScheduler {
        DelayScheduler::new(Duration::from_millis(200), UnlimitedThresholds::default())
    }

    #[test]
    fn test_zero_delay_when_unlimited() {
        let limits = RateLimits::new(60_001, UNKNOWN, UNKNOWN);
        assert_eq!(scheduler().compute_delay(limits), Duration::ZERO);
    }

    #[test]
    fn test_server_reset_hint_wins_when_limited() {
        let limits = RateLimits::new(UNKNOWN, 5, 1_500);
        assert_eq!(
            scheduler().compute_delay(limits),
            Duration::from_millis(1_500)
        );
    }

    #[test]
    fn test_default_pacing_without_any_signal() {
        assert_eq!(
            scheduler().compute_delay(RateLimits::unknown()),
            Duration::from_millis(200)
        );
    }

    #[test]
    fn test_unlimited_ignores_reset_hint() {
        let limits = RateLimits::new(UNKNOWN, 1_000, 9_000);
        assert_eq!(scheduler().compute_delay(limits), Duration::ZERO);
    }

    #[tokio::test]
    async fn test_wait_async_completes_when_not_cancelled() {
        let scheduler = DelayScheduler::new(Duration::from_millis(1), UnlimitedThresholds::default());
        let result = scheduler
            .wait_async(RateLimits::unknown(), &CancellationToken::none())
            .await;
        assert_eq!(result, Ok(()));
    }

    #[tokio::test]
    async fn test_wait_async_aborts_on_cancellation() {
        let scheduler = DelayScheduler::new(Duration::from_secs(60), UnlimitedThresholds::default());
        let source = CancellationSource::new();
        let token = source.token();

        let wait = tokio::spawn(async move {
            scheduler.wait_async(RateLimits::unknown(), &token).await
        });
        source.cancel();

        let result = tokio::time::timeout(Duration::from_secs(1), wait)
            .await
            .expect("cancelled wait should return promptly")
            .expect("wait task should not panic");
        assert_eq!(result, Err(Cancelled));
    }

    #[tokio::test]
    async fn test_wait_async_short_circuits_on_already_cancelled_token() {
        let source = CancellationSource::new();
        source.cancel();
        let result = scheduler()
            .wait_async(RateLimits::new(60_001, UNKNOWN, UNKNOWN), &source.token())
            .await;
        assert_eq!(result, Err(Cancelled));
    }
}
