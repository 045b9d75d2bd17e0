//! The paginated collection loop.
//!
//! One page request per iteration, wrapped in the retry policy; the retry
//! hook consults the page adjuster so an oversized-response failure
//! shrinks the in-flight page before the next attempt; after each success
//! the delay scheduler paces the next call. The sequence ends when a page
//! comes back shorter than requested or the transport signals no data.
//!
//! Page fetches within one collection are strictly sequential: each
//! page's size may change the next page's index, and pacing must account
//! for every call in order. A failed page aborts the whole collection —
//! partial results are never exposed, because the caller could not know
//! whether the failed page's data is a gap.

use crate::clients::TransportError;
use crate::config::BigCommerceConfig;
use crate::engine::cancel::{Cancelled, CancellationToken};
use crate::engine::marker::Marker;
use crate::engine::page::{try_adjust, PageInfo};
use crate::engine::retry::{RetryContext, RetryError, RetryPolicy};
use crate::throttling::{DelayScheduler, RateLimits};
use std::cell::Cell;
use std::future::Future;
use std::sync::Mutex;
use thiserror::Error;

/// One fetched page: the items plus the rate-limit snapshot taken from
/// the response's headers.
///
/// `items == None` means the transport reported no data at all, which
/// ends the collection (it is not an error).
#[derive(Clone, Debug)]
pub struct PagedResponse<T> {
    /// The page's records, or `None` when the endpoint returned no body.
    pub items: Option<Vec<T>>,
    /// Quota state reported alongside this page.
    pub limits: RateLimits,
}

impl<T> PagedResponse<T> {
    /// A page carrying records.
    #[must_use]
    pub const fn new(items: Vec<T>, limits: RateLimits) -> Self {
        Self {
            items: Some(items),
            limits,
        }
    }

    /// A no-data page, ending the collection.
    #[must_use]
    pub const fn empty(limits: RateLimits) -> Self {
        Self {
            items: None,
            limits,
        }
    }
}

/// Error from a paginated collection.
#[derive(Debug, Error)]
pub enum CollectError {
    /// A page kept failing until the retry ceiling; the collection aborts
    /// and accumulated pages are discarded.
    #[error("collection from '{url}' failed after {attempts} retries (marker: {marker})")]
    RetriesExhausted {
        /// The correlation marker of the collection.
        marker: String,
        /// The page endpoint URL.
        url: String,
        /// How many retries were attempted for the failing page.
        attempts: u32,
        /// The failure of the final attempt.
        #[source]
        source: TransportError,
    },

    /// The cancellation token fired during a wait or an in-flight call.
    #[error("collection was cancelled")]
    Cancelled,
}

impl From<RetryError> for CollectError {
    fn from(err: RetryError) -> Self {
        match err {
            RetryError::Exhausted {
                marker,
                url,
                attempts,
                source,
            } => Self::RetriesExhausted {
                marker,
                url,
                attempts,
                source,
            },
            RetryError::Cancelled => Self::Cancelled,
        }
    }
}

impl From<Cancelled> for CollectError {
    fn from(_: Cancelled) -> Self {
        Self::Cancelled
    }
}

/// Drives paginated collection over an injected page fetcher.
///
/// Each invocation owns its page state, accumulator, and marker; a
/// collector value can be shared freely across operations.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use bigcommerce_access::engine::{Marker, PageCollector, PagedResponse, RetryPolicy};
/// use bigcommerce_access::throttling::{DelayScheduler, RateLimits, UnlimitedThresholds};
///
/// let collector = PageCollector::new(
///     RetryPolicy::no_backoff(3),
///     DelayScheduler::new(Duration::ZERO, UnlimitedThresholds::default()),
///     250,
///     50,
/// );
///
/// let pages = vec![vec![1, 2, 3]];
/// let collected = collector
///     .collect(&Marker::new(), "https://shop.example/items", |page| {
///         let items = pages.get(page.index as usize - 1).cloned().unwrap_or_default();
///         Ok(PagedResponse::new(items, RateLimits::unknown()))
///     })
///     .unwrap();
/// assert_eq!(collected, vec![1, 2, 3]);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct PageCollector {
    retry: RetryPolicy,
    delay: DelayScheduler,
    default_page_size: u32,
    min_page_size: u32,
}

impl PageCollector {
    /// Creates a collector from explicit engine pieces.
    #[must_use]
    pub const fn new(
        retry: RetryPolicy,
        delay: DelayScheduler,
        default_page_size: u32,
        min_page_size: u32,
    ) -> Self {
        Self {
            retry,
            delay,
            default_page_size,
            min_page_size,
        }
    }

    /// Creates a collector using the engine tunables of `config`.
    #[must_use]
    pub fn from_config(config: &BigCommerceConfig) -> Self {
        Self::new(
            RetryPolicy::new(
                config.max_retry_attempts(),
                config.retry_base_delay(),
                config.retry_delay_increment(),
            ),
            DelayScheduler::new(config.default_pacing(), config.thresholds()),
            config.default_page_size(),
            config.min_page_size(),
        )
    }

    /// The retry policy shared by every page fetch.
    #[must_use]
    pub const fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// The delay scheduler shared by every page fetch.
    #[must_use]
    pub const fn delay_scheduler(&self) -> &DelayScheduler {
        &self.delay
    }

    fn log_adjustment(marker: &Marker, url: &str, from: PageInfo, to: PageInfo) {
        tracing::warn!(
            marker = %marker,
            url,
            from_size = from.size,
            to_size = to.size,
            to_index = to.index,
            category = "adjustment",
            "response too large to read; shrinking page"
        );
    }

    /// Collects every page of a collection endpoint, blocking the calling
    /// thread during network calls and waits.
    ///
    /// `fetch` performs one page request. The returned sequence is the
    /// concatenation of all pages in order.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::RetriesExhausted`] when a page fails past
    /// the retry ceiling; accumulated pages are discarded.
    pub fn collect<T, F>(
        &self,
        marker: &Marker,
        url: &str,
        mut fetch: F,
    ) -> Result<Vec<T>, CollectError>
    where
        F: FnMut(PageInfo) -> Result<PagedResponse<T>, TransportError>,
    {
        let mut items = Vec::new();
        let mut page = PageInfo::first(self.default_page_size);

        loop {
            let ctx = RetryContext::new(marker.clone(), url);
            let in_flight = Cell::new(page);

            let fetched = self.retry.execute(
                &ctx,
                || fetch(in_flight.get()),
                |failure, _attempt| {
                    if let Some(adjusted) = try_adjust(in_flight.get(), self.min_page_size, failure)
                    {
                        Self::log_adjustment(marker, url, in_flight.get(), adjusted);
                        in_flight.set(adjusted);
                    }
                },
            )?;

            // The shrunk size sticks for all subsequent pages.
            page = in_flight.get();

            self.delay.wait(fetched.limits);

            let Some(batch) = fetched.items else { break };
            let requested = page.size as usize;
            let received = batch.len();
            items.extend(batch);

            if received < requested {
                break;
            }
            page = page.next();
        }

        Ok(items)
    }

    /// Collects every page of a collection endpoint, suspending during
    /// network calls and waits.
    ///
    /// Behavioral parity with [`PageCollector::collect`], plus cooperative
    /// cancellation of in-progress waits and in-flight calls.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::RetriesExhausted`] when a page fails past
    /// the retry ceiling, or [`CollectError::Cancelled`] when the token
    /// fires.
    ///
    /// # Panics
    ///
    /// Panics if the internal page-state lock is poisoned, which requires
    /// a panic inside this method itself.
    pub async fn collect_async<T, F, Fut>(
        &self,
        marker: &Marker,
        url: &str,
        cancel: &CancellationToken,
        mut fetch: F,
    ) -> Result<Vec<T>, CollectError>
    where
        F: FnMut(PageInfo) -> Fut,
        Fut: Future<Output = Result<PagedResponse<T>, TransportError>>,
    {
        let mut items = Vec::new();
        let mut page = PageInfo::first(self.default_page_size);

        loop {
            let ctx = RetryContext::new(marker.clone(), url);
            let in_flight = Mutex::new(page);

            let fetched = self
                .retry
                .execute_async(
                    &ctx,
                    cancel,
                    || fetch(*in_flight.lock().expect("page state lock poisoned")),
                    |failure, _attempt| {
                        let mut current = in_flight.lock().expect("page state lock poisoned");
                        if let Some(adjusted) = try_adjust(*current, self.min_page_size, failure) {
                            Self::log_adjustment(marker, url, *current, adjusted);
                            *current = adjusted;
                        }
                    },
                )
                .await?;

            page = *in_flight.lock().expect("page state lock poisoned");

            self.delay.wait_async(fetched.limits, cancel).await?;

            let Some(batch) = fetched.items else { break };
            let requested = page.size as usize;
            let received = batch.len();
            items.extend(batch);

            if received < requested {
                break;
            }
            page = page.next();
        }

        Ok(items)
    }
}
