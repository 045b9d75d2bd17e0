//! The pagination-and-throttling-aware fetch/retry engine.
//!
//! This is the core of the crate: the control loop that makes repeated
//! paginated calls resilient, adaptive, and compliant with the remote
//! quota. The engine is driven through an injected page fetcher and never
//! branches on API generation — only the transport does.
//!
//! The pieces, leaf-first:
//!
//! - [`Marker`]: per-operation correlation id
//! - [`CancellationSource`]/[`CancellationToken`]: cooperative cancellation
//! - [`RetryPolicy`]: bounded retry with linear backoff, sync and async
//! - [`PageInfo`] and [`try_adjust`]: the page-size adjuster
//! - [`PageCollector`]: the orchestrating pagination loop

mod cancel;
mod collector;
mod marker;
mod page;
mod retry;

pub use cancel::{CancellationSource, CancellationToken, Cancelled};
pub use collector::{CollectError, PageCollector, PagedResponse};
pub use marker::Marker;
pub use page::{half_page_size, next_page_index, try_adjust, PageInfo};
pub use retry::{RetryContext, RetryError, RetryPolicy};
