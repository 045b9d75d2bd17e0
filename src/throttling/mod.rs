//! Rate-limit snapshots and call pacing.
//!
//! The remote quota is discovered incrementally from response headers:
//! every response yields a fresh [`RateLimits`] snapshot, and the
//! [`DelayScheduler`] converts the latest snapshot into the wait that
//! precedes the next call.

mod delay;
mod limits;

pub use delay::DelayScheduler;
pub use limits::{RateLimits, UnlimitedThresholds, UNKNOWN};
