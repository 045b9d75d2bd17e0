//! Rate-limit snapshots derived from response headers.
//!
//! Every BigCommerce response reports the remaining call budget through
//! one of two header schemes depending on the authentication generation:
//! legacy key-authenticated stores send a running count in
//! `X-BC-ApiLimit-Remaining`, token-authenticated stores send a window in
//! `X-Rate-Limit-Requests-Left` / `X-Rate-Limit-Time-Reset-Ms`. A snapshot
//! carries both and lets the consumer pick whichever is present.

/// Sentinel for a header value that was absent or unparseable.
pub const UNKNOWN: i64 = -1;

/// Plan-tier thresholds for the unlimited-calls determination.
///
/// The exact ceilings are business constants that have shifted across
/// BigCommerce plan revisions, so they are configuration rather than
/// hardcoded values. The defaults reflect the documented platform limits:
/// Enterprise plans report more than 60 000 remaining calls on the legacy
/// scheme, and a window-based client is considered unconstrained while it
/// has a safety margin of calls left.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnlimitedThresholds {
    /// Calls-remaining ceiling above which a legacy store is unlimited.
    pub legacy_calls: i64,
    /// Requests-left margin above which a token store is unlimited.
    pub requests_left_margin: i64,
}

impl Default for UnlimitedThresholds {
    fn default() -> Self {
        Self {
            legacy_calls: 60_000,
            requests_left_margin: 20,
        }
    }
}

/// An immutable snapshot of the remote quota state, as reported by the
/// most recent response's headers.
///
/// Absent or malformed headers yield [`UNKNOWN`] fields; a snapshot with
/// all fields unknown is treated as rate-limited by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RateLimits {
    calls_remaining: i64,
    requests_left: i64,
    time_reset_ms: i64,
}

impl RateLimits {
    /// Creates a snapshot from raw header-derived values ([`UNKNOWN`] for
    /// absent headers).
    #[must_use]
    pub const fn new(calls_remaining: i64, requests_left: i64, time_reset_ms: i64) -> Self {
        Self {
            calls_remaining,
            requests_left,
            time_reset_ms,
        }
    }

    /// A snapshot with no quota information at all.
    #[must_use]
    pub const fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, UNKNOWN)
    }

    /// Remaining calls under the legacy count-based scheme, or [`UNKNOWN`].
    #[must_use]
    pub const fn calls_remaining(&self) -> i64 {
        self.calls_remaining
    }

    /// Requests left in the current window, or [`UNKNOWN`].
    #[must_use]
    pub const fn requests_left(&self) -> i64 {
        self.requests_left
    }

    /// Milliseconds until the current window resets, or [`UNKNOWN`].
    #[must_use]
    pub const fn time_reset_ms(&self) -> i64 {
        self.time_reset_ms
    }

    /// Whether the remaining quota is large enough that no pacing delay is
    /// needed before the next call.
    ///
    /// The count-based signal wins when present: a legacy store is
    /// unlimited only above the plan-tier ceiling. Otherwise the
    /// window-based signal is consulted against the safety margin. With
    /// neither signal present the store is conservatively treated as
    /// rate-limited.
    #[must_use]
    pub const fn is_unlimited(&self, thresholds: UnlimitedThresholds) -> bool {
        if self.calls_remaining != UNKNOWN {
            return self.calls_remaining > thresholds.legacy_calls;
        }
        if self.requests_left != UNKNOWN {
            return self.requests_left > thresholds.requests_left_margin;
        }
        false
    }
}
