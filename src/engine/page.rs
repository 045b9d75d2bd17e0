//! Page windows and the page-size adjuster.
//!
//! A collection endpoint can refuse to serialize a large page, observed as
//! the connection being cut while the body is read rather than as a
//! structured error. When that signature shows up the page is halved and
//! the page index recomputed so the new, smaller window starts at or
//! before the first unfetched record. Overlap (duplicate delivery) is
//! acceptable; a gap never is.

use crate::clients::TransportError;

/// The next page window to request.
///
/// Immutable per iteration; the collector replaces it (rather than
/// mutating it in place) when the adjuster shrinks the page or the loop
/// advances.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    /// 1-based page index.
    pub index: u32,
    /// Requested records per page.
    pub size: u32,
}

impl PageInfo {
    /// Creates a page window.
    #[must_use]
    pub const fn new(index: u32, size: u32) -> Self {
        Self { index, size }
    }

    /// The first page at the given size.
    #[must_use]
    pub const fn first(size: u32) -> Self {
        Self::new(1, size)
    }

    /// The window immediately after this one, at the same size.
    #[must_use]
    pub const fn next(self) -> Self {
        Self::new(self.index + 1, self.size)
    }

    /// Records covered by all pages before this one.
    #[must_use]
    pub const fn records_fetched(self) -> u64 {
        self.size as u64 * (self.index as u64 - 1)
    }
}

/// Half the given page size, floored at 1.
#[must_use]
pub const fn half_page_size(size: u32) -> u32 {
    let half = size / 2;
    if half == 0 {
        1
    } else {
        half
    }
}

/// The page index that, at `new_size`, starts at or before the first
/// record not yet fetched under `current`.
#[must_use]
#[allow(clippy::missing_panics_doc)] // index arithmetic stays far below u32::MAX
pub fn next_page_index(current: PageInfo, new_size: u32) -> u32 {
    let records = current.records_fetched();
    u32::try_from(records / u64::from(new_size) + 1).unwrap_or(u32::MAX)
}

/// Shrinks the page in reaction to an oversized-response failure.
///
/// Returns `None` — leaving the caller's retry path unmodified — unless
/// the failure carries the oversized-response signature and halving stays
/// at or above `min_size`. On success the returned window has half the
/// size and a recomputed index; the new size is meant to stick for all
/// subsequent pages, since a server that refused one large page will
/// likely refuse others.
#[must_use]
pub fn try_adjust(current: PageInfo, min_size: u32, failure: &TransportError) -> Option<PageInfo> {
    if !failure.is_oversized_response() {
        return None;
    }
    let new_size = half_page_size(current.size);
    if new_size < min_size {
        return None;
    }
    Some(PageInfo::new(next_page_index(current, new_size), new_size))
}
