use crate::RowRange;

/// A lightweight, serializable snapshot of pagination progress.
///
/// The transition functions are pure: each takes the current state by value and returns the
/// next one. [`crate::Pager`] owns a `PagerState` plus the revealed rows and only ever moves it
/// through these functions.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagerState {
    /// Pages folded into the revealed rows so far.
    pub page_count: usize,
    /// True from a page request until that page is folded (or fails).
    pub is_loading: bool,
    /// True iff the last folded page did not reach the end of the source.
    pub has_more: bool,
    pub revealed_len: usize,
    pub total: usize,
    pub page_size: usize,
    /// Bumped every time the source is replaced.
    pub generation: u64,
}

/// What a page request turned into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    /// The request was recorded; a load is now pending.
    Accepted,
    /// A load is already pending or in flight.
    Busy,
    /// Nothing is left to reveal.
    Exhausted,
}

impl PagerState {
    /// Creates the state for a freshly supplied source: nothing revealed, first page pending.
    pub fn new(total: usize, page_size: usize) -> Self {
        Self {
            page_size,
            ..Self::default()
        }
        .on_source_replaced(total)
    }

    /// True exactly while nothing has been folded since the last reset.
    pub fn reset(&self) -> bool {
        self.page_count == 0
    }

    pub fn remaining(&self) -> usize {
        self.total.saturating_sub(self.revealed_len)
    }

    pub fn page_total(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    /// The rows the next page covers: right after the revealed prefix, up to one page further,
    /// clamped to the source length.
    /// Starts at `revealed_len`, so a short page never leaves a gap in the revealed prefix.
    pub fn next_page_range(&self) -> RowRange {
        let start = self.revealed_len.min(self.total);
        let end = start.saturating_add(self.page_size).min(self.total);
        RowRange::new(start, end)
    }

    pub fn on_source_replaced(self, total: usize) -> Self {
        Self {
            page_count: 0,
            is_loading: true,
            has_more: false,
            revealed_len: 0,
            total,
            page_size: self.page_size,
            generation: self.generation.wrapping_add(1),
        }
    }

    pub fn on_page_requested(self) -> (Self, Request) {
        if self.is_loading {
            return (self, Request::Busy);
        }
        if self.page_count > 0 && self.remaining() == 0 {
            return (self, Request::Exhausted);
        }
        (
            Self {
                is_loading: true,
                ..self
            },
            Request::Accepted,
        )
    }

    /// Folds a page of `fetched` rows, appended right after the revealed prefix.
    pub fn on_page_loaded(self, fetched: usize) -> Self {
        let revealed_len = self.revealed_len.saturating_add(fetched).min(self.total);
        Self {
            page_count: self.page_count.saturating_add(1),
            is_loading: false,
            has_more: revealed_len < self.total,
            revealed_len,
            ..self
        }
    }

    /// A load failed: stop loading, keep progress so the same page can be retried.
    pub fn on_page_failed(self) -> Self {
        Self {
            is_loading: false,
            ..self
        }
    }
}
