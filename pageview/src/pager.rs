use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt::Display;

use crate::options::check_page_size;
use crate::state::Request;
use crate::{
    PageLoad, PageRequest, PageSource, PagerError, PagerOptions, PagerState, Result, RowRange,
};

/// Reveals a [`PageSource`] one page at a time.
///
/// This type is UI-agnostic: it does not know about scrolling or rendering. A list adapter
/// reads [`Self::revealed`], [`Self::has_more`], [`Self::is_loading`] and [`Self::reset`], and
/// calls [`Self::request_next_page`] when the user scrolls near the end.
///
/// Source identity is pointer identity of the `Arc`: handing the same `Arc` back to
/// [`Self::configure`] keeps progress, a different one starts over.
///
/// Loads can be driven two ways:
/// - synchronously, via [`Self::settle`] / [`Self::request_next_page`], which slice the source
///   immediately;
/// - asynchronously, via [`Self::mark_requested`], [`Self::start_load`] and
///   [`Self::finish_load`], for sources whose rows arrive later.
///
/// Either way at most one load is in flight.
pub struct Pager<S: PageSource + ?Sized> {
    source: Arc<S>,
    options: PagerOptions,
    state: PagerState,
    revealed: Vec<S::Item>,
    in_flight: Option<PageRequest>,
    last_error: Option<PagerError>,
}

impl<S: PageSource + ?Sized> Pager<S> {
    /// Creates a pager over `source`. The first page is pending until [`Self::settle`] runs.
    pub fn new(source: Arc<S>, options: PagerOptions) -> Result<Self> {
        options.validate()?;
        let state = PagerState::new(source.len(), options.page_size);
        plog!(
            debug,
            total = state.total,
            page_size = options.page_size,
            "Pager::new"
        );
        Ok(Self {
            source,
            options,
            state,
            revealed: Vec::new(),
            in_flight: None,
            last_error: None,
        })
    }

    /// (Re-)initializes pagination over `source` with `page_size` items per page.
    ///
    /// Returns `Ok(true)` when progress was reset. Supplying the same `Arc` with the same page
    /// size is a no-op returning `Ok(false)`.
    pub fn configure(&mut self, source: Arc<S>, page_size: usize) -> Result<bool> {
        check_page_size(page_size)?;
        if Arc::ptr_eq(&self.source, &source) && page_size == self.options.page_size {
            return Ok(false);
        }
        self.options.page_size = page_size;
        self.state.page_size = page_size;
        self.replace_source(source);
        Ok(true)
    }

    /// Same as [`Self::configure`] with the current page size.
    pub fn set_source(&mut self, source: Arc<S>) -> bool {
        if Arc::ptr_eq(&self.source, &source) {
            return false;
        }
        self.replace_source(source);
        true
    }

    fn replace_source(&mut self, source: Arc<S>) {
        self.source = source;
        self.state = self.state.on_source_replaced(self.source.len());
        self.revealed.clear();
        self.in_flight = None;
        self.last_error = None;
        plog!(
            debug,
            total = self.state.total,
            page_size = self.state.page_size,
            generation = self.state.generation,
            "pager reset"
        );
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    pub fn options(&self) -> &PagerOptions {
        &self.options
    }

    pub fn page_size(&self) -> usize {
        self.options.page_size
    }

    pub fn state(&self) -> PagerState {
        self.state
    }

    /// The revealed prefix of the source.
    pub fn revealed(&self) -> &[S::Item] {
        &self.revealed
    }

    pub fn page_count(&self) -> usize {
        self.state.page_count
    }

    pub fn page_total(&self) -> usize {
        self.state.page_total()
    }

    pub fn total(&self) -> usize {
        self.state.total
    }

    pub fn has_more(&self) -> bool {
        self.state.has_more
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    /// True exactly while no page has been folded since the last reset.
    ///
    /// Renderers use this to drop every cached row measurement.
    pub fn reset(&self) -> bool {
        self.state.reset()
    }

    pub fn in_flight(&self) -> Option<PageRequest> {
        self.in_flight
    }

    /// The failure of the most recent load, cleared by the next successful one.
    pub fn last_error(&self) -> Option<&PagerError> {
        self.last_error.as_ref()
    }

    /// Requests the next page and folds it in immediately.
    ///
    /// `range` is the prefetch range reported by the scroll trigger. It is only logged: the
    /// page counter alone decides which rows load next.
    ///
    /// While a load is pending or in flight this is a no-op returning [`PageLoad::Skipped`].
    pub fn request_next_page(&mut self, range: RowRange) -> Result<PageLoad> {
        match self.mark_requested(range) {
            Request::Accepted => self.settle(),
            Request::Busy => Ok(PageLoad::Skipped),
            Request::Exhausted => Ok(PageLoad::Exhausted),
        }
    }

    /// Records a page request without loading anything yet.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn mark_requested(&mut self, range: RowRange) -> Request {
        let (state, request) = self.state.on_page_requested();
        self.state = state;
        match request {
            Request::Accepted => {
                plog!(
                    trace,
                    start_index = range.start_index,
                    end_index = range.end_index,
                    page = self.state.page_count,
                    "page requested"
                );
            }
            Request::Busy => {
                plog!(trace, page = self.state.page_count, "load in flight; skipping");
            }
            Request::Exhausted => {
                plog!(trace, total = self.state.total, "nothing left to reveal");
            }
        }
        request
    }

    /// Folds the pending page synchronously, if one is pending and nothing is in flight.
    pub fn settle(&mut self) -> Result<PageLoad> {
        let Some(request) = self.start_load() else {
            return Ok(PageLoad::Skipped);
        };
        let rows = self.source.slice(request.start_index, request.end_index);
        self.finish_load(request, rows)
    }

    /// Starts the pending load and returns the rows it must fetch.
    ///
    /// Returns `None` when no load is pending or one is already in flight.
    pub fn start_load(&mut self) -> Option<PageRequest> {
        if !self.state.is_loading || self.in_flight.is_some() {
            return None;
        }
        let range = self.state.next_page_range();
        let request = PageRequest {
            generation: self.state.generation,
            page: self.state.page_count,
            start_index: range.start_index,
            end_index: range.end_index,
        };
        self.in_flight = Some(request);
        Some(request)
    }

    /// Applies the result of a load started by [`Self::start_load`].
    ///
    /// A result for a request that is no longer in flight (for example because the source was
    /// replaced meanwhile) is [`PageLoad::Discarded`]. A short page is folded as is and the next
    /// page starts right after it. A failed fetch, or an empty one while rows remain, keeps
    /// progress and `has_more` untouched and returns [`PagerError::LoadFailure`]; the next request
    /// retries the same rows.
    pub fn finish_load<E: Display>(
        &mut self,
        request: PageRequest,
        rows: core::result::Result<Vec<S::Item>, E>,
    ) -> Result<PageLoad> {
        if self.in_flight != Some(request) {
            plog!(
                debug,
                page = request.page,
                generation = request.generation,
                "discarding stale page"
            );
            return Ok(PageLoad::Discarded);
        }
        self.in_flight = None;

        // Short pages fold as is; an empty page while rows remain counts as a failure.
        let rows = match rows {
            Ok(rows) if rows.is_empty() && !request.is_empty() => {
                Err(String::from("source returned no rows"))
            }
            Ok(rows) => Ok(rows),
            Err(err) => Err(err.to_string()),
        };

        match rows {
            Ok(mut rows) => {
                // A source returning more than asked must not break the prefix.
                rows.truncate(request.len());
                let fetched = rows.len();
                self.revealed.append(&mut rows);
                self.state = self.state.on_page_loaded(fetched);
                self.last_error = None;
                plog!(
                    debug,
                    page = request.page,
                    fetched,
                    revealed = self.state.revealed_len,
                    has_more = self.state.has_more,
                    "page folded"
                );
                Ok(PageLoad::Folded {
                    page: request.page,
                    range: RowRange::new(request.start_index, request.start_index + fetched),
                })
            }
            Err(reason) => {
                self.state = self.state.on_page_failed();
                let err = PagerError::LoadFailure {
                    page: request.page,
                    reason,
                };
                plog!(warn, page = request.page, error = %err, "page load failed");
                self.last_error = Some(err.clone());
                Err(err)
            }
        }
    }
}

impl<S> core::fmt::Debug for Pager<S>
where
    S: PageSource + ?Sized,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pager")
            .field("options", &self.options)
            .field("state", &self.state)
            .field("in_flight", &self.in_flight)
            .field("last_error", &self.last_error)
            .finish_non_exhaustive()
    }
}
