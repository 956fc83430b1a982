use alloc::sync::Arc;
use alloc::vec::Vec;

use pageview::{PageLoad, PageSource, Pager, PagerOptions, Result, RowRange};

use crate::{ListAdapter, ListOptions, ListProps, RenderedRow, RowContent, Viewport};

/// A paged, virtualized list over a shared collection.
///
/// Composes a [`Pager`] with a [`ListAdapter`] and replays the render cycle a declarative UI
/// would run: every pager change is pushed to the adapter as fresh props, and every change to
/// the rendered window re-runs the load-more scan until no further page is needed.
pub struct PagedList<S: PageSource + ?Sized> {
    pager: Pager<S>,
    adapter: ListAdapter,
}

impl<S: PageSource + ?Sized> PagedList<S> {
    /// Creates the list and reveals the first page.
    pub fn new(
        items: Arc<S>,
        pager_options: PagerOptions,
        list_options: ListOptions,
    ) -> Result<Self> {
        let mut list = Self {
            pager: Pager::new(items, pager_options)?,
            adapter: ListAdapter::new(list_options),
        };
        list.mount();
        Ok(list)
    }

    /// Replaces the collection. The same `Arc` keeps progress; a new one starts over.
    ///
    /// Returns `true` when the list was reset.
    pub fn set_items(&mut self, items: Arc<S>) -> bool {
        if !self.pager.set_source(items) {
            return false;
        }
        self.mount();
        true
    }

    /// Changes the page size. Any change starts pagination over, like a new collection.
    ///
    /// Returns `Ok(true)` when the list was reset.
    pub fn configure(&mut self, page_size: usize) -> Result<bool> {
        let items = Arc::clone(self.pager.source());
        if !self.pager.configure(items, page_size)? {
            return Ok(false);
        }
        self.mount();
        Ok(true)
    }

    pub fn pager(&self) -> &Pager<S> {
        &self.pager
    }

    pub fn adapter(&self) -> &ListAdapter {
        &self.adapter
    }

    pub fn revealed(&self) -> &[S::Item] {
        self.pager.revealed()
    }

    pub fn row_count(&self) -> usize {
        self.adapter.row_count()
    }

    pub fn row(&self, index: usize) -> RowContent<'_, S::Item> {
        self.adapter.row(index, self.pager.revealed())
    }

    pub fn on_scroll(&mut self, scroll_offset: u64) {
        self.adapter.on_scroll(scroll_offset);
        self.load_visible();
    }

    pub fn on_resize(&mut self, viewport: Viewport, now_ms: u64) -> bool {
        if !self.adapter.on_resize(viewport, now_ms) {
            return false;
        }
        self.load_visible();
        true
    }

    pub fn tick(&mut self, now_ms: u64) -> bool {
        if !self.adapter.tick(now_ms) {
            return false;
        }
        self.load_visible();
        true
    }

    pub fn measure_row(&mut self, index: usize, height: u32) {
        self.adapter.measure_row(index, height);
    }

    pub fn total_height(&self) -> u64 {
        self.adapter.total_height()
    }

    pub fn visible_rows(&mut self, out: &mut Vec<RenderedRow>) {
        self.adapter.visible_rows(out);
    }

    /// Asks for the next page again, e.g. from a "retry" action on a failed row.
    pub fn retry(&mut self) -> Result<PageLoad> {
        let rendered = self.adapter.rendered_range();
        let load = self.pager.request_next_page(rendered);
        self.render();
        load
    }

    /// Stops reacting to scroll, resize and tick events.
    pub fn dispose(&mut self) {
        self.adapter.dispose();
    }

    pub fn is_disposed(&self) -> bool {
        self.adapter.is_disposed()
    }

    /// Reset render followed by the pending first page.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    fn mount(&mut self) {
        self.render();
        if let Err(err) = self.pager.settle() {
            alog!(warn, error = %err, "first page failed to load");
        }
        self.render();
        self.load_visible();
    }

    fn render(&mut self) {
        let props = ListProps::from_state(&self.pager.state(), self.pager.last_error().is_some());
        self.adapter.sync(props);
    }

    fn load_visible(&mut self) {
        if self.adapter.is_disposed() {
            return;
        }
        loop {
            let pages = self.pager.page_count();
            let rendered = self.adapter.rendered_range();
            let pager = &mut self.pager;
            self.adapter.on_rows_rendered(rendered, |range: RowRange| {
                pager.request_next_page(range).map(|_| ())
            });
            self.render();
            if self.pager.page_count() == pages {
                break;
            }
        }
    }
}

impl<S> core::fmt::Debug for PagedList<S>
where
    S: PageSource + ?Sized,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PagedList")
            .field("pager", &self.pager)
            .field("adapter", &self.adapter)
            .finish()
    }
}
