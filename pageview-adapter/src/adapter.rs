use alloc::vec::Vec;
use core::fmt::Display;

use pageview::{PagerState, RowRange};

use crate::{Debouncer, InfiniteLoader, ListOptions, MeasurementCache, RowState};

pub const LOADING_LABEL: &str = "Loading...";
pub const FAILED_LABEL: &str = "Failed to load";

/// What the adapter is told about the pager on each render.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListProps {
    pub revealed_len: usize,
    pub has_more: bool,
    pub is_loading: bool,
    /// True while nothing has been revealed since the source was replaced.
    pub reset: bool,
    /// The last page load failed; the trailing row shows a failure placeholder.
    pub load_failed: bool,
}

impl ListProps {
    pub fn from_state(state: &PagerState, load_failed: bool) -> Self {
        Self {
            revealed_len: state.revealed_len,
            has_more: state.has_more,
            is_loading: state.is_loading,
            reset: state.reset(),
            load_failed,
        }
    }

    /// Revealed rows plus the trailing sentinel row.
    pub fn row_count(&self) -> usize {
        self.revealed_len + 1
    }

    /// Every row is loaded except the sentinel while more pages exist.
    pub fn is_row_loaded(&self, index: usize) -> bool {
        !self.has_more || index < self.revealed_len
    }
}

/// Content of one row.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowContent<'a, T> {
    Item(&'a T),
    /// The sentinel row while the next page is not revealed yet.
    Loading,
    /// The sentinel row after a failed load.
    Failed,
    /// The sentinel row once everything is revealed.
    Empty,
}

impl<'a, T> RowContent<'a, T> {
    pub fn item(&self) -> Option<&'a T> {
        match *self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// Placeholder text for non-item rows.
    pub fn label(&self) -> Option<&'static str> {
        match self {
            Self::Loading => Some(LOADING_LABEL),
            Self::Failed => Some(FAILED_LABEL),
            Self::Item(_) | Self::Empty => None,
        }
    }
}

/// A row inside the rendered window.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RenderedRow {
    pub index: usize,
    /// Start offset in the scroll axis.
    pub offset: u64,
    /// Measured height, or the default height while unmeasured.
    pub height: u32,
    pub state: RowState,
    pub loaded: bool,
}

/// Size of the scrollable viewport as reported by the UI layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Which cached measurements a prop update threw away.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Invalidation {
    None,
    Row(usize),
    All,
}

/// Renders a window of the revealed rows and drives scroll-triggered page loads.
///
/// The adapter does not own pagination state. It is driven by:
/// - [`Self::sync`] with fresh [`ListProps`] after every pager change
/// - [`Self::on_scroll`] / [`Self::on_resize`] when UI events occur
/// - [`Self::on_rows_rendered`] after drawing, with the page-load trigger
/// - [`Self::tick`] on each frame/timer tick (for the resize debounce)
/// - [`Self::measure_row`] once the UI knows a row's real height
#[derive(Clone, Debug)]
pub struct ListAdapter {
    options: ListOptions,
    props: ListProps,
    cache: MeasurementCache,
    loader: InfiniteLoader,
    resize: Debouncer,
    viewport: Viewport,
    disposed: bool,
}

impl ListAdapter {
    pub fn new(options: ListOptions) -> Self {
        let mut cache =
            MeasurementCache::with_overscan(options.default_row_height, options.overscan);
        cache.set_row_count(1);
        Self {
            cache,
            loader: InfiniteLoader::new(options.threshold, options.minimum_batch_size),
            resize: Debouncer::new(options.resize_debounce_ms),
            props: ListProps::default(),
            viewport: Viewport::default(),
            disposed: false,
            options,
        }
    }

    pub fn options(&self) -> &ListOptions {
        &self.options
    }

    pub fn props(&self) -> ListProps {
        self.props
    }

    pub fn cache(&self) -> &MeasurementCache {
        &self.cache
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scroll_offset(&self) -> u64 {
        self.cache.virtualizer().scroll_offset()
    }

    pub fn is_resize_pending(&self) -> bool {
        self.resize.is_pending()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn row_count(&self) -> usize {
        self.props.row_count()
    }

    pub fn is_row_loaded(&self, index: usize) -> bool {
        self.props.is_row_loaded(index)
    }

    /// Resolves what row `index` shows, given the revealed rows.
    pub fn row<'a, T>(&self, index: usize, revealed: &'a [T]) -> RowContent<'a, T> {
        if self.props.load_failed && index == self.props.revealed_len {
            return RowContent::Failed;
        }
        if !self.is_row_loaded(index) {
            return RowContent::Loading;
        }
        match revealed.get(index) {
            Some(item) => RowContent::Item(item),
            None => RowContent::Empty,
        }
    }

    /// Applies new props and invalidates the measurements they make stale.
    pub fn sync(&mut self, props: ListProps) -> Invalidation {
        let prev = self.props;
        self.props = props;
        self.cache.set_row_count(props.row_count());

        if (props.reset && !prev.reset) || props.revealed_len < prev.revealed_len {
            alog!(
                debug,
                revealed = props.revealed_len,
                "list reset; dropping all row heights"
            );
            self.invalidate_all();
            return Invalidation::All;
        }

        if props.revealed_len > prev.revealed_len {
            let newest = props.revealed_len - 1;
            self.cache.clear(newest);
            alog!(trace, newest, "rows appended");
            return Invalidation::Row(newest);
        }

        Invalidation::None
    }

    /// Records the scroll offset. Ignored once disposed.
    pub fn on_scroll(&mut self, scroll_offset: u64) {
        if self.disposed {
            return;
        }
        self.cache.virtualizer_mut().set_scroll_offset(scroll_offset);
    }

    /// Records a new viewport size and schedules the debounced full re-measure.
    ///
    /// Returns `false` when the size did not change or the adapter was disposed.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn on_resize(&mut self, viewport: Viewport, now_ms: u64) -> bool {
        if self.disposed || self.viewport == viewport {
            return false;
        }
        self.viewport = viewport;
        self.cache.virtualizer_mut().set_viewport_size(viewport.height);
        let replaced = self.resize.schedule(now_ms);
        alog!(
            trace,
            width = viewport.width,
            height = viewport.height,
            replaced,
            "resizing"
        );
        true
    }

    /// Runs the resize debounce. Returns `true` when all row heights were invalidated.
    pub fn tick(&mut self, now_ms: u64) -> bool {
        if self.disposed || !self.resize.poll(now_ms) {
            return false;
        }
        alog!(debug, now_ms, "resize settled; dropping all row heights");
        self.invalidate_all();
        true
    }

    /// Stops the adapter: a pending resize invalidation is canceled and never fires.
    pub fn dispose(&mut self) {
        if self.resize.cancel() {
            alog!(trace, "canceled pending resize");
        }
        self.disposed = true;
    }

    pub fn measure_row(&mut self, index: usize, height: u32) {
        if index >= self.row_count() {
            return;
        }
        if self.cache.state(index) == RowState::Measured(height) {
            return;
        }
        self.cache.set(index, height);
    }

    pub fn total_height(&self) -> u64 {
        self.cache.total_height()
    }

    /// Rows intersecting the viewport, widened by the overscan. Offsets past the end are clamped
    /// so the last rows fill the viewport.
    pub fn rendered_range(&self) -> RowRange {
        let range = self.cache.virtualizer().virtual_range();
        RowRange::new(range.start_index, range.end_index)
    }

    /// Collects the rendered rows into `out` (clears `out` first).
    ///
    /// Unmeasured rows in the window move to [`RowState::Measuring`].
    pub fn visible_rows(&mut self, out: &mut Vec<RenderedRow>) {
        out.clear();
        let mut items = Vec::new();
        self.cache.virtualizer().collect_virtual_items(&mut items);
        for item in items {
            self.cache.begin(item.index);
            out.push(RenderedRow {
                index: item.index,
                offset: item.start,
                height: item.size,
                state: self.cache.state(item.index),
                loaded: self.is_row_loaded(item.index),
            });
        }
    }

    /// Scans `rendered` for unloaded rows and calls `load_more_rows` for each run found.
    ///
    /// While a page is loading, the trigger is swapped for a no-op so that at most one load is
    /// ever in flight. Trigger errors are logged and swallowed.
    ///
    /// Returns how many times the real trigger ran successfully.
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
    pub fn on_rows_rendered<E: Display>(
        &mut self,
        rendered: RowRange,
        mut load_more_rows: impl FnMut(RowRange) -> Result<(), E>,
    ) -> usize {
        let props = self.props;
        let mut ranges = Vec::new();
        self.loader.scan(
            rendered,
            props.row_count(),
            |i| props.is_row_loaded(i),
            |range| ranges.push(range),
        );

        let mut noop = |_: RowRange| -> Result<(), E> { Ok(()) };
        let trigger: &mut dyn FnMut(RowRange) -> Result<(), E> = if props.is_loading {
            &mut noop
        } else {
            &mut load_more_rows
        };

        let mut triggered = 0;
        for range in ranges {
            match trigger(range) {
                Ok(()) if !props.is_loading => triggered += 1,
                Ok(()) => {}
                Err(err) => {
                    alog!(
                        warn,
                        start_index = range.start_index,
                        end_index = range.end_index,
                        error = %err,
                        "load-more trigger failed"
                    );
                }
            }
        }
        triggered
    }

    fn invalidate_all(&mut self) {
        self.cache.clear_all();
    }
}
