use crate::*;

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;

use pageview::{PageSource, PagerOptions, RowRange};

/// Fails every fetch while `failing` is set.
struct FlakySource {
    rows: Vec<u32>,
    failing: Cell<bool>,
}

impl PageSource for FlakySource {
    type Item = u32;
    type Error = String;

    fn len(&self) -> usize {
        self.rows.len()
    }

    fn slice(&self, start: usize, end: usize) -> Result<Vec<u32>, String> {
        if self.failing.get() {
            return Err(String::from("backend unavailable"));
        }
        Ok(self.rows[start..end].to_vec())
    }
}

fn props(revealed_len: usize, has_more: bool) -> ListProps {
    ListProps {
        revealed_len,
        has_more,
        ..ListProps::default()
    }
}

fn hundred() -> Arc<Vec<u32>> {
    Arc::new((0..100).collect())
}

#[test]
fn only_the_sentinel_row_is_unloaded() {
    let more = props(10, true);
    for i in 0..10 {
        assert!(more.is_row_loaded(i));
    }
    assert!(!more.is_row_loaded(10));
    assert_eq!(more.row_count(), 11);

    let done = props(25, false);
    for i in 0..=30 {
        assert!(done.is_row_loaded(i));
    }
}

#[test]
fn rows_resolve_to_items_or_placeholders() {
    let items = ["a", "b", "c"];
    let mut a = ListAdapter::new(ListOptions::default());
    a.sync(props(3, true));

    assert_eq!(a.row(0, &items), RowContent::Item(&"a"));
    assert_eq!(a.row(2, &items).item(), Some(&"c"));
    assert_eq!(a.row(3, &items), RowContent::Loading);
    assert_eq!(a.row(3, &items).label(), Some(LOADING_LABEL));

    a.sync(ListProps {
        load_failed: true,
        ..props(3, true)
    });
    assert_eq!(a.row(3, &items), RowContent::Failed);
    assert_eq!(a.row(3, &items).label(), Some(FAILED_LABEL));

    a.sync(props(3, false));
    assert_eq!(a.row(3, &items), RowContent::Empty);
    assert_eq!(a.row(3, &items).label(), None);
}

#[test]
fn growth_invalidates_only_the_newest_row() {
    let mut a = ListAdapter::new(ListOptions::default());
    assert_eq!(a.sync(props(10, true)), Invalidation::Row(9));
    for i in 0..11 {
        a.measure_row(i, 20);
    }
    assert_eq!(a.cache().measured_len(), 11);
    assert_eq!(a.total_height(), 220);

    assert_eq!(a.sync(props(11, true)), Invalidation::Row(10));
    assert_eq!(a.cache().state(10), RowState::Unmeasured);
    assert_eq!(a.cache().state(9), RowState::Measured(20));
    assert_eq!(a.cache().measured_len(), 10);
    // Rows 0..10 measured at 20, row 10 back to the default, row 11 is the new sentinel.
    assert_eq!(a.total_height(), 220);

    // Unchanged props touch nothing.
    assert_eq!(a.sync(props(11, true)), Invalidation::None);
    assert_eq!(a.cache().measured_len(), 10);
}

#[test]
fn reset_drops_every_measurement() {
    let mut a = ListAdapter::new(ListOptions::default());
    a.sync(props(10, true));
    for i in 0..5 {
        a.measure_row(i, 40);
    }

    let reset = ListProps {
        reset: true,
        is_loading: true,
        ..ListProps::default()
    };
    assert_eq!(a.sync(reset), Invalidation::All);
    assert_eq!(a.cache().measured_len(), 0);
    assert_eq!(a.row_count(), 1);

    // Still resetting on the next render: nothing left to drop.
    assert_eq!(a.sync(reset), Invalidation::None);
}

#[test]
fn two_resizes_coalesce_into_one_invalidation() {
    let mut a = ListAdapter::new(ListOptions::default());
    a.sync(props(10, true));
    a.measure_row(0, 30);

    assert!(a.on_resize(Viewport::new(80, 100), 0));
    assert!(a.on_resize(Viewport::new(80, 120), 10));
    assert!(!a.on_resize(Viewport::new(80, 120), 15));

    let mut fired = Vec::new();
    for now_ms in 0..=200 {
        if a.tick(now_ms) {
            fired.push(now_ms);
        }
    }
    assert_eq!(fired, vec![60]);
    assert_eq!(a.cache().measured_len(), 0);
    assert!(!a.is_resize_pending());
}

#[test]
fn dispose_cancels_a_pending_resize() {
    let mut a = ListAdapter::new(ListOptions::default());
    a.sync(props(10, true));
    a.measure_row(0, 30);
    a.on_resize(Viewport::new(80, 100), 0);
    assert!(a.is_resize_pending());

    a.dispose();
    assert!(a.is_disposed());
    assert!(!a.is_resize_pending());
    assert!(!a.tick(1_000));
    assert!(!a.on_resize(Viewport::new(40, 40), 1_000));
    assert_eq!(a.cache().state(0), RowState::Measured(30));
}

#[test]
fn loads_are_suppressed_while_a_page_is_loading() {
    let mut a = ListAdapter::new(ListOptions::default());
    a.sync(ListProps {
        is_loading: true,
        ..props(10, true)
    });
    a.on_resize(Viewport::new(80, 200), 0);
    let rendered = a.rendered_range();
    assert_eq!(rendered, RowRange::new(0, 11));

    let mut seen = Vec::new();
    let triggered = a.on_rows_rendered(rendered, |range| {
        seen.push(range);
        Ok::<(), String>(())
    });
    assert_eq!(triggered, 0);
    assert!(seen.is_empty());

    a.sync(props(10, true));
    let triggered = a.on_rows_rendered(rendered, |range| {
        seen.push(range);
        Ok::<(), String>(())
    });
    assert_eq!(triggered, 1);
    assert_eq!(seen, vec![RowRange::new(10, 11)]);
}

#[test]
fn trigger_errors_are_logged_not_propagated() {
    let mut a = ListAdapter::new(ListOptions::default());
    a.sync(props(10, true));
    a.on_resize(Viewport::new(80, 200), 0);
    let rendered = a.rendered_range();
    let triggered =
        a.on_rows_rendered(rendered, |_| Err::<(), String>(String::from("boom")));
    assert_eq!(triggered, 0);
}

#[test]
fn nothing_to_load_once_everything_is_revealed() {
    let mut a = ListAdapter::new(ListOptions::default());
    a.sync(props(25, false));
    a.on_resize(Viewport::new(80, 1_000), 0);
    let rendered = a.rendered_range();
    assert_eq!(rendered, RowRange::new(0, 26));
    let triggered = a.on_rows_rendered(rendered, |_| Ok::<(), String>(()));
    assert_eq!(triggered, 0);
}

#[test]
fn visible_rows_report_offsets_and_measuring_state() {
    let mut a = ListAdapter::new(ListOptions::default());
    a.sync(props(10, true));
    a.on_resize(Viewport::new(80, 35), 0);
    a.measure_row(1, 25);

    let mut rows = Vec::new();
    a.visible_rows(&mut rows);
    assert_eq!(
        rows,
        vec![
            RenderedRow {
                index: 0,
                offset: 0,
                height: 10,
                state: RowState::Measuring,
                loaded: true,
            },
            RenderedRow {
                index: 1,
                offset: 10,
                height: 25,
                state: RowState::Measured(25),
                loaded: true,
            },
        ]
    );
    assert_eq!(a.total_height(), 125);

    a.on_scroll(40);
    assert_eq!(a.rendered_range(), RowRange::new(2, 6));

    // Rows past the end are ignored.
    a.measure_row(11, 99);
    assert_eq!(a.cache().state(11), RowState::Unmeasured);
}

#[test]
fn offsets_follow_measured_heights() {
    let mut cache = MeasurementCache::new(10);
    cache.set_row_count(5);
    assert_eq!(cache.total_height(), 50);

    cache.set(2, 30);
    assert_eq!(cache.row_offset(2), Some(20));
    assert_eq!(cache.row_offset(3), Some(50));
    assert_eq!(cache.total_height(), 70);
    assert_eq!(cache.row_offset(5), None);

    cache.clear(2);
    assert_eq!(cache.row_offset(3), Some(30));
    assert_eq!(cache.total_height(), 50);

    cache.set_row_count(2);
    assert_eq!(cache.total_height(), 20);
}

#[test]
fn rendered_range_clamps_and_overscans() {
    let mut a = ListAdapter::new(ListOptions::default());
    a.sync(props(4, false));
    a.on_resize(Viewport::new(80, 10), 0);
    a.on_scroll(20);
    assert_eq!(a.rendered_range(), RowRange::new(2, 3));

    let mut wide = ListAdapter::new(ListOptions::default().with_overscan(1));
    wide.sync(props(4, false));
    wide.on_resize(Viewport::new(80, 10), 0);
    wide.on_scroll(20);
    assert_eq!(wide.rendered_range(), RowRange::new(1, 4));

    a.on_resize(Viewport::new(80, 20), 0);
    a.on_scroll(u64::MAX);
    assert_eq!(a.rendered_range(), RowRange::new(3, 5));

    let mut hidden = ListAdapter::new(ListOptions::default());
    hidden.sync(props(4, false));
    assert!(hidden.rendered_range().is_empty());
}

#[test]
fn loader_emits_unloaded_runs_stretched_to_the_batch_size() {
    let mut loader = InfiniteLoader::new(2, 5);
    let loaded = |i: usize| i < 4 || (6..8).contains(&i);

    let mut out = Vec::new();
    loader.scan(RowRange::new(0, 3), 20, loaded, |r| out.push(r));
    assert_eq!(out, vec![RowRange::new(4, 6)]);

    out.clear();
    loader.scan(RowRange::new(3, 7), 20, loaded, |r| out.push(r));
    assert_eq!(out, vec![RowRange::new(4, 6), RowRange::new(8, 13)]);
    assert_eq!(loader.last_rendered(), Some(RowRange::new(3, 7)));

    out.clear();
    loader.scan(RowRange::default(), 20, loaded, |r| out.push(r));
    assert!(out.is_empty());
}

#[test]
fn debouncer_keeps_a_single_deadline() {
    let mut d = Debouncer::new(50);
    assert!(!d.schedule(0));
    assert!(d.schedule(10));
    assert_eq!(d.deadline_ms(), Some(60));
    assert!(!d.poll(59));
    assert!(d.poll(60));
    assert!(!d.poll(61));
    assert!(!d.is_pending());
    assert!(!d.cancel());

    d.schedule(100);
    assert!(d.cancel());
    assert!(!d.poll(1_000));
}

#[test]
fn measurement_states_move_one_way_until_invalidated() {
    let mut cache = MeasurementCache::new(10);
    cache.set_row_count(5);
    assert_eq!(cache.state(3), RowState::Unmeasured);
    assert!(cache.begin(3));
    assert!(!cache.begin(3));
    assert_eq!(cache.state(3), RowState::Measuring);
    assert_eq!(cache.row_height(3), 10);

    cache.set(3, 12);
    cache.set(3, 14);
    assert_eq!(cache.state(3), RowState::Measured(14));
    assert!(cache.has(3));
    assert_eq!(cache.measured_len(), 1);

    cache.clear(3);
    cache.clear(3);
    cache.clear(99);
    cache.set(99, 40);
    assert!(!cache.begin(99));
    assert_eq!(cache.state(3), RowState::Unmeasured);
    assert_eq!(cache.measured_len(), 0);

    cache.set(1, 5);
    cache.clear_all();
    assert!(!cache.has(1));
    assert_eq!(cache.row_height(1), 10);
}

#[test]
fn scrolling_reveals_pages_until_the_end() {
    let items = hundred();
    let mut list = PagedList::new(
        Arc::clone(&items),
        PagerOptions::default(),
        ListOptions::default(),
    )
    .unwrap();
    assert_eq!(list.revealed(), &items[..10]);
    assert!(list.pager().has_more());
    assert_eq!(list.row_count(), 11);
    assert_eq!(list.row(10), RowContent::Loading);

    // 50px shows five rows; the sentinel at row 10 is within the prefetch threshold.
    assert!(list.on_resize(Viewport::new(80, 50), 0));
    assert_eq!(list.revealed().len(), 20);

    list.on_scroll(160);
    assert_eq!(list.revealed().len(), 40);
    assert!(list.pager().has_more());

    for _ in 0..20 {
        if !list.pager().has_more() {
            break;
        }
        let bottom = list.total_height();
        list.on_scroll(bottom);
    }
    assert_eq!(list.revealed(), &items[..]);
    assert_eq!(list.pager().page_count(), 10);
    assert_eq!(list.row(100), RowContent::Empty);
    assert_eq!(list.row(99), RowContent::Item(&99));
}

#[test]
fn replacing_items_resets_the_list() {
    let items = hundred();
    let mut list = PagedList::new(
        Arc::clone(&items),
        PagerOptions::default(),
        ListOptions::default(),
    )
    .unwrap();
    list.on_resize(Viewport::new(80, 50), 0);
    assert_eq!(list.revealed().len(), 20);
    list.measure_row(3, 42);

    assert!(!list.set_items(Arc::clone(&items)));
    assert_eq!(list.revealed().len(), 20);
    assert_eq!(list.adapter().cache().state(3), RowState::Measured(42));

    assert!(list.set_items(Arc::new((0..5).collect())));
    assert_eq!(list.revealed(), &[0, 1, 2, 3, 4]);
    assert!(!list.pager().has_more());
    assert_eq!(list.pager().page_count(), 1);
    assert_eq!(list.adapter().cache().measured_len(), 0);
    assert_eq!(list.row(5), RowContent::Empty);
}

#[test]
fn failed_page_shows_a_placeholder_and_can_be_retried() {
    let source = Arc::new(FlakySource {
        rows: (0..30).collect(),
        failing: Cell::new(false),
    });
    let mut list = PagedList::new(
        Arc::clone(&source),
        PagerOptions::default(),
        ListOptions::default(),
    )
    .unwrap();

    source.failing.set(true);
    list.on_resize(Viewport::new(80, 50), 0);
    assert_eq!(list.revealed().len(), 10);
    assert!(!list.pager().is_loading());
    assert_eq!(list.row(10), RowContent::Failed);

    source.failing.set(false);
    assert!(list.retry().unwrap().is_folded());
    assert_eq!(list.revealed().len(), 20);
    assert_eq!(list.row(20), RowContent::Loading);
}

#[test]
fn disposed_list_ignores_pending_resize() {
    let mut list = PagedList::new(hundred(), PagerOptions::default(), ListOptions::default())
        .unwrap();
    list.on_resize(Viewport::new(80, 50), 0);
    list.measure_row(0, 33);
    list.dispose();
    assert!(!list.tick(100));
    assert_eq!(list.adapter().cache().state(0), RowState::Measured(33));
}

#[test]
fn disposed_list_ignores_scrolling() {
    let mut list = PagedList::new(hundred(), PagerOptions::default(), ListOptions::default())
        .unwrap();
    list.on_resize(Viewport::new(80, 50), 0);
    assert_eq!(list.revealed().len(), 20);

    list.dispose();
    assert!(list.is_disposed());
    list.on_scroll(list.total_height());
    assert_eq!(list.revealed().len(), 20);
    assert_eq!(list.adapter().scroll_offset(), 0);
}

#[test]
fn changing_the_page_size_starts_over() {
    let items = hundred();
    let mut list = PagedList::new(
        Arc::clone(&items),
        PagerOptions::default(),
        ListOptions::default(),
    )
    .unwrap();
    list.on_resize(Viewport::new(80, 50), 0);
    assert_eq!(list.revealed().len(), 20);

    assert!(!list.configure(10).unwrap());
    assert_eq!(list.revealed().len(), 20);

    assert!(list.configure(25).unwrap());
    assert_eq!(list.pager().page_size(), 25);
    assert_eq!(list.pager().page_count(), 1);
    assert_eq!(list.revealed(), &items[..25]);

    assert_eq!(
        list.configure(0),
        Err(pageview::PagerError::InvalidPageSize { page_size: 0 })
    );
    assert_eq!(list.revealed().len(), 25);
}
