// Example: an infinite-scroll list over 100 rows, driven like a UI event loop.
use std::sync::Arc;

use pageview::PagerOptions;
use pageview_adapter::{ListOptions, PagedList, Viewport};

fn main() {
    let items: Arc<Vec<String>> = Arc::new((0..100).map(|i| format!("Item {i}")).collect());
    let mut list = PagedList::new(items, PagerOptions::default(), ListOptions::default())
        .expect("valid page size");

    list.on_resize(Viewport::new(80, 50), 0);
    list.tick(50);

    let mut rows = Vec::new();
    let mut now_ms = 50;
    while list.pager().has_more() {
        let bottom = list.total_height();
        list.on_scroll(bottom);

        list.visible_rows(&mut rows);
        for row in &rows {
            // Pretend every other row wraps onto two lines.
            let height = if row.index % 2 == 0 { 10 } else { 20 };
            list.measure_row(row.index, height);
        }

        let last = rows.last().map(|r| r.index).unwrap_or(0);
        println!(
            "t={now_ms}ms revealed={} last_row={:?}",
            list.revealed().len(),
            list.row(last)
        );
        now_ms += 16;
        list.tick(now_ms);
    }

    println!("done: {} rows, total_height={}", list.row_count(), list.total_height());
}
