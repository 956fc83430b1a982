// Example: reveal a collection page by page, synchronously and with a deferred load.
use std::sync::Arc;

use pageview::{PageLoad, Pager, PagerOptions, RowRange};

fn main() {
    let items: Arc<Vec<String>> = Arc::new((0..25).map(|i| format!("row {i}")).collect());
    let mut pager = Pager::new(Arc::clone(&items), PagerOptions::new(10))
        .expect("valid page size");

    // The first page is pending until the first render settles it.
    pager.settle().expect("in-memory source");
    println!(
        "revealed={} has_more={}",
        pager.revealed().len(),
        pager.has_more()
    );

    loop {
        match pager.request_next_page(RowRange::new(pager.revealed().len(), pager.total())) {
            Ok(PageLoad::Folded { page, range }) => println!("folded page {page}: {range:?}"),
            Ok(other) => {
                println!("stopped: {other:?}");
                break;
            }
            Err(err) => {
                println!("failed: {err}");
                break;
            }
        }
    }

    // Deferred loading: start the fetch now, deliver the rows later.
    let mut pager = Pager::new(Arc::clone(&items), PagerOptions::default()).expect("valid");
    let request = pager.start_load().expect("first page pending");
    let rows = items[request.start_index..request.end_index].to_vec();
    let load = pager.finish_load(request, Ok::<_, std::convert::Infallible>(rows));
    println!("deferred: {load:?}, revealed={}", pager.revealed().len());
}
