use pageview::RowRange;

/// Turns rendered row ranges into load-more signals.
///
/// After every render the loader scans the rendered rows, widened by `threshold` rows past the
/// end (and before the start), for rows the caller reports as not loaded. Each contiguous run of
/// unloaded rows becomes one [`RowRange`], stretched forward over further unloaded rows until
/// it spans `minimum_batch_size` rows or reaches the last row.
#[derive(Clone, Debug)]
pub struct InfiniteLoader {
    threshold: usize,
    minimum_batch_size: usize,
    last_rendered: Option<RowRange>,
}

impl InfiniteLoader {
    pub fn new(threshold: usize, minimum_batch_size: usize) -> Self {
        Self {
            threshold,
            minimum_batch_size: minimum_batch_size.max(1),
            last_rendered: None,
        }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn minimum_batch_size(&self) -> usize {
        self.minimum_batch_size
    }

    /// The rendered range of the most recent scan.
    pub fn last_rendered(&self) -> Option<RowRange> {
        self.last_rendered
    }

    pub fn scan(
        &mut self,
        rendered: RowRange,
        row_count: usize,
        is_row_loaded: impl Fn(usize) -> bool,
        mut emit: impl FnMut(RowRange),
    ) {
        self.last_rendered = Some(rendered);
        if rendered.is_empty() || row_count == 0 {
            return;
        }

        let start = rendered.start_index.saturating_sub(self.threshold);
        let end = rendered
            .end_index
            .saturating_add(self.threshold)
            .min(row_count);

        let mut run: Option<usize> = None;
        for i in start..end {
            match (is_row_loaded(i), run) {
                (false, None) => run = Some(i),
                (true, Some(run_start)) => {
                    emit(RowRange::new(run_start, i));
                    run = None;
                }
                _ => {}
            }
        }

        let Some(run_start) = run else {
            return;
        };
        let batch_end = run_start
            .saturating_add(self.minimum_batch_size)
            .min(row_count);
        let mut run_end = end;
        while run_end < batch_end && !is_row_loaded(run_end) {
            run_end += 1;
        }
        emit(RowRange::new(run_start, run_end));
    }
}
