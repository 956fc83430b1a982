use alloc::vec::Vec;

use virtualizer::{Virtualizer, VirtualizerOptions};

/// Measurement state of a single row.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RowState {
    #[default]
    Unmeasured,
    /// Rendered, waiting for the UI layer to report its height.
    Measuring,
    Measured(u32),
}

impl RowState {
    pub fn height(self) -> Option<u32> {
        match self {
            Self::Measured(h) => Some(h),
            _ => None,
        }
    }
}

/// Row height cache keyed by row index.
///
/// Heights and their prefix sums live in a [`Virtualizer`] keyed by row index; this layer adds
/// the [`RowState::Measuring`] state and per-row invalidation. Unmeasured rows report
/// `default_height`. Invalidation (`clear`/`clear_all`) puts rows back into
/// [`RowState::Unmeasured`] and is idempotent.
#[derive(Clone, Debug)]
pub struct MeasurementCache {
    default_height: u32,
    rows: Virtualizer,
    measuring: Vec<bool>,
}

impl MeasurementCache {
    pub fn new(default_height: u32) -> Self {
        Self::with_overscan(default_height, 0)
    }

    /// Like [`Self::new`], with `overscan` extra rows on each side of the rendered window.
    pub fn with_overscan(default_height: u32, overscan: usize) -> Self {
        let options =
            VirtualizerOptions::new(0, move |_| default_height).with_overscan(overscan);
        Self {
            default_height,
            rows: Virtualizer::new(options),
            measuring: Vec::new(),
        }
    }

    pub fn default_height(&self) -> u32 {
        self.default_height
    }

    /// The virtualizer holding row heights, viewport and scroll offset.
    pub fn virtualizer(&self) -> &Virtualizer {
        &self.rows
    }

    pub fn virtualizer_mut(&mut self) -> &mut Virtualizer {
        &mut self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.count()
    }

    /// Rows that come back keep the heights still cached for their index.
    pub fn set_row_count(&mut self, row_count: usize) {
        self.rows.set_count(row_count);
        self.measuring.truncate(row_count);
    }

    pub fn state(&self, index: usize) -> RowState {
        let measured = self.rows.is_measured(index);
        if let Some(height) = self.rows.item_size(index).filter(|_| measured) {
            return RowState::Measured(height);
        }
        if self.measuring.get(index).copied().unwrap_or(false) {
            RowState::Measuring
        } else {
            RowState::Unmeasured
        }
    }

    pub fn has(&self, index: usize) -> bool {
        matches!(self.state(index), RowState::Measured(_))
    }

    pub fn row_height(&self, index: usize) -> u32 {
        self.state(index).height().unwrap_or(self.default_height)
    }

    /// Number of rows holding a measured height.
    pub fn measured_len(&self) -> usize {
        self.rows.measurement_cache_len()
    }

    /// Marks an unmeasured row as being measured. Returns `false` if the row was not unmeasured
    /// or lies past the last row.
    pub fn begin(&mut self, index: usize) -> bool {
        if index >= self.row_count() || self.state(index) != RowState::Unmeasured {
            return false;
        }
        if index >= self.measuring.len() {
            self.measuring.resize(index + 1, false);
        }
        self.measuring[index] = true;
        true
    }

    /// Records a measured height. Rows past the last row are ignored.
    pub fn set(&mut self, index: usize, height: u32) {
        if index >= self.row_count() {
            return;
        }
        self.rows.measure(index, height);
        if let Some(measuring) = self.measuring.get_mut(index) {
            *measuring = false;
        }
    }

    pub fn clear(&mut self, index: usize) {
        if let Some(measuring) = self.measuring.get_mut(index) {
            *measuring = false;
        }
        if !self.rows.is_measured(index) {
            return;
        }
        let key = self.rows.key_for(index);
        let mut kept = self.rows.export_measurement_cache();
        kept.retain(|&(k, _)| k != key);
        self.rows.import_measurement_cache(kept);
    }

    pub fn clear_all(&mut self) {
        self.measuring.clear();
        self.rows.reset_measurements();
    }

    /// Sum of all row heights, unmeasured rows at the default height.
    pub fn total_height(&self) -> u64 {
        self.rows.total_size()
    }

    /// Start offset of row `index`, or `None` past the last row.
    pub fn row_offset(&self, index: usize) -> Option<u64> {
        self.rows.item_start(index)
    }
}
