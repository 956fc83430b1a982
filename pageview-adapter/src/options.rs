pub const DEFAULT_ROW_HEIGHT: u32 = 10;
pub const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 50;
pub const DEFAULT_THRESHOLD: usize = 15;
pub const DEFAULT_MINIMUM_BATCH_SIZE: usize = 10;

/// Configuration for [`crate::ListAdapter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListOptions {
    /// Height used for rows that have not been measured yet.
    pub default_row_height: u32,

    /// Extra rows rendered on each side of the visible window.
    pub overscan: usize,

    /// Quiet period after the last resize before all row heights are recomputed.
    pub resize_debounce_ms: u64,

    /// How many rows beyond the rendered window are checked for unloaded data.
    pub threshold: usize,

    /// Smallest run of rows a single load-more signal asks for.
    pub minimum_batch_size: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            default_row_height: DEFAULT_ROW_HEIGHT,
            overscan: 0,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
            threshold: DEFAULT_THRESHOLD,
            minimum_batch_size: DEFAULT_MINIMUM_BATCH_SIZE,
        }
    }
}

impl ListOptions {
    pub fn with_default_row_height(mut self, height: u32) -> Self {
        self.default_row_height = height;
        self
    }

    pub fn with_overscan(mut self, overscan: usize) -> Self {
        self.overscan = overscan;
        self
    }

    pub fn with_resize_debounce_ms(mut self, delay_ms: u64) -> Self {
        self.resize_debounce_ms = delay_ms;
        self
    }

    pub fn with_threshold(mut self, threshold: usize) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_minimum_batch_size(mut self, minimum_batch_size: usize) -> Self {
        self.minimum_batch_size = minimum_batch_size;
        self
    }
}
