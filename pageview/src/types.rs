/// A half-open range of row indexes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RowRange {
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl RowRange {
    pub fn new(start_index: usize, end_index: usize) -> Self {
        Self {
            start_index,
            end_index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start_index >= self.end_index
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.end_index
    }
}

/// A page load that has been started and not finished yet.
///
/// Returned by [`crate::Pager::start_load`] and handed back to [`crate::Pager::finish_load`]
/// once the rows are available. A pager holds at most one of these at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRequest {
    /// Source generation the request was issued against.
    pub generation: u64,
    /// Zero-based page number (the page count when the load started).
    pub page: usize,
    pub start_index: usize,
    pub end_index: usize, // exclusive
}

impl PageRequest {
    pub fn range(&self) -> RowRange {
        RowRange::new(self.start_index, self.end_index)
    }

    pub fn len(&self) -> usize {
        self.end_index.saturating_sub(self.start_index)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The resolved outcome of a page-advance request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageLoad {
    /// The page was appended to the revealed rows.
    Folded { page: usize, range: RowRange },
    /// A load was already pending or in flight; nothing changed.
    Skipped,
    /// Every row is already revealed; nothing changed.
    Exhausted,
    /// The result belonged to a request that is no longer in flight and was dropped.
    Discarded,
}

impl PageLoad {
    pub fn is_folded(&self) -> bool {
        matches!(self, Self::Folded { .. })
    }
}
