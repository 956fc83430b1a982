use crate::{PagerError, Result};

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Configuration for [`crate::Pager`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PagerOptions {
    /// Number of items revealed per page. Must be greater than zero.
    pub page_size: usize,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PagerOptions {
    pub fn new(page_size: usize) -> Self {
        Self { page_size }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_page_size(self.page_size)
    }
}

pub(crate) fn check_page_size(page_size: usize) -> Result<()> {
    if page_size == 0 {
        plog!(warn, page_size, "rejecting empty page size");
        return Err(PagerError::InvalidPageSize { page_size });
    }
    Ok(())
}
