use alloc::string::String;

use thiserror::Error;

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum PagerError {
    #[error("invalid page size {page_size}: pages must hold at least one item")]
    InvalidPageSize { page_size: usize },

    #[error("failed to load page {page}: {reason}")]
    LoadFailure { page: usize, reason: String },
}

pub type Result<T> = core::result::Result<T, PagerError>;
