//! Virtualized list adapter for the `pageview` crate.
//!
//! The `pageview` crate decides which rows are revealed. This crate renders them as a windowed,
//! infinitely scrolling list and keeps row measurements honest:
//!
//! - Row height cache with per-row and full invalidation
//! - Row offsets and the rendered window for a scroll position, via the `virtualizer` crate
//! - Scroll-driven load-more signals with a trailing "Loading..." sentinel row
//! - Debounced re-measurement after viewport resizes
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings). Time is supplied by
//! the caller as `now_ms`.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod adapter;
mod cache;
mod debounce;
mod list;
mod loader;
mod options;

#[cfg(test)]
mod tests;

pub use adapter::{
    FAILED_LABEL, Invalidation, LOADING_LABEL, ListAdapter, ListProps, RenderedRow, RowContent,
    Viewport,
};
pub use cache::{MeasurementCache, RowState};
pub use debounce::Debouncer;
pub use list::PagedList;
pub use loader::InfiniteLoader;
pub use options::{
    DEFAULT_MINIMUM_BATCH_SIZE, DEFAULT_RESIZE_DEBOUNCE_MS, DEFAULT_ROW_HEIGHT, DEFAULT_THRESHOLD,
    ListOptions,
};
