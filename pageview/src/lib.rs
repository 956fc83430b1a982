//! A headless pager for infinite-scroll lists.
//!
//! For the virtualized list side (row measurement, windowing, scroll-driven loading), see the
//! `pageview-adapter` crate.
//!
//! This crate reveals a fixed collection one page at a time: it tracks how many pages have been
//! revealed, whether more exist, and whether a load is in flight. Pagination is expressed as pure
//! transitions over [`PagerState`]; [`Pager`] owns the state, the revealed rows, and a single
//! in-flight slot so that overlapping prefetch signals never load the same page twice.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to:
//! - hand over the collection as an `Arc` of a [`PageSource`]
//! - call [`Pager::request_next_page`] when the scroll position nears the end
//! - read back the revealed rows and loading flags on every render
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod error;
mod options;
mod pager;
mod source;
mod state;
mod types;


pub use error::{PagerError, Result};
pub use options::{DEFAULT_PAGE_SIZE, PagerOptions};
pub use pager::Pager;
pub use source::PageSource;
pub use state::{PagerState, Request};
pub use types::{PageLoad, PageRequest, RowRange};
