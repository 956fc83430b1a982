use alloc::vec::Vec;
use core::convert::Infallible;
use core::fmt::Display;

/// A finite, ordered collection that can be revealed one page at a time.
///
/// The in-memory implementations for `[T]` and `Vec<T>` never fail. A source backed by I/O
/// reports failures through `Error`, which the pager turns into
/// [`crate::PagerError::LoadFailure`] while staying retryable.
pub trait PageSource {
    type Item;
    type Error: Display;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the items in `start..end`.
    ///
    /// The pager only asks for `start <= end <= len()`.
    fn slice(&self, start: usize, end: usize) -> Result<Vec<Self::Item>, Self::Error>;
}

impl<T: Clone> PageSource for [T] {
    type Item = T;
    type Error = Infallible;

    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    fn slice(&self, start: usize, end: usize) -> Result<Vec<T>, Infallible> {
        let end = end.min(<[T]>::len(self));
        let start = start.min(end);
        Ok(self[start..end].to_vec())
    }
}

impl<T: Clone> PageSource for Vec<T> {
    type Item = T;
    type Error = Infallible;

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn slice(&self, start: usize, end: usize) -> Result<Vec<T>, Infallible> {
        PageSource::slice(self.as_slice(), start, end)
    }
}
