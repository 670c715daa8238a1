//! Errors intrinsic to sources and views.

use std::fmt;

/// An error indicating that an index fell outside `[0, count)`.
///
/// This is the only failure a plain source or view can produce by itself. Every
/// [`Source::Error`](crate::Source::Error) can be constructed from it.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct OutOfRange {
    index: isize,
    count: usize,
}

impl OutOfRange {
    /// Creates a new error for an unsigned index.
    ///
    /// Indices too large to be represented as `isize` saturate to `isize::MAX`.
    pub fn new(index: usize, count: usize) -> Self {
        Self::new_signed(isize::try_from(index).unwrap_or(isize::MAX), count)
    }

    /// Creates a new error for a signed index.
    pub fn new_signed(index: isize, count: usize) -> Self {
        Self { index, count }
    }

    /// Returns the number of elements in the source at the time of access.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Returns the offending index.
    pub fn index(&self) -> isize {
        self.index
    }
}

impl fmt::Display for OutOfRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let OutOfRange { index, count } = self;
        write!(
            f,
            "index {index} out of range for view with {count} elements"
        )
    }
}

impl std::error::Error for OutOfRange {}
