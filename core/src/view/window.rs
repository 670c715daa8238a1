use crate::{source::check_index, Source};

/// A view of a contiguous range of its upstream.
///
/// A window is defined by an `offset` and a requested `length`. Windows never fail to construct:
/// when fewer than `length` elements remain after `offset`, the window is truncated to those that
/// remain, and when `offset` is past the end, the window is empty. Since the clamping is done
/// against the current count of the upstream on every access, a window over a source that grows or
/// shrinks follows along.
///
/// Calling [`Window::skip`] or [`Window::take`] on a window folds the new bound into the existing
/// window instead of stacking another layer; the result is indistinguishable from the stacked
/// version.
///
/// See [`SourceExt::skip`](crate::SourceExt::skip), [`SourceExt::take`](crate::SourceExt::take),
/// and [`SourceExt::window`](crate::SourceExt::window).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Window<S> {
    source: S,
    offset: usize,
    length: usize,
}

impl<S> Window<S> {
    /// Creates a new window of at most `length` elements starting from `offset`.
    pub fn new(source: S, offset: usize, length: usize) -> Self {
        Self {
            source,
            offset,
            length,
        }
    }

    /// Returns the offset of the window into the upstream source.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the requested length of the window, before clamping.
    ///
    /// This is `usize::MAX` for a window created by skipping.
    pub fn len_limit(&self) -> usize {
        self.length
    }

    /// Returns a reference to the upstream source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the upstream source.
    pub fn into_inner(self) -> S {
        self.source
    }

    /// Skips a further `n` elements of the window.
    pub fn skip(self, n: usize) -> Self {
        Self {
            source: self.source,
            offset: self.offset.saturating_add(n),
            length: self.length.saturating_sub(n),
        }
    }

    /// Limits the window to at most its first `n` elements.
    pub fn take(self, n: usize) -> Self {
        Self {
            source: self.source,
            offset: self.offset,
            length: self.length.min(n),
        }
    }
}

impl<S> Source for Window<S>
where
    S: Source,
{
    type Item = S::Item;
    type Error = S::Error;

    fn count(&self) -> usize {
        self.source
            .count()
            .saturating_sub(self.offset)
            .min(self.length)
    }

    fn at(&self, index: usize) -> Result<Self::Item, Self::Error> {
        let index = check_index(index, self.count())?;

        // Cannot overflow, since index < count <= upstream count - offset
        self.source.at(self.offset + index)
    }
}
