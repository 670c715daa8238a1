//! Lazy views over sources.
//!
//! A view wraps an upstream [`Source`] and computes each element on demand. Views never copy or
//! traverse their upstream when constructed, and every view is itself a source, so views can be
//! stacked in any order. Views are usually built through the combinators on [`SourceExt`].
//!
//! # Ownership
//!
//! A view owns whatever it wraps. To keep using the upstream after building a view, wrap a
//! reference (see [`SourceExt::by_ref`]), in which case the borrow checker bounds the lifetime of
//! the view by that of the source. To let a view outlive the scope that created its source, wrap
//! an [`Rc`](std::rc::Rc) or [`Arc`](std::sync::Arc) instead.

use crate::{OutOfRange, Source};

mod cached;
pub use cached::Cached;

mod iter;
pub use iter::Iter;

mod map;
pub use map::Map;

mod try_map;
pub use try_map::TryMap;

mod window;
pub use window::Window;

/// Combinators for building views on top of a [`Source`].
///
/// This trait is implemented for every source.
///
/// # Examples
///
/// ```
/// use lazyview_core::{Source, SourceExt};
///
/// let source = vec![1, 2, 3];
///
/// let plus_one = source.by_ref().map(|x| x + 1);
/// assert_eq!(plus_one.count(), 3);
/// assert_eq!(plus_one.collect_values(), Ok(vec![2, 3, 4]));
///
/// let window = source.by_ref().window(1, 5);
/// assert_eq!(window.count(), 2);
/// assert_eq!(window.collect_values(), Ok(vec![2, 3]));
///
/// let composed = source.map(|x| x * 2).window(1, 1);
/// assert_eq!(composed.count(), 1);
/// assert_eq!(composed.at(0), Ok(4));
/// ```
pub trait SourceExt: Source {
    /// Returns a view applying `f` to each element when accessed.
    ///
    /// The function is invoked once per successful call to [`Source::at`], and its result is never
    /// memoized; use [`SourceExt::cached`] on top of the view when that is required.
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> U,
    {
        Map::new(self, f)
    }

    /// Returns a view applying a fallible `f` to each element when accessed.
    ///
    /// Errors returned by `f` are passed through to the caller as-is.
    fn try_map<U, E, F>(self, f: F) -> TryMap<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> Result<U, E>,
        E: From<Self::Error> + From<OutOfRange>,
    {
        TryMap::new(self, f)
    }

    /// Returns a view skipping the first `n` elements.
    fn skip(self, n: usize) -> Window<Self>
    where
        Self: Sized,
    {
        Window::new(self, n, usize::MAX)
    }

    /// Returns a view of at most the first `n` elements.
    fn take(self, n: usize) -> Window<Self>
    where
        Self: Sized,
    {
        Window::new(self, 0, n)
    }

    /// Returns a view of at most `length` elements, starting from `offset`.
    ///
    /// See [`Window`] for the clamping rules.
    fn window(self, offset: usize, length: usize) -> Window<Self>
    where
        Self: Sized,
    {
        Window::new(self, offset, length)
    }

    /// Returns a view memoizing the elements of this source.
    fn cached(self) -> Cached<Self>
    where
        Self: Sized,
        Self::Item: Clone,
    {
        Cached::new(self)
    }

    /// Borrows the source, so that views can be built without consuming it.
    fn by_ref(&self) -> &Self {
        self
    }

    /// Returns an iterator over the elements of the source.
    ///
    /// Each call starts a new traversal, accessing every element afresh.
    fn values(&self) -> Iter<'_, Self> {
        Iter::new(self)
    }

    /// Collects all elements of the source into a vector.
    ///
    /// Stops at the first error.
    fn collect_values(&self) -> Result<Vec<Self::Item>, Self::Error> {
        self.values().collect()
    }
}

impl<S> SourceExt for S where S: Source + ?Sized {}
