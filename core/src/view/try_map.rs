use std::fmt;

use crate::{OutOfRange, Source};

/// A view applying a fallible function to each element of its upstream when accessed.
///
/// Upstream errors are converted into the error type of the function, while errors returned by
/// the function itself reach the caller of [`Source::at`] unchanged.
///
/// See [`SourceExt::try_map`](crate::SourceExt::try_map).
#[derive(Clone)]
pub struct TryMap<S, F> {
    source: S,
    f: F,
}

impl<S, F> TryMap<S, F> {
    /// Returns a reference to the upstream source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the upstream source, discarding the function.
    pub fn into_inner(self) -> S {
        self.source
    }

    pub(crate) fn new(source: S, f: F) -> Self {
        Self { source, f }
    }
}

impl<S, F> fmt::Debug for TryMap<S, F>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TryMap")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<S, F, U, E> Source for TryMap<S, F>
where
    S: Source,
    F: Fn(S::Item) -> Result<U, E>,
    E: From<S::Error> + From<OutOfRange>,
{
    type Item = U;
    type Error = E;

    fn count(&self) -> usize {
        self.source.count()
    }

    fn at(&self, index: usize) -> Result<Self::Item, Self::Error> {
        let item = self.source.at(index)?;
        (self.f)(item)
    }
}
