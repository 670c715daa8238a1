use std::fmt;

use crate::Source;

/// A view applying a function to each element of its upstream when accessed.
///
/// See [`SourceExt::map`](crate::SourceExt::map).
#[derive(Clone)]
pub struct Map<S, F> {
    source: S,
    f: F,
}

impl<S, F> Map<S, F> {
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

impl<S, F> fmt::Debug for Map<S, F>
where
    S: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Map")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl<S, F, U> Source for Map<S, F>
where
    S: Source,
    F: Fn(S::Item) -> U,
{
    type Item = U;
    type Error = S::Error;

    fn count(&self) -> usize {
        self.source.count()
    }

    fn at(&self, index: usize) -> Result<Self::Item, Self::Error> {
        self.source.at(index).map(&self.f)
    }
}
