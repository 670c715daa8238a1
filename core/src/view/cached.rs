use std::{
    collections::HashMap,
    fmt,
    sync::{PoisonError, RwLock},
};

use crate::{source::check_index, Source};

/// A view memoizing the elements of its upstream.
///
/// Other views never cache, so a transform in a [`Map`](crate::view::Map) runs again on every
/// access. Wrapping a view in `Cached` is the explicit way to evaluate each element at most once.
///
/// The cache only holds elements that have actually been accessed, so construction does no work
/// and memory grows with the number of distinct indices read. A cached element is returned as-is
/// on later accesses, even if the upstream has since changed, but indices are always checked
/// against the current count of the upstream. Failed accesses are not cached.
///
/// When accessed from several threads at once, the same element may be evaluated more than once
/// before the first result is stored, but all callers receive the stored result afterwards.
///
/// See [`SourceExt::cached`](crate::SourceExt::cached).
pub struct Cached<S>
where
    S: Source,
{
    source: S,
    cache: RwLock<HashMap<usize, S::Item>>,
}

impl<S> Cached<S>
where
    S: Source,
{
    pub(crate) fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of elements currently held in the cache.
    pub fn cached_len(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Returns a reference to the upstream source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Returns the upstream source, discarding the cache.
    pub fn into_inner(self) -> S {
        self.source
    }
}

impl<S> fmt::Debug for Cached<S>
where
    S: Source + fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cached")
            .field("source", &self.source)
            .field("cached", &self.cached_len())
            .finish()
    }
}

impl<S> Source for Cached<S>
where
    S: Source,
    S::Item: Clone,
{
    type Item = S::Item;
    type Error = S::Error;

    fn count(&self) -> usize {
        self.source.count()
    }

    fn at(&self, index: usize) -> Result<Self::Item, Self::Error> {
        let index = check_index(index, self.source.count())?;

        let cached = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&index)
            .cloned();
        if let Some(item) = cached {
            return Ok(item);
        }

        // Evaluated outside the lock, since a transform may panic or be slow
        let item = self.source.at(index)?;

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(cache.entry(index).or_insert(item).clone())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::{Cell, RefCell},
        rc::Rc,
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
    };

    use crate::{from_fn, OutOfRange, SourceExt};

    use super::*;

    #[test]
    fn test_cached_evaluates_once() {
        let calls = Cell::new(0);
        let view = vec![1, 2, 3]
            .map(|x| {
                calls.set(calls.get() + 1);
                x * 100
            })
            .cached();
        assert_eq!(calls.get(), 0);
        assert_eq!(view.cached_len(), 0);

        assert_eq!(view.at(1), Ok(200));
        assert_eq!(view.at(1), Ok(200));
        assert_eq!(calls.get(), 1);
        assert_eq!(view.cached_len(), 1);

        assert_eq!(view.collect_values(), Ok(vec![100, 200, 300]));
        assert_eq!(view.collect_values(), Ok(vec![100, 200, 300]));
        assert_eq!(calls.get(), 3);
        assert_eq!(view.cached_len(), 3);
    }

    #[test]
    fn test_cached_does_not_cache_errors() {
        let attempts = Cell::new(0);
        let view = vec![1, 2]
            .try_map(|x| {
                attempts.set(attempts.get() + 1);
                if attempts.get() == 1 {
                    Err(OutOfRange::new(0, 0))
                } else {
                    Ok(x)
                }
            })
            .cached();

        assert!(view.at(0).is_err());
        assert_eq!(view.at(0), Ok(1));
        assert_eq!(view.at(0), Ok(1));
        assert_eq!(attempts.get(), 2);

        assert_eq!(view.at(2), Err(OutOfRange::new(2, 2)));
    }

    struct Shared(Rc<RefCell<Vec<i32>>>);

    impl Source for Shared {
        type Item = i32;
        type Error = OutOfRange;

        fn count(&self) -> usize {
            self.0.borrow().len()
        }

        fn at(&self, index: usize) -> Result<i32, OutOfRange> {
            self.0.borrow().at(index)
        }
    }

    #[test]
    fn test_cached_upstream_grows() {
        let data = Rc::new(RefCell::new(vec![1, 2]));
        let view = Shared(Rc::clone(&data)).cached();
        assert_eq!(view.at(0), Ok(1));

        data.borrow_mut()[0] = 10;
        data.borrow_mut().push(3);

        assert_eq!(view.count(), 3);
        assert_eq!(view.at(0), Ok(1));
        assert_eq!(view.at(2), Ok(3));
        assert_eq!(view.cached_len(), 2);
    }

    #[test]
    fn test_cached_upstream_shrinks() {
        let data = Rc::new(RefCell::new(vec![1, 2, 3]));
        let view = Shared(Rc::clone(&data)).cached();
        assert_eq!(view.at(2), Ok(3));

        data.borrow_mut().truncate(1);

        assert_eq!(view.count(), 1);
        assert_eq!(view.at(2), Err(OutOfRange::new(2, 1)));
        assert_eq!(view.at(1), Err(OutOfRange::new(1, 1)));
        assert_eq!(view.at(0), Ok(1));
    }

    #[test]
    fn test_cached_large_source() {
        let calls = Cell::new(0);
        let view = from_fn(usize::MAX, |i| {
            calls.set(calls.get() + 1);
            i
        })
        .cached();

        assert_eq!(view.at(0), Ok(0));
        assert_eq!(view.at(usize::MAX - 1), Ok(usize::MAX - 1));
        assert_eq!(view.at(0), Ok(0));
        assert_eq!(calls.get(), 2);
        assert_eq!(view.cached_len(), 2);
        assert_eq!(
            view.at(usize::MAX),
            Err(OutOfRange::new(usize::MAX, usize::MAX))
        );
    }

    #[test]
    fn test_cached_across_threads() {
        let calls = AtomicUsize::new(0);
        let view = Arc::new((0..64).collect::<Vec<usize>>())
            .map(|x| {
                calls.fetch_add(1, Ordering::Relaxed);
                x + 1
            })
            .cached();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for i in 0..view.count() {
                        assert_eq!(view.at(i), Ok(i + 1));
                    }
                });
            }
        });

        assert_eq!(view.cached_len(), 64);

        let before = calls.load(Ordering::Relaxed);
        assert_eq!(view.collect_values().map(|v| v.len()), Ok(64));
        assert_eq!(calls.load(Ordering::Relaxed), before);
    }
}
