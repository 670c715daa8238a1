use std::iter::FusedIterator;

use crate::Source;

/// An iterator over the elements of a source.
///
/// The iterator walks an explicit cursor over the indices of the source, accessing each element
/// as it goes. The number of elements is read from the source once, when the iterator is created.
///
/// See [`SourceExt::values`](crate::SourceExt::values).
#[derive(Debug)]
pub struct Iter<'a, S>
where
    S: ?Sized,
{
    source: &'a S,
    front: usize,
    back: usize,
}

impl<'a, S> Clone for Iter<'a, S>
where
    S: ?Sized,
{
    fn clone(&self) -> Self {
        Self {
            source: self.source,
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, S> Iter<'a, S>
where
    S: Source + ?Sized,
{
    pub(crate) fn new(source: &'a S) -> Self {
        Self {
            source,
            front: 0,
            back: source.count(),
        }
    }
}

impl<'a, S> Iterator for Iter<'a, S>
where
    S: Source + ?Sized,
{
    type Item = Result<S::Item, S::Error>;

    fn next(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.front += 1;
            self.source.at(self.front - 1)
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<'a, S> DoubleEndedIterator for Iter<'a, S>
where
    S: Source + ?Sized,
{
    fn next_back(&mut self) -> Option<Self::Item> {
        (self.front < self.back).then(|| {
            self.back -= 1;
            self.source.at(self.back)
        })
    }
}

impl<'a, S> ExactSizeIterator for Iter<'a, S> where S: Source + ?Sized {}

impl<'a, S> FusedIterator for Iter<'a, S> where S: Source + ?Sized {}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::SourceExt;

    #[test]
    fn test_iter_len() {
        let source = vec![1, 2, 3, 4];
        let mut iter = source.values();

        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(Ok(1)));
        assert_eq!(iter.next_back(), Some(Ok(4)));
        assert_eq!(iter.len(), 2);
        assert_eq!(iter.next(), Some(Ok(2)));
        assert_eq!(iter.next_back(), Some(Ok(3)));
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn test_iter_fused() {
        let source = vec![0.0];
        let mut iter = source.values();

        assert_eq!(iter.next(), Some(Ok(0.0)));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn test_iter_rev() {
        let view = vec![1, 2, 3].map(|x| x * 10).skip(1);

        assert_eq!(
            view.values().rev().collect::<Result<Vec<_>, _>>(),
            Ok(vec![30, 20])
        );
    }

    #[test]
    fn test_iter_is_lazy_and_restartable() {
        let calls = Cell::new(0);
        let view = vec![1, 2, 3].map(|x| {
            calls.set(calls.get() + 1);
            x
        });

        let mut iter = view.values();
        assert_eq!(calls.get(), 0);

        assert_eq!(iter.next(), Some(Ok(1)));
        assert_eq!(calls.get(), 1);

        let restarted = view.values().collect::<Result<Vec<_>, _>>();
        assert_eq!(restarted, Ok(vec![1, 2, 3]));
        assert_eq!(calls.get(), 4);

        let resumed = iter.clone().collect::<Result<Vec<_>, _>>();
        assert_eq!(resumed, Ok(vec![2, 3]));
        assert_eq!(calls.get(), 6);
    }
}
