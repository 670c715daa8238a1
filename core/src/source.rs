//! Indexable sources.
//!
//! A [`Source`] is anything with a known number of elements that can be indexed in constant time.
//! Views are themselves sources, and so may be stacked arbitrarily.

use std::{collections::VecDeque, fmt, rc::Rc, sync::Arc};

use crate::OutOfRange;

/// An ordered, fixed-length, randomly indexable sequence of elements.
///
/// Both [`Source::count`] and [`Source::at`] should run in constant time, and return the same
/// results between calls unless the underlying data is mutated externally.
///
/// The trait is object safe, so a `Box<dyn Source<Item = T, Error = E>>` is itself a source. See
/// [`SourceExt`](crate::SourceExt) for the combinators that build views on top of a source.
pub trait Source {
    /// The type of element produced by the source.
    type Item;

    /// The error returned when an element cannot be produced.
    type Error: From<OutOfRange>;

    /// Returns the number of elements in the source.
    fn count(&self) -> usize;

    /// Returns the element at `index`.
    ///
    /// Fails with [`OutOfRange`] when `index >= self.count()`.
    fn at(&self, index: usize) -> Result<Self::Item, Self::Error>;

    /// Returns the element at a signed `index`.
    ///
    /// Negative indices fail with [`OutOfRange`] rather than wrapping.
    fn at_signed(&self, index: isize) -> Result<Self::Item, Self::Error> {
        match usize::try_from(index) {
            Ok(index) => self.at(index),
            Err(_) => Err(OutOfRange::new_signed(index, self.count()).into()),
        }
    }

    /// Returns `true` if the source contains no elements.
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Returns `Ok(index)` if `index` is in bounds for `count` elements.
pub(crate) fn check_index(index: usize, count: usize) -> Result<usize, OutOfRange> {
    if index < count {
        Ok(index)
    } else {
        Err(OutOfRange::new(index, count))
    }
}

impl<T> Source for [T]
where
    T: Clone,
{
    type Item = T;
    type Error = OutOfRange;

    fn count(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Result<Self::Item, Self::Error> {
        self.get(index)
            .cloned()
            .ok_or_else(|| OutOfRange::new(index, self.len()))
    }
}

impl<T> Source for Vec<T>
where
    T: Clone,
{
    type Item = T;
    type Error = OutOfRange;

    fn count(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Result<Self::Item, Self::Error> {
        self.as_slice().at(index)
    }
}

impl<T, const N: usize> Source for [T; N]
where
    T: Clone,
{
    type Item = T;
    type Error = OutOfRange;

    fn count(&self) -> usize {
        N
    }

    fn at(&self, index: usize) -> Result<Self::Item, Self::Error> {
        self.as_slice().at(index)
    }
}

impl<T> Source for VecDeque<T>
where
    T: Clone,
{
    type Item = T;
    type Error = OutOfRange;

    fn count(&self) -> usize {
        self.len()
    }

    fn at(&self, index: usize) -> Result<Self::Item, Self::Error> {
        self.get(index)
            .cloned()
            .ok_or_else(|| OutOfRange::new(index, self.len()))
    }
}

macro_rules! impl_source_for_pointer {
    ($($pointer:ty),+ $(,)?) => {
        $(
            impl<S> Source for $pointer
            where
                S: Source + ?Sized,
            {
                type Item = S::Item;
                type Error = S::Error;

                fn count(&self) -> usize {
                    (**self).count()
                }

                fn at(&self, index: usize) -> Result<Self::Item, Self::Error> {
                    (**self).at(index)
                }
            }
        )+
    };
}

impl_source_for_pointer!(&S, Box<S>, Rc<S>, Arc<S>);

/// A source generating each element from its index.
///
/// See [`from_fn`].
#[derive(Clone)]
pub struct FromFn<F> {
    count: usize,
    f: F,
}

impl<F> fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FromFn")
            .field("count", &self.count)
            .finish_non_exhaustive()
    }
}

impl<T, F> Source for FromFn<F>
where
    F: Fn(usize) -> T,
{
    type Item = T;
    type Error = OutOfRange;

    fn count(&self) -> usize {
        self.count
    }

    fn at(&self, index: usize) -> Result<Self::Item, Self::Error> {
        check_index(index, self.count).map(&self.f)
    }
}

/// Creates a source of `count` elements, where the element at index `i` is `f(i)`.
///
/// The function is invoked once per successful call to [`Source::at`], and never otherwise.
///
/// # Examples
///
/// ```
/// use lazyview_core::{from_fn, Source};
///
/// let squares = from_fn(4, |i| i * i);
///
/// assert_eq!(squares.count(), 4);
/// assert_eq!(squares.at(3), Ok(9));
/// assert!(squares.at(4).is_err());
/// ```
pub fn from_fn<T, F>(count: usize, f: F) -> FromFn<F>
where
    F: Fn(usize) -> T,
{
    FromFn { count, f }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    fn assert_bounds<S>(source: &S)
    where
        S: Source + ?Sized,
        S::Error: fmt::Debug + PartialEq,
    {
        let count = source.count();

        assert_eq!(
            source.at_signed(-1).err(),
            Some(S::Error::from(OutOfRange::new_signed(-1, count)))
        );
        assert_eq!(
            source.at(count).err(),
            Some(S::Error::from(OutOfRange::new(count, count)))
        );
    }

    #[test]
    fn test_slice() {
        let data = [1, 2, 3];
        let slice: &[i32] = &data;

        assert_eq!(Source::count(slice), 3);
        assert_eq!(slice.at(0), Ok(1));
        assert_eq!(slice.at(2), Ok(3));
        assert_bounds(slice);
    }

    #[test]
    fn test_vec() {
        let vec = vec![String::from("a"), String::from("b")];

        assert_eq!(Source::count(&vec), 2);
        assert_eq!(vec.at(1), Ok(String::from("b")));
        assert_bounds(&vec);
    }

    #[test]
    fn test_array() {
        let array = [4.0, 5.0];

        assert_eq!(Source::count(&array), 2);
        assert_eq!(array.at_signed(1), Ok(5.0));
        assert_bounds(&array);
    }

    #[test]
    fn test_vec_deque() {
        let mut deque = VecDeque::from([2, 3]);
        deque.push_front(1);

        assert_eq!(Source::count(&deque), 3);
        assert_eq!(deque.at(0), Ok(1));
        assert_bounds(&deque);
    }

    #[test]
    fn test_empty() {
        let vec: Vec<u8> = Vec::new();

        assert!(Source::is_empty(&vec));
        assert_eq!(vec.at(0), Err(OutOfRange::new(0, 0)));
        assert_bounds(&vec);
    }

    #[test]
    fn test_pointers() {
        let vec = vec![1, 2, 3];

        assert_eq!((&vec).at(1), Ok(2));
        assert_eq!(Box::new(vec.clone()).at(1), Ok(2));
        assert_eq!(Rc::new(vec.clone()).at(1), Ok(2));
        assert_eq!(Arc::new(vec.clone()).at(1), Ok(2));

        assert_bounds(&Rc::new(vec.clone()));
        assert_bounds(&Arc::new(vec));
    }

    #[test]
    fn test_dyn_source() {
        let source: Box<dyn Source<Item = i32, Error = OutOfRange>> = Box::new(vec![7, 8]);

        assert_eq!(source.count(), 2);
        assert_eq!(source.at(1), Ok(8));
        assert_bounds(&source);
    }

    #[test]
    fn test_from_fn_lazy() {
        let calls = Cell::new(0);
        let source = from_fn(1_000_000, |i| {
            calls.set(calls.get() + 1);
            i * 2
        });
        assert_eq!(calls.get(), 0);

        assert_eq!(source.at(21), Ok(42));
        assert_eq!(calls.get(), 1);

        assert!(source.at(1_000_000).is_err());
        assert_eq!(calls.get(), 1);

        assert_bounds(&source);
    }
}
