#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Lazy, randomly indexable views over sequences.
//!
//! This serves as the core library implementation for the `lazyview` CLI, but can also be used as
//! a free-standing library.
//!
//! # Overview
//!
//! The core trait is a [`Source`]: anything with a known number of elements that can be indexed
//! in constant time, such as a [`Vec`] or a slice. Views, found in the [`view`] module, wrap a
//! source and compute their elements on demand when indexed, without copying or traversing the
//! underlying data. Since every view is itself a source, views can be stacked freely using the
//! combinators on [`SourceExt`].
//!
//! Indexing outside `[0, count)` fails with an [`OutOfRange`] error at every layer.
//!
//! # Example
//!
//! As a very brief introduction to the API, let's square some numbers, skip the first, and take
//! the next two.
//!
//! ```
//! use lazyview_core::{Source, SourceExt};
//!
//! let data = vec![1, 2, 3, 4, 5];
//!
//! // Nothing is computed yet
//! let view = data.by_ref().map(|x| x * x).skip(1).take(2);
//!
//! assert_eq!(view.count(), 2);
//! assert_eq!(view.at(0), Ok(4));
//! assert_eq!(view.at(1), Ok(9));
//! assert!(view.at(2).is_err());
//! ```

mod error;
pub use error::OutOfRange;

pub mod input;
pub use input::Input;

mod source;
pub use source::{from_fn, FromFn, Source};

pub mod text;

pub mod view;
pub use view::SourceExt;
