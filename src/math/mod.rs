//! Dense column-major matrices and the views used to operate on parts of them.
//!
//! `Mat` owns the buffer. Selections resolve to an [`Addressing`] law that
//! lists physical offsets, and every in-place operator, whether applied to the
//! whole buffer or through a view, goes through the dispatch in [`op`].
mod convert;
pub mod matrix;
pub mod op;
pub mod span;
pub mod view;

pub use matrix::{Mat, Selection};
pub use op::{Op, Operand};
pub use span::{Size, Span};
pub use view::{Addressing, IndexList, Offsets, Values, View, ViewBase, ViewMut};
