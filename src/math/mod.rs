//! The array core.
//!
//! `Array` is a float array of any rank backed by one row-major buffer.
//! `Nested` is the list-of-lists form arrays are built from and printed as.
//! Construction, reshaping, elementwise arithmetic and reductions all return
//! new arrays.
pub mod array;
pub mod nested;
pub mod ops;
pub mod shape;

pub use array::{arange, array, ones, reshape, reshape_nested, zeros, Array};
pub use nested::{flatten, infer_shape, unflatten, Nested};
pub use ops::{add, allclose, allclose_default, max, mean, multiply, sum, Reduced, Reduction};
pub use shape::Shape;
