//! Nested-sequence input and the flatten/unflatten pair used to move between
//! nested values and the flat row-major buffer of an `Array`.
use std::fmt;

use crate::error::ArrayError;
use crate::math::shape::Shape;

/// An arbitrarily nested list of scalars.
#[derive(Clone, Debug, PartialEq)]
pub enum Nested<T> {
    Scalar(T),
    List(Vec<Nested<T>>),
}

/// Shape of a nested value, looking only at the first element of every level.
///
/// An empty list yields `(0,)` and a scalar yields `()`.
pub fn infer_shape<T>(obj: &Nested<T>) -> Shape {
    let mut dims = Vec::new();
    let mut current = obj;
    while let Nested::List(items) = current {
        dims.push(items.len());
        match items.first() {
            Some(first) => current = first,
            None => break,
        }
    }
    Shape::new(dims)
}

/// Every scalar of `obj` in row-major order.
pub fn flatten<T: Clone>(obj: &Nested<T>) -> Vec<T> {
    let mut out = Vec::new();
    flatten_into(obj, &mut out);
    out
}

fn flatten_into<T: Clone>(obj: &Nested<T>, out: &mut Vec<T>) {
    match obj {
        Nested::Scalar(value) => out.push(value.clone()),
        Nested::List(items) => {
            for item in items {
                flatten_into(item, out);
            }
        }
    }
}

/// Rebuild a nested value of `shape` from a flat row-major slice.
pub fn unflatten<T: Clone>(flat: &[T], shape: &Shape) -> Result<Nested<T>, ArrayError> {
    if flat.len() != shape.size() {
        return Err(ArrayError::ShapeMismatch {
            lhs: vec![flat.len()],
            rhs: shape.dims().to_vec(),
        });
    }
    Ok(build(flat, shape.dims()))
}

pub(crate) fn build<T: Clone>(flat: &[T], dims: &[usize]) -> Nested<T> {
    match dims.split_first() {
        None => Nested::Scalar(flat[0].clone()),
        Some((&size, sub_dims)) => {
            let sub_len: usize = sub_dims.iter().product();
            Nested::List(
                (0..size)
                    .map(|i| build(&flat[i * sub_len..(i + 1) * sub_len], sub_dims))
                    .collect(),
            )
        }
    }
}

/// Check that every list at depth `k` has exactly `dims[k]` items and that
/// scalars appear only at the innermost depth.
pub(crate) fn is_rectangular<T>(obj: &Nested<T>, dims: &[usize]) -> bool {
    match (obj, dims.split_first()) {
        (Nested::Scalar(_), None) => true,
        (Nested::List(items), Some((&len, rest))) => {
            items.len() == len && items.iter().all(|item| is_rectangular(item, rest))
        }
        _ => false,
    }
}

macro_rules! impl_scalar_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Nested<$t> {
                fn from(value: $t) -> Self {
                    Nested::Scalar(value)
                }
            }
        )*
    };
}

impl_scalar_from!(f32, f64, i32, i64, u8, usize);

impl<T, U> From<Vec<U>> for Nested<T>
where
    U: Into<Nested<T>>,
{
    fn from(value: Vec<U>) -> Self {
        Nested::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: fmt::Display> fmt::Display for Nested<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nested::Scalar(value) => write!(f, "{}", value),
            Nested::List(items) => {
                write!(f, "[")?;
                for (idx, item) in items.iter().enumerate() {
                    write!(f, "{}", item)?;
                    if idx + 1 != items.len() {
                        write!(f, ", ")?;
                    }
                }
                write!(f, "]")
            }
        }
    }
}
