use std::fmt;
use std::ops::Index;
use std::slice::Iter;

use num_traits::{Float, NumCast, ToPrimitive};

use crate::error::ArrayError;
use crate::math::nested::{self, Nested};
use crate::math::shape::Shape;

/// An n-dimensional array of floats stored as one row-major buffer.
///
/// Arrays are values: every operation returns a new array and leaves its
/// inputs untouched.
#[derive(Clone, Debug, PartialEq)]
pub struct Array<T = f32> {
    data: Vec<T>,
    shape: Shape,
}

impl<T> Array<T> {
    pub fn from_shape_vec<S: Into<Shape>>(shape: S, data: Vec<T>) -> Result<Self, ArrayError> {
        let shape = shape.into();
        if data.len() != shape.size() {
            return Err(ArrayError::ShapeMismatch {
                lhs: vec![data.len()],
                rhs: shape.dims().to_vec(),
            });
        }
        Ok(Self { data, shape })
    }

    /// Caller guarantees `data.len() == shape.size()`.
    pub(crate) fn from_raw(shape: Shape, data: Vec<T>) -> Self {
        debug_assert_eq!(data.len(), shape.size());
        Self { data, shape }
    }

    /// A rank-0 array holding `value`.
    pub fn scalar(value: T) -> Self {
        Self {
            data: vec![value],
            shape: Shape::scalar(),
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn dims(&self) -> &[usize] {
        self.shape.dims()
    }

    pub fn ndim(&self) -> usize {
        self.shape.ndim()
    }

    /// Total number of elements.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.data.clone()
    }

    /// The single value of a rank-0 array.
    pub fn item(&self) -> Option<&T> {
        if self.shape.ndim() == 0 {
            self.data.first()
        } else {
            None
        }
    }

    pub fn mapv<U, F>(&self, mut f: F) -> Array<U>
    where
        F: FnMut(&T) -> U,
    {
        Array {
            data: self.data.iter().map(|v| f(v)).collect(),
            shape: self.shape.clone(),
        }
    }

    /// Same elements in a new shape; at most one extent may be `-1`.
    pub fn reshape(&self, shape: &[isize]) -> Result<Array<T>, ArrayError>
    where
        T: Clone,
    {
        let resolved = Shape::resolve(self.data.len(), shape)?;
        log::debug!("reshape {} -> {} (requested {:?})", self.shape, resolved, shape);
        Ok(Array {
            data: self.data.clone(),
            shape: resolved,
        })
    }

    /// Sub-array at index `i` of the leading axis.
    pub fn get(&self, i: usize) -> Result<Array<T>, ArrayError>
    where
        T: Clone,
    {
        let Some(&len) = self.shape.dims().first() else {
            return Err(ArrayError::AxisOutOfBounds { axis: 0, ndim: 0 });
        };
        if i >= len {
            return Err(ArrayError::IndexOutOfBounds { index: i, len });
        }
        let tail = self.shape.tail();
        let sub_len = tail.size();
        Ok(Array {
            data: self.data[i * sub_len..(i + 1) * sub_len].to_vec(),
            shape: tail,
        })
    }

    /// Rows of the leading axis, in order.
    pub fn outer_iter(&self) -> impl Iterator<Item = Array<T>> + '_
    where
        T: Clone,
    {
        let len = self.shape.dims().first().copied().unwrap_or(0);
        (0..len).filter_map(move |i| self.get(i).ok())
    }

    pub fn to_nested(&self) -> Nested<T>
    where
        T: Clone,
    {
        nested::build(&self.data, self.shape.dims())
    }
}

impl<T> Array<T>
where
    T: Float,
{
    pub fn full<S: Into<Shape>>(shape: S, value: T) -> Self {
        let shape = shape.into();
        Self {
            data: vec![value; shape.size()],
            shape,
        }
    }

    pub fn zeros<S: Into<Shape>>(shape: S) -> Self {
        Self::full(shape, T::zero())
    }

    pub fn ones<S: Into<Shape>>(shape: S) -> Self {
        Self::full(shape, T::one())
    }

    /// `[0, 1, ..., stop - 1]` with shape `(stop,)`.
    pub fn arange(stop: usize) -> Self {
        let mut data = Vec::with_capacity(stop);
        let mut value = T::zero();
        for _ in 0..stop {
            data.push(value);
            value = value + T::one();
        }
        Self {
            data,
            shape: Shape::new(vec![stop]),
        }
    }

    /// Build an array from a nested value, casting every leaf to `T`.
    ///
    /// The shape is inferred from the first element of each level, then the
    /// whole value is checked to be rectangular.
    pub fn from_nested<S>(obj: Nested<S>) -> Result<Self, ArrayError>
    where
        S: ToPrimitive + Clone,
    {
        let shape = nested::infer_shape(&obj);
        if !nested::is_rectangular(&obj, shape.dims()) {
            return Err(ArrayError::Ragged);
        }
        let data = nested::flatten(&obj)
            .into_iter()
            .map(cast_value)
            .collect::<Result<Vec<T>, _>>()?;
        Array::from_shape_vec(shape, data)
    }

    /// Convert to another float type. Finite values outside the range of `U`
    /// fail with `ArrayError::Cast`.
    pub fn cast<U: Float>(&self) -> Result<Array<U>, ArrayError> {
        let data = self
            .data
            .iter()
            .map(|&x| cast_value(x))
            .collect::<Result<Vec<U>, _>>()?;
        Ok(Array {
            data,
            shape: self.shape.clone(),
        })
    }
}

/// Convert one element, rejecting finite values that overflow to infinity
/// in the narrower type.
fn cast_value<S: ToPrimitive, U: Float>(x: S) -> Result<U, ArrayError> {
    let finite = x.to_f64().map_or(false, f64::is_finite);
    let value = <U as NumCast>::from(x).ok_or(ArrayError::Cast)?;
    if finite && !value.is_finite() {
        return Err(ArrayError::Cast);
    }
    Ok(value)
}

impl<T> TryFrom<Nested<T>> for Array<T>
where
    T: Float,
{
    type Error = ArrayError;

    fn try_from(value: Nested<T>) -> Result<Self, Self::Error> {
        Array::from_nested(value)
    }
}

impl<T> From<Vec<T>> for Array<T> {
    fn from(value: Vec<T>) -> Self {
        let shape = Shape::new(vec![value.len()]);
        Array { data: value, shape }
    }
}

impl<T> Index<&[usize]> for Array<T> {
    type Output = T;

    fn index(&self, index: &[usize]) -> &Self::Output {
        match self.shape.offset(index) {
            Some(offset) => &self.data[offset],
            None => panic!(
                "index {:?} is out of bounds for array of shape {}",
                index, self.shape
            ),
        }
    }
}

impl<T, const N: usize> Index<[usize; N]> for Array<T> {
    type Output = T;

    fn index(&self, index: [usize; N]) -> &Self::Output {
        &self[&index[..]]
    }
}

impl<T: fmt::Display + Clone> fmt::Display for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_nested())
    }
}

pub fn zeros<T: Float, S: Into<Shape>>(shape: S) -> Array<T> {
    Array::zeros(shape)
}

pub fn ones<T: Float, S: Into<Shape>>(shape: S) -> Array<T> {
    Array::ones(shape)
}

pub fn arange<T: Float>(stop: usize) -> Array<T> {
    Array::arange(stop)
}

/// Build an array from anything convertible to a nested value, e.g. `Vec<Vec<f32>>`.
pub fn array<T, S, N>(obj: N) -> Result<Array<T>, ArrayError>
where
    T: Float,
    S: ToPrimitive + Clone,
    N: Into<Nested<S>>,
{
    Array::from_nested(obj.into())
}

pub fn reshape<T: Clone>(arr: &Array<T>, shape: &[isize]) -> Result<Array<T>, ArrayError> {
    arr.reshape(shape)
}

/// Flatten a nested value and redistribute it into `shape`.
pub fn reshape_nested<T: Clone>(obj: &Nested<T>, shape: &[isize]) -> Result<Array<T>, ArrayError> {
    let flat = nested::flatten(obj);
    let resolved = Shape::resolve(flat.len(), shape)?;
    Array::from_shape_vec(resolved, flat)
}
