//! Shape bookkeeping for `Array`: extents, row-major strides and the
//! resolution of reshape targets containing a free (`-1`) dimension.
use std::fmt;

use crate::error::ArrayError;

/// Logical extents of an array, outermost axis first.
///
/// An empty shape describes a rank-0 array holding a single scalar.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Shape {
    dims: Vec<usize>,
}

impl Shape {
    pub fn new<D: Into<Vec<usize>>>(dims: D) -> Self {
        Self { dims: dims.into() }
    }

    pub fn scalar() -> Self {
        Self { dims: Vec::new() }
    }

    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    pub fn ndim(&self) -> usize {
        self.dims.len()
    }

    /// Number of elements implied by the shape. The empty product is 1.
    pub fn size(&self) -> usize {
        self.dims.iter().product()
    }

    /// Row-major strides, in elements.
    pub fn strides(&self) -> Vec<usize> {
        let mut strides = vec![1; self.dims.len()];
        for k in (0..self.dims.len().saturating_sub(1)).rev() {
            strides[k] = strides[k + 1] * self.dims[k + 1];
        }
        strides
    }

    /// Flat offset of a full multi-index, or `None` if any component is out of range.
    pub fn offset(&self, index: &[usize]) -> Option<usize> {
        if index.len() != self.dims.len() {
            return None;
        }
        let mut offset = 0;
        for ((&i, &dim), stride) in index.iter().zip(self.dims.iter()).zip(self.strides()) {
            if i >= dim {
                return None;
            }
            offset += i * stride;
        }
        Some(offset)
    }

    /// The shape with its leading axis dropped.
    pub fn tail(&self) -> Shape {
        Shape::new(self.dims.get(1..).unwrap_or(&[]).to_vec())
    }

    pub fn remove_axis(&self, axis: usize) -> Result<Shape, ArrayError> {
        if axis >= self.ndim() {
            return Err(ArrayError::AxisOutOfBounds {
                axis,
                ndim: self.ndim(),
            });
        }
        let mut dims = self.dims.clone();
        dims.remove(axis);
        Ok(Shape::new(dims))
    }

    /// Resolve a reshape target for `len` elements.
    ///
    /// At most one extent may be `-1`; it is replaced by `len / product(others)`
    /// when that division is exact.
    pub fn resolve(len: usize, target: &[isize]) -> Result<Shape, ArrayError> {
        let size_error = || ArrayError::ReshapeSize {
            len,
            shape: target.to_vec(),
        };

        let mut free = None;
        let mut known: usize = 1;
        for (k, &dim) in target.iter().enumerate() {
            match dim {
                -1 if free.is_some() => {
                    return Err(ArrayError::MultipleFreeDims(target.to_vec()))
                }
                -1 => free = Some(k),
                d if d < 0 => return Err(ArrayError::InvalidDim(d)),
                d => known = known.checked_mul(d as usize).ok_or_else(size_error)?,
            }
        }

        let mut dims: Vec<usize> = target.iter().map(|&d| d.max(0) as usize).collect();
        match free {
            Some(k) => {
                if known == 0 || len % known != 0 {
                    return Err(size_error());
                }
                dims[k] = len / known;
            }
            None if known != len => return Err(size_error()),
            None => {}
        }
        Ok(Shape::new(dims))
    }
}

impl From<Vec<usize>> for Shape {
    fn from(value: Vec<usize>) -> Self {
        Shape::new(value)
    }
}

impl From<&[usize]> for Shape {
    fn from(value: &[usize]) -> Self {
        Shape::new(value.to_vec())
    }
}

impl<const N: usize> From<[usize; N]> for Shape {
    fn from(value: [usize; N]) -> Self {
        Shape::new(value.to_vec())
    }
}

impl PartialEq<[usize]> for Shape {
    fn eq(&self, other: &[usize]) -> bool {
        self.dims == other
    }
}

impl<const N: usize> PartialEq<[usize; N]> for Shape {
    fn eq(&self, other: &[usize; N]) -> bool {
        self.dims == other
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (idx, dim) in self.dims.iter().enumerate() {
            write!(f, "{}", dim)?;
            if self.dims.len() == 1 || idx + 1 != self.dims.len() {
                write!(f, ",")?;
            }
            if idx + 1 != self.dims.len() {
                write!(f, " ")?;
            }
        }
        write!(f, ")")
    }
}
