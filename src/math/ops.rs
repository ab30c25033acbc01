//! Elementwise arithmetic, reductions and approximate comparison for `Array`.
//!
//! Operands must agree in shape. The only broadcasts are a rank-0 operand
//! against anything, and (for `multiply`) an operand whose shape equals the
//! other's shape minus its leading axis.
use num_traits::Float;

use crate::config::DEFAULT_TOLERANCE;
use crate::error::ArrayError;
use crate::math::array::Array;
use crate::math::shape::Shape;

/// Which fold a reduction applies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reduction {
    Sum,
    Mean,
    Max,
}

/// Result of a reduction: a scalar when folding everything, an array when
/// folding one axis.
#[derive(Clone, Debug, PartialEq)]
pub enum Reduced<T> {
    Scalar(T),
    Array(Array<T>),
}

impl<T: Clone> Reduced<T> {
    pub fn into_array(self) -> Array<T> {
        match self {
            Reduced::Scalar(value) => Array::scalar(value),
            Reduced::Array(array) => array,
        }
    }

    pub fn scalar(&self) -> Option<T> {
        match self {
            Reduced::Scalar(value) => Some(value.clone()),
            Reduced::Array(_) => None,
        }
    }
}

#[derive(Debug)]
enum Broadcast {
    Same,
    ScalarLhs,
    ScalarRhs,
    LeadingLhs,
    LeadingRhs,
}

fn broadcast_kind(lhs: &Shape, rhs: &Shape, leading: bool) -> Result<Broadcast, ArrayError> {
    let kind = if lhs == rhs {
        Broadcast::Same
    } else if lhs.ndim() == 0 {
        Broadcast::ScalarLhs
    } else if rhs.ndim() == 0 {
        Broadcast::ScalarRhs
    } else if leading && lhs.ndim() == rhs.ndim() + 1 && lhs.tail() == *rhs {
        Broadcast::LeadingLhs
    } else if leading && rhs.ndim() == lhs.ndim() + 1 && rhs.tail() == *lhs {
        Broadcast::LeadingRhs
    } else {
        return Err(ArrayError::ShapeMismatch {
            lhs: lhs.dims().to_vec(),
            rhs: rhs.dims().to_vec(),
        });
    };
    Ok(kind)
}

impl<T> Array<T>
where
    T: Float,
{
    fn zip_with<F>(&self, other: &Array<T>, leading: bool, op: F) -> Result<Array<T>, ArrayError>
    where
        F: Fn(T, T) -> T,
    {
        let lhs = self.as_slice();
        let rhs = other.as_slice();
        let kind = broadcast_kind(self.shape(), other.shape(), leading)?;
        log::debug!(
            "elementwise {} with {}: {:?}",
            self.shape(),
            other.shape(),
            kind
        );
        let (shape, data): (&Shape, Vec<T>) = match kind {
            Broadcast::Same => (
                self.shape(),
                lhs.iter().zip(rhs).map(|(&a, &b)| op(a, b)).collect(),
            ),
            Broadcast::ScalarLhs => (other.shape(), rhs.iter().map(|&b| op(lhs[0], b)).collect()),
            Broadcast::ScalarRhs => (self.shape(), lhs.iter().map(|&a| op(a, rhs[0])).collect()),
            // The smaller operand repeats once per index of the leading axis.
            Broadcast::LeadingLhs => (
                self.shape(),
                lhs.iter()
                    .zip(rhs.iter().cycle())
                    .map(|(&a, &b)| op(a, b))
                    .collect(),
            ),
            Broadcast::LeadingRhs => (
                other.shape(),
                lhs.iter()
                    .cycle()
                    .zip(rhs)
                    .map(|(&a, &b)| op(a, b))
                    .collect(),
            ),
        };
        Array::from_shape_vec(shape.clone(), data)
    }

    /// Elementwise sum. A rank-0 operand is added to every element.
    pub fn add(&self, other: &Array<T>) -> Result<Array<T>, ArrayError> {
        self.zip_with(other, false, |a, b| a + b)
    }

    /// Elementwise product.
    ///
    /// Besides equal shapes and rank-0 operands, an operand shaped like the
    /// other minus its leading axis is repeated along that axis, so
    /// `(n, c, h, w) * (c, h, w)` scales every sample by the same weights.
    pub fn multiply(&self, other: &Array<T>) -> Result<Array<T>, ArrayError> {
        self.zip_with(other, true, |a, b| a * b)
    }

    pub fn scale(&self, factor: T) -> Array<T> {
        self.mapv(|&x| x * factor)
    }

    pub fn sum(&self) -> T {
        self.iter().fold(T::zero(), |acc, &x| acc + x)
    }

    pub fn mean(&self) -> Result<T, ArrayError> {
        if self.is_empty() {
            return Err(ArrayError::Empty("mean"));
        }
        let count = T::from(self.len()).ok_or(ArrayError::Cast)?;
        Ok(self.sum() / count)
    }

    /// Largest element. Comparison is strict, so the first maximum wins.
    pub fn max(&self) -> Result<T, ArrayError> {
        let (&first, rest) = self
            .as_slice()
            .split_first()
            .ok_or(ArrayError::Empty("max"))?;
        Ok(rest.iter().fold(first, |acc, &x| if x > acc { x } else { acc }))
    }

    /// Fold `axis` away with `op`, combining slices pairwise in index order.
    ///
    /// `empty` is the value produced when the axis has extent zero; `None`
    /// makes that an error unless the result has no elements anyway.
    fn fold_axis<F>(
        &self,
        axis: usize,
        name: &'static str,
        empty: Option<T>,
        op: F,
    ) -> Result<Array<T>, ArrayError>
    where
        F: Fn(T, T) -> T,
    {
        let out_shape = self.shape().remove_axis(axis)?;
        let dims = self.dims();
        let extent = dims[axis];
        let outer: usize = dims[..axis].iter().product();
        let inner: usize = dims[axis + 1..].iter().product();

        if extent == 0 {
            return match empty {
                Some(value) => Ok(Array::full(out_shape, value)),
                None if out_shape.size() == 0 => Ok(Array::full(out_shape, T::zero())),
                None => Err(ArrayError::Empty(name)),
            };
        }

        let data = self.as_slice();
        let mut out = Vec::with_capacity(outer * inner);
        for o in 0..outer {
            let block = &data[o * extent * inner..(o + 1) * extent * inner];
            for j in 0..inner {
                let mut acc = block[j];
                for k in 1..extent {
                    acc = op(acc, block[k * inner + j]);
                }
                out.push(acc);
            }
        }
        Array::from_shape_vec(out_shape, out)
    }

    pub fn sum_axis(&self, axis: usize) -> Result<Array<T>, ArrayError> {
        self.fold_axis(axis, "sum", Some(T::zero()), |a, b| a + b)
    }

    pub fn mean_axis(&self, axis: usize) -> Result<Array<T>, ArrayError> {
        let summed = self.sum_axis(axis)?;
        let extent = self.dims()[axis];
        if summed.is_empty() {
            return Ok(summed);
        }
        if extent == 0 {
            return Err(ArrayError::Empty("mean"));
        }
        let count = T::from(extent).ok_or(ArrayError::Cast)?;
        Ok(summed.scale(T::one() / count))
    }

    pub fn max_axis(&self, axis: usize) -> Result<Array<T>, ArrayError> {
        self.fold_axis(axis, "max", None, |a, b| if b > a { b } else { a })
    }

    /// Reduce everything (`axis = None`) or a single axis.
    pub fn reduce(&self, kind: Reduction, axis: Option<usize>) -> Result<Reduced<T>, ArrayError> {
        match (kind, axis) {
            (Reduction::Sum, None) => Ok(Reduced::Scalar(self.sum())),
            (Reduction::Mean, None) => self.mean().map(Reduced::Scalar),
            (Reduction::Max, None) => self.max().map(Reduced::Scalar),
            (Reduction::Sum, Some(axis)) => self.sum_axis(axis).map(Reduced::Array),
            (Reduction::Mean, Some(axis)) => self.mean_axis(axis).map(Reduced::Array),
            (Reduction::Max, Some(axis)) => self.max_axis(axis).map(Reduced::Array),
        }
    }

    /// True when shapes match and every pair of elements differs by at most `tol`.
    pub fn allclose(&self, other: &Array<T>, tol: T) -> bool {
        self.shape() == other.shape()
            && self
                .iter()
                .zip(other.iter())
                .all(|(&x, &y)| (x - y).abs() <= tol)
    }
}

pub fn add<T: Float>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, ArrayError> {
    a.add(b)
}

pub fn multiply<T: Float>(a: &Array<T>, b: &Array<T>) -> Result<Array<T>, ArrayError> {
    a.multiply(b)
}

pub fn sum<T: Float>(arr: &Array<T>, axis: Option<usize>) -> Result<Reduced<T>, ArrayError> {
    arr.reduce(Reduction::Sum, axis)
}

pub fn mean<T: Float>(arr: &Array<T>, axis: Option<usize>) -> Result<Reduced<T>, ArrayError> {
    arr.reduce(Reduction::Mean, axis)
}

pub fn max<T: Float>(arr: &Array<T>, axis: Option<usize>) -> Result<Reduced<T>, ArrayError> {
    arr.reduce(Reduction::Max, axis)
}

pub fn allclose<T: Float>(a: &Array<T>, b: &Array<T>, tol: T) -> bool {
    a.allclose(b, tol)
}

/// `allclose` with the crate-wide default tolerance.
pub fn allclose_default<T: Float>(a: &Array<T>, b: &Array<T>) -> bool {
    let tol = T::from(DEFAULT_TOLERANCE).unwrap_or_else(T::epsilon);
    a.allclose(b, tol)
}
