use std::error::Error;
use std::fmt;

/// Errors raised by array construction, reshaping and arithmetic.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayError {
    /// Operand shapes (or a buffer and its declared shape) disagree.
    ShapeMismatch { lhs: Vec<usize>, rhs: Vec<usize> },
    /// The requested reshape target cannot hold exactly `len` elements.
    ReshapeSize { len: usize, shape: Vec<isize> },
    MultipleFreeDims(Vec<isize>),
    InvalidDim(isize),
    AxisOutOfBounds { axis: usize, ndim: usize },
    IndexOutOfBounds { index: usize, len: usize },
    /// Nested input whose sibling lists differ in length or depth.
    Ragged,
    /// A reduction that needs at least one element got none.
    Empty(&'static str),
    /// A value that cannot be represented in the target float type.
    Cast,
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ArrayError::ShapeMismatch { lhs, rhs } => {
                write!(f, "shape mismatch: {:?} vs {:?}", lhs, rhs)
            }
            ArrayError::ReshapeSize { len, shape } => write!(
                f,
                "cannot reshape array of size {} into shape {:?}",
                len, shape
            ),
            ArrayError::MultipleFreeDims(shape) => write!(
                f,
                "only one free dimension (-1) is allowed, got shape {:?}",
                shape
            ),
            ArrayError::InvalidDim(dim) => write!(f, "invalid dimension {} in shape", dim),
            ArrayError::AxisOutOfBounds { axis, ndim } => write!(
                f,
                "axis {} is out of bounds for array of dimension {}",
                axis, ndim
            ),
            ArrayError::IndexOutOfBounds { index, len } => write!(
                f,
                "index {} is out of bounds for axis of length {}",
                index, len
            ),
            ArrayError::Ragged => write!(f, "nested sequence is not rectangular"),
            ArrayError::Empty(op) => write!(f, "{} of an empty array is undefined", op),
            ArrayError::Cast => write!(f, "value cannot be cast to the array element type"),
        }
    }
}

impl Error for ArrayError {}
