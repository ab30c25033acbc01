//! fusion-array: a small n-dimensional array core for activation pooling.
//!
//! This crate provides a float `Array` of any rank with just enough
//! construction, reshaping, broadcasting and reduction to pool and fuse
//! feature maps taken from pretrained networks. Storage is a single
//! row-major buffer; every operation checks shapes up front and reports
//! mismatches as `ArrayError` instead of truncating.
//!
//! The `pooling` module is a thin consumer of the array API that folds
//! groups of channels of `(batch, channels, height, width)` activations.
pub mod config;
pub mod error;
pub mod math;
pub mod pooling;
pub mod random;

pub mod prelude {
    pub use crate::config::{PoolConfig, PoolMethod, DEFAULT_TOLERANCE};
    pub use crate::error::ArrayError;
    pub use crate::math::{Array, Nested, Reduced, Reduction, Shape};
    pub use crate::random::ArrayRng;
}
