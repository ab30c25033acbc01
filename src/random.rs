//! Explicit random generator for building arrays of uniform draws.
//!
//! There is no process-wide generator: callers own an `ArrayRng` and seed it
//! when they need reproducible arrays.
use rand::distributions::{Distribution, Standard};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::math::{Array, Shape};

#[derive(Clone, Debug)]
pub struct ArrayRng {
    rng: StdRng,
}

impl ArrayRng {
    pub fn seed_from_u64(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Independent uniform draws in `[0, 1)` filling `shape`. A rank-0 shape
    /// yields a single draw.
    pub fn rand<T, S>(&mut self, shape: S) -> Array<T>
    where
        Standard: Distribution<T>,
        S: Into<Shape>,
    {
        let shape = shape.into();
        let data: Vec<T> = (&mut self.rng).sample_iter(Standard).take(shape.size()).collect();
        log::trace!("drew {} uniform values for shape {}", data.len(), shape);
        Array::from_raw(shape, data)
    }
}

impl Default for ArrayRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}
