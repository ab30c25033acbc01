//! Channel pooling over 4-D activations shaped `(batch, channels, height, width)`.
//!
//! Each function folds groups of `num_split` channels into one output channel,
//! so the output has `channels / num_split` channels. Everything here is built
//! from the public array operations (`reshape`, `mean_axis`, `max_axis`,
//! `multiply`, `sum_axis`).

use anyhow::{bail, Context, Result};
use num_traits::Float;

use crate::config::{PoolConfig, PoolMethod};
use crate::math::Array;

/// Dimensions of a pooling input, already validated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Activations {
    n: usize,
    c: usize,
    h: usize,
    w: usize,
    /// Output channels.
    groups: usize,
}

fn activations<T>(data: &Array<T>, num_split: usize) -> Result<Activations> {
    let &[n, c, h, w] = data.dims() else {
        bail!(
            "expected a 4-D (batch, channels, height, width) array, got shape {}",
            data.shape()
        );
    };
    if num_split == 0 || c % num_split != 0 {
        bail!(
            "{} channels cannot be split into groups of {}",
            c,
            num_split
        );
    }
    Ok(Activations {
        n,
        c,
        h,
        w,
        groups: c / num_split,
    })
}

/// Mean of every run of `num_split` adjacent channels.
pub fn avg_pool<T: Float>(data: &Array<T>, num_split: usize) -> Result<Array<T>> {
    let a = activations(data, num_split)?;
    let grouped = data
        .reshape(&[
            a.n as isize,
            a.groups as isize,
            num_split as isize,
            a.h as isize,
            a.w as isize,
        ])
        .context("Failed to group channels for average pooling")?;
    log::trace!("avg_pool {} -> groups {}", data.shape(), grouped.shape());
    Ok(grouped.mean_axis(2)?)
}

/// Maximum of every run of `num_split` adjacent channels.
pub fn max_pool<T: Float>(data: &Array<T>, num_split: usize) -> Result<Array<T>> {
    let a = activations(data, num_split)?;
    let grouped = data
        .reshape(&[
            a.n as isize,
            a.groups as isize,
            num_split as isize,
            a.h as isize,
            a.w as isize,
        ])
        .context("Failed to group channels for max pooling")?;
    log::trace!("max_pool {} -> groups {}", data.shape(), grouped.shape());
    Ok(grouped.max_axis(2)?)
}

/// Weighted sum of channels that are `channels / num_split` apart.
///
/// `weights` has shape `(channels, height, width)` and is shared by every
/// sample in the batch. Output channel `j` is
/// `sum_i data[i * groups + j] * weights[i * groups + j]`.
pub fn randomized_pool<T: Float>(
    weights: &Array<T>,
    data: &Array<T>,
    num_split: usize,
) -> Result<Array<T>> {
    let a = activations(data, num_split)?;
    if weights.dims() != &[a.c, a.h, a.w][..] {
        bail!(
            "weights of shape {} do not match activations of shape {}",
            weights.shape(),
            data.shape()
        );
    }
    let (split, groups, h, w) = (
        num_split as isize,
        a.groups as isize,
        a.h as isize,
        a.w as isize,
    );
    let grouped = data
        .reshape(&[a.n as isize, split, groups, h, w])
        .context("Failed to group channels for randomized pooling")?;
    let grouped_weights = weights
        .reshape(&[split, groups, h, w])
        .context("Failed to group pooling weights")?;
    let weighted = grouped
        .multiply(&grouped_weights)
        .context("Failed to apply pooling weights")?;
    log::trace!("randomized_pool {} -> groups {}", data.shape(), grouped.shape());
    Ok(weighted.sum_axis(1)?)
}

/// Collapse everything but the batch axis: `(n, ...) -> (n, -1)`.
pub fn flatten<T: Clone>(data: &Array<T>) -> Result<Array<T>> {
    let Some(&n) = data.dims().first() else {
        bail!("cannot flatten a rank-0 array");
    };
    data.reshape(&[n as isize, -1])
        .with_context(|| format!("Failed to flatten array of shape {}", data.shape()))
}

/// Inverse of `flatten` for activations: `(n, c * h * w) -> (n, c, h, w)`.
pub fn reshape_4d<T: Clone>(data: &Array<T>, c: usize, h: usize, w: usize) -> Result<Array<T>> {
    data.reshape(&[-1, c as isize, h as isize, w as isize])
        .with_context(|| {
            format!(
                "Failed to reshape array of shape {} into (-1, {}, {}, {})",
                data.shape(),
                c,
                h,
                w
            )
        })
}

/// Pool `data` with the method and group size from `config`.
///
/// `weights` is required for `PoolMethod::Randomized` and ignored otherwise.
pub fn pool<T: Float>(
    config: &PoolConfig,
    data: &Array<T>,
    weights: Option<&Array<T>>,
) -> Result<Array<T>> {
    match config.method {
        PoolMethod::Avg => avg_pool(data, config.num_split),
        PoolMethod::Max => max_pool(data, config.num_split),
        PoolMethod::Randomized => {
            let weights = weights.context("Randomized pooling requires a weight array")?;
            randomized_pool(weights, data, config.num_split)
        }
    }
}
