use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Absolute tolerance used by `allclose_default`.
pub const DEFAULT_TOLERANCE: f64 = 1e-5;

/// How adjacent channels are folded into one output channel.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PoolMethod {
    #[default]
    Avg,
    Max,
    /// Weighted sum against caller-supplied (typically random) weights.
    Randomized,
}

impl FromStr for PoolMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avg" | "average" => Ok(PoolMethod::Avg),
            "max" => Ok(PoolMethod::Max),
            "random" | "randomized" => Ok(PoolMethod::Randomized),
            _ => Err(format!(
                "Unknown pooling method: {}. Expected one of `avg`, `max` or `randomized`",
                s
            )),
        }
    }
}

/// Central configuration for channel pooling.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct PoolConfig {
    /// Number of adjacent channels folded together.
    pub num_split: usize,

    #[serde(flatten)]
    pub method: PoolMethod,
}

impl PoolConfig {
    pub fn new(num_split: usize, method: PoolMethod) -> Self {
        Self { num_split, method }
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            num_split: 2,
            method: PoolMethod::default(),
        }
    }
}
