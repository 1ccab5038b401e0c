//! Seeded range sampling
//!
//! Platform placement only ever needs "an integer in `[min, max]`", so that is
//! the whole interface. Anything implementing [`rand::Rng`] qualifies, which
//! keeps the seeded [`Pcg32`] in production and lets tests script values.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Uniform integer sampling, inclusive on both ends
pub trait RangeSampler {
    /// Sample from `[min, max]`. Callers guarantee `min <= max`.
    fn between(&mut self, min: i32, max: i32) -> i32;
}

impl<R: Rng> RangeSampler for R {
    fn between(&mut self, min: i32, max: i32) -> i32 {
        self.random_range(min..=max)
    }
}

/// RNG seed wrapper for serialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}
