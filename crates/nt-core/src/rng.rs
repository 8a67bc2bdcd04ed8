//! Deterministic RNG for synthesized node positions.
//!
//! A node without a mobility model can be given a pseudo-random position so
//! it still appears in the output.  The stream is owned by the recorder
//! instance and seeded explicitly — never ambient — so two runs with the
//! same seed place model-less nodes identically and every test run gets a
//! fresh stream.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Instance-owned deterministic RNG.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
