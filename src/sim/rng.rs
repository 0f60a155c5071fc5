//! Injectable random source
//!
//! Generation and spawning draw every random decision through
//! `RandomSource`, so a run is fully determined by its seed (or script).

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Source of the random decisions made by path generation and spawning
pub trait RandomSource {
    /// Uniform integer in `0..bound` (`bound` must be non-zero)
    fn next_below(&mut self, bound: u32) -> u32;

    /// Uniform float in `[0, 1)`
    fn next_unit(&mut self) -> f32;

    /// Bernoulli draw with probability `chance`
    fn chance(&mut self, chance: f32) -> bool {
        self.next_unit() < chance
    }
}

/// Seeded PCG generator, the default source for real runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this generator was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        self.rng.random_range(0..bound)
    }

    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Largest `f32` strictly below 1
const LARGEST_BELOW_ONE: f32 = 1.0 - f32::EPSILON / 2.0;

/// Replays a fixed cycle of unit values (for tests and replays)
///
/// Values are clamped into `[0, 1)`. `next_below(n)` maps the next unit value
/// onto `0..n`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// A source that always returns `value`
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedRandom {
    fn next_below(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        let unit = self.next_unit();
        ((unit * bound as f32) as u32).min(bound.saturating_sub(1))
    }

    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, LARGEST_BELOW_ONE)
    }
}
