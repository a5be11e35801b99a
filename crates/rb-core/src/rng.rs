//! Deterministic per-source RNG.
//!
//! # Determinism strategy
//!
//! Each car source gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (source_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive source indices uniformly across the seed space.
//! This means:
//!
//! - Sources never share RNG state, so the sample a source draws depends only
//!   on how many cars *it* has spawned — never on what other sources did.
//! - Two runs with the same seed and configuration produce identical
//!   arrival sequences, which is what makes whole-run traces comparable.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::SourceId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-source deterministic RNG.
///
/// Create one per `CarSource` at simulation init.  The type is `!Sync`
/// (`SmallRng` is not thread-safe) which is fine: the whole simulation is
/// single-threaded cooperative.
pub struct SourceRng(SmallRng);

impl SourceRng {
    /// Seed deterministically from the run's global seed and a source ID.
    pub fn new(global_seed: u64, source: SourceId) -> Self {
        let seed = global_seed ^ (source.0 as u64).wrapping_mul(MIXING_CONSTANT);
        SourceRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// A uniform draw in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f64 {
        self.0.r#gen::<f64>()
    }

    /// A uniform draw in `[low, high)`.
    #[inline]
    pub fn uniform_in(&mut self, low: f64, high: f64) -> f64 {
        self.0.gen_range(low..high)
    }

    /// An exponentially distributed draw with the given mean (inverse-CDF
    /// sampling).  `1.0 - u` keeps the argument of `ln` strictly positive.
    #[inline]
    pub fn exponential(&mut self, mean: f64) -> f64 {
        let u: f64 = self.0.r#gen();
        -mean * (1.0 - u).ln()
    }
}
