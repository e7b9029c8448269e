//! Deterministic dice for weather rolls.
//!
//! Wraps `ChaCha8Rng` so identical seeds give identical weather histories on
//! every platform.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::atmosphere::env::RandomSource;

/// Default seed used when no explicit seed is provided.
const DEFAULT_SEED: u64 = 42;

pub struct ChaChaDice(pub ChaCha8Rng);

impl Default for ChaChaDice {
    fn default() -> Self {
        Self(ChaCha8Rng::seed_from_u64(DEFAULT_SEED))
    }
}

impl ChaChaDice {
    /// Create dice seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl RandomSource for ChaChaDice {
    fn roll_dice(&mut self, max: u32) -> u32 {
        self.0.gen_range(0..max.max(1))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
