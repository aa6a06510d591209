// stride_sim/src/prng.rs

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed used when neither the scenario nor the command line provides one.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// A newtype wrapper around `ChaCha8Rng`.
/// This is the central, deterministic pseudo-random number generator for a run.
#[derive(Debug, Clone)]
pub struct SimulationRng(pub ChaCha8Rng);

impl SimulationRng {
    pub fn seeded(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}
