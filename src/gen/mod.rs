//! Dataset generation: allocation planning, record synthesis and trend
//! aggregation.

pub mod plan;
pub mod record;
pub mod synth;
pub mod trend;

#[cfg(test)]
mod tests;

use rand::rngs::StdRng;
use rand::SeedableRng;

/// RNG for one run: seeded for reproducible output, OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
