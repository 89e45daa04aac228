use rand::prelude::SmallRng;
use rand::{Rng, SeedableRng};

/// Seed used when none is provided
pub const DEFAULT_SEED: u64 = 420;

/// Creates a PRNG seeded with `seed`, or with [`DEFAULT_SEED`] if undefined.
pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    SmallRng::seed_from_u64(seed.unwrap_or(DEFAULT_SEED))
}

/// Uniformly distributed index in `[0, bound)`.
/// Panics if `bound` is zero.
pub fn random_index(rng: &mut impl Rng, bound: usize) -> usize {
    rng.random_range(0..bound)
}

/// Uniformly distributed value in `[0, 1)`.
pub fn random_unit(rng: &mut impl Rng) -> f64 {
    rng.random::<f64>()
}

/// Uniformly distributed value in `[lo, hi)`.
pub fn random_between(rng: &mut impl Rng, lo: f64, hi: f64) -> f64 {
    lo + (hi - lo) * random_unit(rng)
}

/// Shuffles `slice` in place by swapping every position `i` (from the back) with a position in `[0, i)`.
/// Every element ends up away from its starting position: the result is a single cycle.
pub fn cyclic_shuffle<T>(slice: &mut [T], rng: &mut impl Rng) {
    for i in (1..slice.len()).rev() {
        let j = random_index(rng, i);
        slice.swap(i, j);
    }
}
