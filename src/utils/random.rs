//! Small randomness helpers, one per primitive.

use crate::cipher::edge::Sign;
use rand::seq::IteratorRandom;
use rand::Rng;
use rand_core::{CryptoRng, RngCore};

/// Samples `k` distinct column indices, uniformly, from `[0, b)`, without replacement.
///
/// Implemented via `IteratorRandom::choose_multiple`.
pub fn distinct_indices<R: RngCore + CryptoRng>(rng: &mut R, b: usize, k: usize) -> Vec<u16> {
    (0..b as u16).choose_multiple(rng, k)
}

/// Samples one column index from `[0, b)`, uniformly, excluding `excluded`.
///
/// Used by the Z2 noise group (spec §4.3: "`j <- uniform [0,B) \ {i}`"). Implemented by
/// rejection sampling rather than shrinking the domain, since `b` is always far larger than
/// the handful of exclusions any single noise group draws.
pub fn index_excluding<R: RngCore + CryptoRng>(rng: &mut R, b: usize, excluded: &[u16]) -> u16 {
    loop {
        let candidate = rng.gen_range(0..b as u16);
        if !excluded.contains(&candidate) {
            return candidate;
        }
    }
}

/// Samples a uniformly random `Sign`.
pub fn random_sign<R: RngCore + CryptoRng>(rng: &mut R) -> Sign {
    if rng.next_u32() & 1 == 0 {
        Sign::Plus
    } else {
        Sign::Minus
    }
}
