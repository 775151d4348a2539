//! The noise planner (spec §4.1): decides how many 2-edge (Z2) and 3-edge (Z3) noise
//! groups to emit for a given depth hint.

use crate::constants::PLANNER_EPSILON;
use crate::keys::Prm;

/// `plan_noise(prm, depth_hint) -> (Z2, Z3)`.
///
/// Pure function; no failure modes (spec §4.1).
pub fn plan_noise(prm: &Prm, depth_hint: i32) -> (i32, i32) {
    let budget =
        prm.noise_entropy_bits() + prm.depth_slope_bits() * (depth_hint.max(0) as f64);

    let log2_b = (prm.b() as f64).log2();
    let per2 = 2.0 * log2_b;
    let per3 = 3.0 * log2_b;

    let mut z2 = (budget * prm.tuple2_fraction() / per2.max(PLANNER_EPSILON)).floor() as i32;
    let mut z3 =
        (budget * (1.0 - prm.tuple2_fraction()) / per3.max(PLANNER_EPSILON)).floor() as i32;

    // Parity rule (spec §4.1): a total of exactly 1 has no "last group" to close the delta
    // sum to zero, so the planner forbids it by bumping whichever count is already nonzero
    // (or Z2, if both happen to be zero; though that branch is unreachable here since
    // 0 + 0 != 1).
    if z2 + z3 == 1 {
        if z3 != 0 {
            z3 += 1;
        } else {
            z2 += 1;
        }
    }

    (z2, z3)
}
