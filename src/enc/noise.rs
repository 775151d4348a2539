//! The noise edge generator (spec §4.3): Z2 (2-edge) and Z3 (3-edge) noise groups whose
//! signed, generator-weighted sums equal PRF-derived deltas, with the final group closing
//! the running delta sum to zero.

use crate::algebra::Fp;
use crate::cipher::{Edge, Sign};
use crate::enc::payload::BaseLayer;
use crate::keys::{PublicKey, SecretKey};
use crate::prf;
use crate::utils::random::{distinct_indices, index_excluding, random_sign};
use rand_core::{CryptoRng, RngCore};

const KIND_Z2: u8 = 0;
const KIND_Z3: u8 = 1;

/// Tracks the state threaded through a single ciphertext's noise-group sequence: the
/// running delta accumulator and the monotonically increasing group counter (spec §4.3).
/// Local to one `enc_fp` call; never shared across encryptions (spec §9).
struct NoiseState {
    delta_acc: Fp,
    group_id: u32,
    total_groups: u32,
}

impl NoiseState {
    fn new(total_groups: u32) -> Self {
        NoiseState {
            delta_acc: Fp::ZERO,
            group_id: 0,
            total_groups,
        }
    }

    /// Draws this group's `Delta`, per spec §4.3: the final group closes the sum to zero;
    /// every other group derives its delta via `prf_noise_delta` and folds it into the
    /// running accumulator.
    fn next_delta(&mut self, pk: &PublicKey, sk: &SecretKey, base: &BaseLayer, kind: u8) -> Fp {
        let is_final = self.total_groups - self.group_id <= 1;
        let delta = if is_final {
            self.delta_acc.neg()
        } else {
            let d = prf::prf_noise_delta(pk, sk, &base.seed, self.group_id, kind);
            self.delta_acc = self.delta_acc.add(&d);
            d
        };
        self.group_id += 1;
        delta
    }
}

/// Emits one Z2 (2-edge) noise group (spec §4.3).
fn emit_z2_group<R: RngCore + CryptoRng>(
    pk: &PublicKey,
    base: &BaseLayer,
    delta: Fp,
    rng: &mut R,
) -> [Edge; 2] {
    let prm = pk.prm();
    let i = distinct_indices(rng, prm.b(), 1)[0];
    let j = index_excluding(rng, prm.b(), &[i]);

    let s1 = random_sign(rng);
    let s2 = s1.flipped();

    let delta_prime = if matches!(s1, Sign::Plus) { delta } else { delta.neg() };

    let r_i = Fp::rand_nonzero(rng);
    let gi = prm.powg(i as usize);
    let gj = prm.powg(j as usize);
    let r_j = r_i.mul(&gi).sub(&delta_prime).mul(&gj.inv());

    let salt_i = prf::csprng_u64(rng);
    let salt_j = prf::csprng_u64(rng);
    let sigma_i = prf::sigma_from_h(pk, base.seed.ztag, &base.seed.nonce, i, s1, salt_i);
    let sigma_j = prf::sigma_from_h(pk, base.seed.ztag, &base.seed.nonce, j, s2, salt_j);

    [
        Edge::new(0, i, s1, r_i.mul(&base.r), sigma_i),
        Edge::new(0, j, s2, r_j.mul(&base.r), sigma_j),
    ]
}

/// Emits one Z3 (3-edge) noise group (spec §4.3).
fn emit_z3_group<R: RngCore + CryptoRng>(
    pk: &PublicKey,
    base: &BaseLayer,
    delta: Fp,
    rng: &mut R,
) -> [Edge; 3] {
    let prm = pk.prm();
    let idx = distinct_indices(rng, prm.b(), 3);
    let (i, j, k) = (idx[0], idx[1], idx[2]);

    let s1 = random_sign(rng);
    let s2 = random_sign(rng);
    let s3 = random_sign(rng);

    let a = Fp::rand_nonzero(rng);
    let b = Fp::rand_nonzero(rng);

    let term1 = s1.as_fp().mul(&a).mul(&prm.powg(i as usize));
    let term2 = s2.as_fp().mul(&b).mul(&prm.powg(j as usize));
    let gk_signed = s3.as_fp().mul(&prm.powg(k as usize));

    let c = delta.sub(&term1).sub(&term2).mul(&gk_signed.inv());

    let salt_i = prf::csprng_u64(rng);
    let salt_j = prf::csprng_u64(rng);
    let salt_k = prf::csprng_u64(rng);
    let sigma_i = prf::sigma_from_h(pk, base.seed.ztag, &base.seed.nonce, i, s1, salt_i);
    let sigma_j = prf::sigma_from_h(pk, base.seed.ztag, &base.seed.nonce, j, s2, salt_j);
    let sigma_k = prf::sigma_from_h(pk, base.seed.ztag, &base.seed.nonce, k, s3, salt_k);

    [
        Edge::new(0, i, s1, a.mul(&base.r), sigma_i),
        Edge::new(0, j, s2, b.mul(&base.r), sigma_j),
        Edge::new(0, k, s3, c.mul(&base.r), sigma_k),
    ]
}

/// Emits the full noise-group sequence: all Z2 groups (monotonically increasing
/// `group_id`, `kind = 0`) followed by all Z3 groups (`kind = 1`), per spec §4.3.
pub(crate) fn emit_noise_edges<R: RngCore + CryptoRng>(
    pk: &PublicKey,
    sk: &SecretKey,
    base: &BaseLayer,
    z2: i32,
    z3: i32,
    rng: &mut R,
) -> Vec<Edge> {
    let z2 = z2.max(0) as u32;
    let z3 = z3.max(0) as u32;
    let mut state = NoiseState::new(z2 + z3);
    let mut edges = Vec::with_capacity((2 * z2 + 3 * z3) as usize);

    for _ in 0..z2 {
        let delta = state.next_delta(pk, sk, base, KIND_Z2);
        edges.extend(emit_z2_group(pk, base, delta, rng));
    }
    for _ in 0..z3 {
        let delta = state.next_delta(pk, sk, base, KIND_Z3);
        edges.extend(emit_z3_group(pk, base, delta, rng));
    }

    edges
}
