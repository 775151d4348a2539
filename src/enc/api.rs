//! The value-encoding wrappers (spec §4.8): the public surface callers actually reach for.

use crate::algebra::Fp;
use crate::cipher::Cipher;
use crate::enc::compact::guard_budget;
use crate::enc::noise::emit_noise_edges;
use crate::enc::payload::new_payload_cipher;
use crate::enc::planner::plan_noise;
use crate::keys::{PublicKey, SecretKey};
use rand_core::{CryptoRng, RngCore};

/// `enc_fp_depth(pk, sk, v, depth_hint) -> Cipher`: the payload+noise generator of
/// §4.2-§4.3, run end to end and budget-guarded.
pub fn enc_fp_depth<R: RngCore + CryptoRng>(
    pk: &PublicKey,
    sk: &SecretKey,
    v: Fp,
    depth_hint: i32,
    rng: &mut R,
) -> Cipher {
    let (cipher, base) = new_payload_cipher(pk, sk, v, rng);
    let mut cipher = cipher;

    let (z2, z3) = plan_noise(pk.prm(), depth_hint);
    cipher
        .edges
        .extend(emit_noise_edges(pk, sk, &base, z2, z3, rng));

    guard_budget(pk, &mut cipher, "enc_fp_depth");
    cipher
}

/// `enc_fp(pk, sk, v, depth_hint) -> Cipher` (spec §4.8: identical to `enc_fp_depth`).
pub fn enc_fp<R: RngCore + CryptoRng>(
    pk: &PublicKey,
    sk: &SecretKey,
    v: Fp,
    depth_hint: i32,
    rng: &mut R,
) -> Cipher {
    enc_fp_depth(pk, sk, v, depth_hint, rng)
}

/// `enc_value_depth(pk, sk, v: u64, depth_hint) -> Cipher`: pairs an encryption of `v+mask`
/// with one of `-mask` under an independent random mask, blinding the plaintext at layer
/// granularity (spec §4.8).
pub fn enc_value_depth<R: RngCore + CryptoRng>(
    pk: &PublicKey,
    sk: &SecretKey,
    v: u64,
    depth_hint: i32,
    rng: &mut R,
) -> Cipher {
    let mask = Fp::rand_nonzero(rng);
    let v_fp = Fp::from_u64(v);

    let a = enc_fp(pk, sk, v_fp.add(&mask), depth_hint, rng);
    let b = enc_fp(pk, sk, mask.neg(), depth_hint, rng);
    crate::enc::combine::combine_ciphers(pk, a, b)
}

/// `enc_zero_depth(pk, sk, depth_hint) -> Cipher` (spec §4.8: `enc_value_depth` with `v=0`).
pub fn enc_zero_depth<R: RngCore + CryptoRng>(
    pk: &PublicKey,
    sk: &SecretKey,
    depth_hint: i32,
    rng: &mut R,
) -> Cipher {
    enc_value_depth(pk, sk, 0, depth_hint, rng)
}

/// `enc_value(pk, sk, v: u64) -> Cipher` (spec §4.8: `enc_value_depth(..., 0)`).
pub fn enc_value<R: RngCore + CryptoRng>(pk: &PublicKey, sk: &SecretKey, v: u64, rng: &mut R) -> Cipher {
    enc_value_depth(pk, sk, v, 0, rng)
}

/// `sigma_density(pk, C) -> f64`: the mean ones-ratio of edge bit-vectors, `0` if `C` has no
/// edges (spec §4.8).
pub fn sigma_density(pk: &PublicKey, c: &Cipher) -> f64 {
    if c.edges.is_empty() {
        return 0.0;
    }
    let total_ones: u64 = c.edges.iter().map(|e| e.s.popcnt() as u64).sum();
    let total_bits = c.edges.len() as u64 * pk.prm().m_bits() as u64;
    total_ones as f64 / total_bits as f64
}
