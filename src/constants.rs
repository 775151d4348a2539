//! Crate-wide constants: field size, byte widths, and domain-separation tags.

use num_bigint::BigUint;
use once_cell::sync::Lazy;

/// The prime modulus $p = 2^{127} - 1$ (a Mersenne prime) that `Fp` operates over.
pub const FP_MODULUS: u128 = (1u128 << 127) - 1;

/// `FP_MODULUS` as a `BigUint`, lazily materialized once per process.
///
/// Reductions go through `BigUint::mod_floor` rather than bespoke 256-bit arithmetic.
pub(crate) static FP_MODULUS_BIGUINT: Lazy<BigUint> = Lazy::new(|| BigUint::from(FP_MODULUS));

/// Number of bytes in a canonical, little-endian-encoded `Fp` element.
pub const FP_NUM_BYTES: usize = 16;

/// Number of bytes sampled when reducing fresh randomness into an `Fp` element.
/// Oversampling (double the element width) keeps the bias from modular reduction negligible.
pub const FP_SAMPLE_BYTES: usize = 2 * FP_NUM_BYTES;

/// Width, in bytes, of a nonce used to seed a fresh base layer.
pub const NONCE128_NUM_BYTES: usize = 16;

/// "Nothing-up-my-sleeve" domain separator used when no caller-supplied `canon_tag` is given.
pub const DEFAULT_CANON_TAG: &[u8; 24] = b"EDGECIPHER_LAYER_ZTAG_V1";

/// Domain separator for the `prf_R` masking-scalar derivation.
pub const DST_PRF_R: &[u8; 16] = b"edgecipher/prf_R";

/// Domain separator for the `sigma_from_H` bit-vector share derivation.
pub const DST_SIGMA_H: &[u8; 20] = b"edgecipher/sigma_H__";

/// Domain separator for the noise-group delta PRF.
pub const DST_NOISE_DELTA: &[u8; 24] = b"edgecipher/noise_delta__";

/// Epsilon guarding division-by-near-zero in the noise planner (spec §4.1).
pub const PLANNER_EPSILON: f64 = 1e-6;

/// Weyl-style odd mixing constants used to perturb a seed with `(group_id, kind)` (spec §4.3).
pub const WEYL_NONCE_LO: u64 = 0x9e3779b97f4a7c15;
pub const WEYL_NONCE_HI: u64 = 0x94d049bb133111eb;
pub const WEYL_ZTAG: u64 = 0x517cc1b727220a95;
