//! Reference implementations of the collaborator interfaces named in spec §6:
//! `prf_R`, `prg_layer_ztag`, `sigma_from_H`, `csprng_u64`, `make_nonce128`.
//!
//! These are explicitly out of scope for the core per §1 ("no implementation of the
//! hash/PRF primitives"); the derivations below exist so the core is callable end to end
//! and its property tests exercise real code rather than mocks. Any system embedding this
//! core is free to replace these functions with its own PRF/CSPRNG: the `enc` module only
//! ever calls through this module's signatures, never their internals.
//!
//! Field elements are derived from hashes via SHA3-512, domain-separated, reduced via
//! `BigUint::mod_floor`.

use crate::algebra::{BitVec, Fp};
use crate::cipher::edge::Sign;
use crate::constants::{DST_PRF_R, DST_SIGMA_H};
use crate::keys::{PublicKey, SecretKey};
use num_bigint::BigUint;
use num_integer::Integer;
use rand_core::{CryptoRng, RngCore};
use sha3::{Digest, Sha3_512};

/// A 128-bit nonce, kept as explicit `lo`/`hi` halves because the noise generator's Weyl
/// mixing (spec §4.3) XORs odd constants into each half independently.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Nonce128 {
    pub lo: u64,
    pub hi: u64,
}

impl Nonce128 {
    pub fn to_bytes(&self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[0..8].copy_from_slice(&self.lo.to_le_bytes());
        out[8..16].copy_from_slice(&self.hi.to_le_bytes());
        out
    }
}

/// Per-layer PRF seed: `{nonce(128b), ztag(64b)}` (spec §3).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct RSeed {
    pub nonce: Nonce128,
    pub ztag: u64,
}

/// `csprng_u64() -> u64`. Draws one pseudorandom `u64` from the caller-supplied CSPRNG.
pub fn csprng_u64<R: RngCore + CryptoRng>(rng: &mut R) -> u64 {
    rng.next_u64()
}

/// `make_nonce128() -> Nonce128`. Draws a fresh 128-bit nonce.
pub fn make_nonce128<R: RngCore + CryptoRng>(rng: &mut R) -> Nonce128 {
    Nonce128 {
        lo: rng.next_u64(),
        hi: rng.next_u64(),
    }
}

fn hash_to_u64(dst: &[u8], parts: &[&[u8]]) -> u64 {
    let mut hasher = Sha3_512::new();
    hasher.update(dst);
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    u64::from_le_bytes(digest[0..8].try_into().unwrap())
}

fn hash_to_fp(dst: &[u8], parts: &[&[u8]]) -> Fp {
    let mut hasher = Sha3_512::new();
    hasher.update(dst);
    for part in parts {
        hasher.update(part);
    }
    let digest = hasher.finalize();
    let n = BigUint::from_bytes_le(digest.as_slice());
    crate::algebra::biguint::biguint_to_fp(&n.mod_floor(crate::algebra::biguint::field_order()))
}

/// `prg_layer_ztag(canon_tag, nonce) -> u64`. Derives a fresh base layer's z-tag.
pub fn prg_layer_ztag(canon_tag: &[u8], nonce: &Nonce128) -> u64 {
    hash_to_u64(canon_tag, &[b"ztag", &nonce.to_bytes()])
}

/// `prf_R(pk, sk, seed) -> Fp`. Derives the per-layer masking scalar `R`.
pub fn prf_r(pk: &PublicKey, sk: &SecretKey, seed: &RSeed) -> Fp {
    hash_to_fp(
        DST_PRF_R,
        &[
            pk.canon_tag(),
            sk.bytes(),
            &seed.nonce.to_bytes(),
            &seed.ztag.to_le_bytes(),
        ],
    )
}

/// `sigma_from_H(pk, ztag, nonce, idx, sign, salt_u64) -> BitVec(m_bits)`. Derives one
/// edge's bit-vector share.
pub fn sigma_from_h(
    pk: &PublicKey,
    ztag: u64,
    nonce: &Nonce128,
    idx: u16,
    sign: Sign,
    salt: u64,
) -> BitVec {
    let m = pk.prm().m_bits();
    let num_words = m.div_ceil(64);
    let sign_byte = [sign as u8];
    let mut words = Vec::with_capacity(num_words);
    for word_idx in 0..num_words {
        let w = hash_to_u64(
            DST_SIGMA_H,
            &[
                pk.canon_tag(),
                &ztag.to_le_bytes(),
                &nonce.to_bytes(),
                &idx.to_le_bytes(),
                &sign_byte,
                &salt.to_le_bytes(),
                &(word_idx as u64).to_le_bytes(),
            ],
        );
        words.push(w);
    }
    BitVec::from_words(m, words)
}

/// Perturbs `seed` by XOR-mixing `group_id` and `kind` into its fields with the fixed odd
/// Weyl constants of spec §4.3, then derives `prf_R` on the perturbed seed. This *is*
/// `prf_noise_delta(pk, sk, base_seed, group_id, kind)`.
pub fn prf_noise_delta(
    pk: &PublicKey,
    sk: &SecretKey,
    base_seed: &RSeed,
    group_id: u32,
    kind: u8,
) -> Fp {
    use crate::constants::{WEYL_NONCE_HI, WEYL_NONCE_LO, WEYL_ZTAG};

    let gid = group_id as u64;
    let kind64 = kind as u64;

    let perturbed = RSeed {
        nonce: Nonce128 {
            lo: base_seed.nonce.lo ^ (WEYL_NONCE_LO.wrapping_mul(gid)) ^ kind64,
            hi: base_seed.nonce.hi ^ (WEYL_NONCE_HI.wrapping_mul(gid)) ^ (kind64 << 32),
        },
        ztag: base_seed.ztag ^ (WEYL_ZTAG.wrapping_mul(gid)) ^ (kind64 << 48),
    };

    prf_r(pk, sk, &perturbed)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::keys::params::test_support::small_prm;
    use rand::thread_rng;

    #[test]
    fn prf_r_is_deterministic() {
        let pk = PublicKey::with_default_tag(small_prm(8, 64));
        let sk = SecretKey::new([7u8; 32]);
        let seed = RSeed {
            nonce: Nonce128 { lo: 1, hi: 2 },
            ztag: 3,
        };
        assert_eq!(prf_r(&pk, &sk, &seed), prf_r(&pk, &sk, &seed));
    }

    #[test]
    fn prf_noise_delta_varies_with_group_id() {
        let pk = PublicKey::with_default_tag(small_prm(8, 64));
        let sk = SecretKey::new([7u8; 32]);
        let seed = RSeed {
            nonce: Nonce128 { lo: 1, hi: 2 },
            ztag: 3,
        };
        let d0 = prf_noise_delta(&pk, &sk, &seed, 0, 0);
        let d1 = prf_noise_delta(&pk, &sk, &seed, 1, 0);
        assert_ne!(d0, d1);
    }

    #[test]
    fn sigma_from_h_has_requested_width() {
        let pk = PublicKey::with_default_tag(small_prm(8, 64));
        let mut rng = thread_rng();
        let nonce = make_nonce128(&mut rng);
        let sigma = sigma_from_h(&pk, 42, &nonce, 3, Sign::Plus, 99);
        assert_eq!(sigma.len(), pk.prm().m_bits());
    }
}
