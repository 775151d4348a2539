//! A field element of the prime field $\mathbb{F}_p$, $p = 2^{127} - 1$.
//!
//! `Fp` is a plain Mersenne-prime field element kept in canonical `u128` form (not a
//! Montgomery-form curve scalar). Multiplication and inversion go through a `BigUint`
//! round-trip (see `algebra::biguint`).

use crate::algebra::biguint;
use crate::constants::FP_MODULUS;
use rand_core::{CryptoRng, RngCore};
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use subtle::{Choice, ConstantTimeEq};

/// An element of $\mathbb{F}_p$, always kept in canonical form (i.e. `0 <= value < FP_MODULUS`).
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Fp(u128);

impl Fp {
    /// The additive identity.
    pub const ZERO: Fp = Fp(0);

    /// The multiplicative identity.
    pub const ONE: Fp = Fp(1);

    /// Builds an `Fp` from a value already known to be canonical. Only used by conversion
    /// helpers that have just performed the reduction themselves.
    pub(crate) fn from_raw_unchecked(value: u128) -> Self {
        debug_assert!(value < FP_MODULUS);
        Fp(value)
    }

    /// Returns the canonical `u128` representative.
    pub(crate) fn to_raw(self) -> u128 {
        self.0
    }

    /// Builds an `Fp` from a `u64`, reducing modulo `p` (a no-op for any `u64` since
    /// `p > 2^64`).
    pub fn from_u64(v: u64) -> Self {
        Fp(v as u128)
    }

    /// `self + other (mod p)`.
    pub fn add(&self, other: &Fp) -> Fp {
        // self.0, other.0 < p < 2^127, so the sum fits in u128 without overflow.
        let sum = self.0 + other.0;
        Fp(if sum >= FP_MODULUS { sum - FP_MODULUS } else { sum })
    }

    /// `self - other (mod p)`.
    pub fn sub(&self, other: &Fp) -> Fp {
        self.add(&other.neg())
    }

    /// `-self (mod p)`.
    pub fn neg(&self) -> Fp {
        if self.0 == 0 {
            Fp(0)
        } else {
            Fp(FP_MODULUS - self.0)
        }
    }

    /// `self * other (mod p)`, via a `BigUint` round-trip.
    pub fn mul(&self, other: &Fp) -> Fp {
        let product = biguint::fp_to_biguint(self) * biguint::fp_to_biguint(other);
        biguint::biguint_to_fp(&product)
    }

    /// `self^{-1} (mod p)`, via Fermat's little theorem: `self^{p-2} mod p`.
    ///
    /// # Panics
    /// Panics if `self` is zero (zero has no multiplicative inverse). Per spec §7, this is
    /// a fatal arithmetic fault, not a recoverable error: callers must ensure distinctness
    /// invariants hold before calling `inv`.
    pub fn inv(&self) -> Fp {
        assert!(
            !self.is_zero(),
            "attempted to invert zero in Fp: caller violated a distinctness invariant"
        );
        let base = biguint::fp_to_biguint(self);
        let exponent = biguint::field_order() - num_bigint::BigUint::from(2u8);
        let result = base.modpow(&exponent, biguint::field_order());
        biguint::biguint_to_fp(&result)
    }

    /// Plain (non-constant-time) zero test, for use in contexts where the branch is on a
    /// publicly observable quantity (e.g. guarding `inv`).
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Constant-time "is nonzero" predicate (spec §7: the one branch inside `compact_edges`
    /// that must not leak via timing).
    pub fn ct_is_nonzero(&self) -> Choice {
        !self.0.to_le_bytes().ct_eq(&0u128.to_le_bytes())
    }

    /// Samples a uniform element of $\mathbb{F}_p \setminus \{0\}$.
    ///
    /// Uses rejection sampling: draws oversized random bytes, reduces modulo `p`, and
    /// retries on the (astronomically unlikely) zero outcome.
    pub fn rand_nonzero<R: RngCore + CryptoRng>(rng: &mut R) -> Fp {
        loop {
            let candidate = Self::rand(rng);
            if !candidate.is_zero() {
                return candidate;
            }
        }
    }

    /// Samples a uniform element of $\mathbb{F}_p$ (may be zero).
    pub fn rand<R: RngCore + CryptoRng>(rng: &mut R) -> Fp {
        let mut bytes = [0u8; crate::constants::FP_SAMPLE_BYTES];
        rng.fill_bytes(&mut bytes);
        let n = num_bigint::BigUint::from_bytes_le(&bytes);
        biguint::biguint_to_fp(&n)
    }
}

impl Add for Fp {
    type Output = Fp;
    fn add(self, rhs: Fp) -> Fp {
        Fp::add(&self, &rhs)
    }
}

impl Sub for Fp {
    type Output = Fp;
    fn sub(self, rhs: Fp) -> Fp {
        Fp::sub(&self, &rhs)
    }
}

impl Neg for Fp {
    type Output = Fp;
    fn neg(self) -> Fp {
        Fp::neg(&self)
    }
}

impl Mul for Fp {
    type Output = Fp;
    fn mul(self, rhs: Fp) -> Fp {
        Fp::mul(&self, &rhs)
    }
}

impl fmt::Debug for Fp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Fp({})", self.0)
    }
}
