//! Conversions between `Fp` and `num_bigint::BigUint`.
//!
//! All modular reduction for field elements is mediated by a `BigUint` round-trip rather
//! than bespoke double-width arithmetic.

use crate::algebra::fp::Fp;
use crate::constants::FP_MODULUS_BIGUINT;
use num_bigint::BigUint;
use num_integer::Integer;

/// Returns `FP_MODULUS` as a `BigUint`.
pub(crate) fn field_order() -> &'static BigUint {
    &FP_MODULUS_BIGUINT
}

/// Reduces an arbitrary-width `BigUint` into a canonical `Fp` element.
pub(crate) fn biguint_to_fp(n: &BigUint) -> Fp {
    let reduced = n.mod_floor(field_order());
    let digits = reduced.to_u64_digits();
    let mut limbs = [0u64; 2];
    for (i, d) in digits.iter().take(2).enumerate() {
        limbs[i] = *d;
    }
    Fp::from_raw_unchecked((limbs[1] as u128) << 64 | limbs[0] as u128)
}

/// Lifts a canonical `Fp` element into a `BigUint`.
pub(crate) fn fp_to_biguint(x: &Fp) -> BigUint {
    BigUint::from(x.to_raw())
}
