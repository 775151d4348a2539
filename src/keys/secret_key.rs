//! Secret-key material exposed to the encryption core (spec §6).

use std::fmt;

/// An opaque 256-bit PRF key. The core never inspects its bytes directly: it only ever
/// passes `&SecretKey` into the `prf` module's collaborator functions.
///
/// `Debug` is hand-redacted and `Clone` is not derived by default, so secret material
/// never leaks into a log line or an accidental copy; `assert-private-keys-not-cloneable`
/// makes the latter a compile-time guarantee.
pub struct SecretKey {
    key: [u8; 32],
}

#[cfg(feature = "assert-private-keys-not-cloneable")]
static_assertions::assert_not_impl_any!(SecretKey: Clone);

impl SecretKey {
    pub fn new(key: [u8; 32]) -> Self {
        SecretKey { key }
    }

    pub fn generate<R: rand_core::RngCore + rand_core::CryptoRng>(rng: &mut R) -> Self {
        let mut key = [0u8; 32];
        rng.fill_bytes(&mut key);
        SecretKey { key }
    }

    pub(crate) fn bytes(&self) -> &[u8; 32] {
        &self.key
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SecretKey(..)")
    }
}
