pub use constants::{DEFAULT_CANON_TAG, FP_NUM_BYTES, NONCE128_NUM_BYTES};

pub mod algebra;
pub mod cipher;
pub mod constants;
pub mod enc;
pub mod keys;
pub mod prf;
pub mod utils;
