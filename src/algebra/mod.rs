pub(crate) mod biguint;
pub mod bitvec;
pub mod fp;

pub use bitvec::BitVec;
pub use fp::Fp;
