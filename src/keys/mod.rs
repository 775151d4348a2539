pub mod params;
pub mod public_key;
pub mod secret_key;

pub use params::Prm;
pub use public_key::PublicKey;
pub use secret_key::SecretKey;
