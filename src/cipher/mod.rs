pub mod cipher;
pub mod edge;
pub mod layer;

pub use cipher::Cipher;
pub use edge::{Edge, Sign};
pub use layer::{Layer, LayerId};
