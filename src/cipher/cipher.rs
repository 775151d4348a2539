//! The `Cipher` ciphertext (spec §3): an ordered layer list plus a multiset of edges.

use crate::cipher::edge::Edge;
use crate::cipher::layer::Layer;

/// A ciphertext: `{L: ordered sequence of Layer, E: multiset of Edge}`.
///
/// `Cipher` exclusively owns its `L` and `E` (spec §9); `combine_ciphers` consumes its
/// inputs rather than sharing them.
#[derive(Clone, Debug, Default)]
pub struct Cipher {
    pub layers: Vec<Layer>,
    pub edges: Vec<Edge>,
}

impl Cipher {
    pub fn new(layers: Vec<Layer>, edges: Vec<Edge>) -> Self {
        let cipher = Cipher { layers, edges };
        cipher.debug_check_invariants();
        cipher
    }

    pub fn empty() -> Self {
        Cipher {
            layers: Vec::new(),
            edges: Vec::new(),
        }
    }

    /// Every edge's `layer_id` must index into `self.layers` (spec §3 invariant).
    #[cfg(debug_assertions)]
    pub fn debug_check_invariants(&self) {
        use more_asserts::assert_lt;
        for edge in &self.edges {
            assert_lt!(edge.layer_id as usize, self.layers.len());
        }
    }

    #[cfg(not(debug_assertions))]
    pub fn debug_check_invariants(&self) {}

    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }
}
