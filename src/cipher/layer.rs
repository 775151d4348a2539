//! The `Layer` DAG node (spec §3): either a leaf (`BASE`) or a multiplicative combination
//! of two earlier layers (`PROD`).

use crate::prf::RSeed;

/// An index into a `Cipher`'s layer list.
pub type LayerId = u32;

/// A node in the ciphertext's layer DAG.
///
/// Per the Design Notes (§9), this is a tagged sum type rather than a class hierarchy: the
/// core only ever emits `BASE` layers, but must preserve `PROD` layers created upstream by
/// homomorphic multiplication when combining ciphertexts.
#[derive(Clone, Debug, PartialEq)]
pub enum Layer {
    /// A leaf layer, seeded by a fresh nonce/z-tag pair.
    Base { seed: RSeed },
    /// A multiplicative layer referring to two parent layers by index. By construction,
    /// `pa` and `pb` must reference layers earlier than or equal to this layer's own index
    /// (a DAG invariant; spec §3, §9: "cyclic or self-referential structures do not arise").
    Prod {
        pa: LayerId,
        pb: LayerId,
        seed: RSeed,
    },
}

impl Layer {
    pub fn is_base(&self) -> bool {
        matches!(self, Layer::Base { .. })
    }

    /// Returns the parent layer ids of a `Prod` layer, or `None` for a `Base` layer.
    pub fn parents(&self) -> Option<(LayerId, LayerId)> {
        match self {
            Layer::Base { .. } => None,
            Layer::Prod { pa, pb, .. } => Some((*pa, *pb)),
        }
    }
}
