//! Ciphertext combination (spec §4.6): the disjoint union two ciphertexts' layer/edge sets
//! are merged into, relocating `b`'s layer ids past `a`'s.

use crate::cipher::{Cipher, Layer};
use crate::enc::compact::{compact_layers, guard_budget};
use crate::keys::PublicKey;

/// `combine_ciphers(pk, a, b) -> Cipher`.
///
/// Appends `b`'s layers after `a`'s (relocating every `Prod` parent reference by the
/// offset), appends `b`'s edges with their `layer_id` shifted by the same offset, then runs
/// the budget guard followed by layer compaction (spec §4.6).
pub fn combine_ciphers(pk: &PublicKey, a: Cipher, b: Cipher) -> Cipher {
    let offset = a.layers.len() as u32;

    let mut layers = a.layers;
    layers.extend(b.layers.into_iter().map(|layer| match layer {
        Layer::Base { seed } => Layer::Base { seed },
        Layer::Prod { pa, pb, seed } => Layer::Prod {
            pa: pa + offset,
            pb: pb + offset,
            seed,
        },
    }));

    let mut edges = a.edges;
    edges.extend(b.edges.into_iter().map(|mut edge| {
        edge.layer_id += offset;
        edge
    }));

    let mut combined = Cipher::new(layers, edges);
    guard_budget(pk, &mut combined, "combine_ciphers");
    compact_layers(&mut combined);
    combined
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::algebra::{BitVec, Fp};
    use crate::cipher::{Edge, Sign};
    use crate::keys::params::test_support::small_prm;
    use crate::prf::{Nonce128, RSeed};

    fn seed(n: u64) -> RSeed {
        RSeed {
            nonce: Nonce128 { lo: n, hi: n },
            ztag: n,
        }
    }

    fn one_edge_cipher(layer_id: u32, idx: u16) -> Cipher {
        let layers: Vec<Layer> = (0..=layer_id)
            .map(|i| Layer::Base { seed: seed(i as u64 + 1) })
            .collect();
        Cipher::new(
            layers,
            vec![Edge::new(
                layer_id,
                idx,
                Sign::Plus,
                Fp::from_u64(1),
                BitVec::zero(8),
            )],
        )
    }

    #[test]
    fn combine_is_disjoint_union_of_layers_and_edges() {
        let pk = PublicKey::with_default_tag(small_prm(8, 4096));
        let a = one_edge_cipher(0, 0);
        let b = one_edge_cipher(0, 1);

        let combined = combine_ciphers(&pk, a, b);
        assert_eq!(combined.num_layers(), 2);
        assert_eq!(combined.num_edges(), 2);

        let layer_ids: std::collections::HashSet<_> =
            combined.edges.iter().map(|e| e.layer_id).collect();
        assert_eq!(layer_ids.len(), 2);
    }

    #[test]
    fn combine_with_empty_is_identity_up_to_compaction() {
        let pk = PublicKey::with_default_tag(small_prm(8, 4096));
        let a = one_edge_cipher(0, 0);
        let a_edges_before = a.num_edges();
        let a_layers_before = a.num_layers();

        let combined = combine_ciphers(&pk, a, Cipher::empty());
        assert_eq!(combined.num_edges(), a_edges_before);
        assert_eq!(combined.num_layers(), a_layers_before);
    }

    #[test]
    fn combine_relocates_prod_parent_references() {
        let pk = PublicKey::with_default_tag(small_prm(8, 4096));
        let a = one_edge_cipher(0, 0);

        let b = Cipher::new(
            vec![
                Layer::Base { seed: seed(10) },
                Layer::Base { seed: seed(11) },
                Layer::Prod {
                    pa: 0,
                    pb: 1,
                    seed: seed(12),
                },
            ],
            vec![Edge::new(2, 2, Sign::Plus, Fp::ONE, BitVec::zero(8))],
        );

        let combined = combine_ciphers(&pk, a, b);
        // a contributed 1 layer (offset = 1); b's Prod should now point at (1, 2).
        let relocated_prod = combined
            .layers
            .iter()
            .find_map(|l| l.parents())
            .expect("prod layer survives compaction since its edge references it");
        assert_eq!(relocated_prod, (1, 2));
    }
}
