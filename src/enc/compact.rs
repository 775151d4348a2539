//! The two structural compaction passes (spec §4.4-§4.5) plus the budget guard that
//! triggers edge compaction (spec §4.7).

use crate::algebra::{BitVec, Fp};
use crate::cipher::{Cipher, Edge, Layer, LayerId, Sign};
use crate::keys::PublicKey;
use std::collections::HashMap;
use subtle::Choice;

/// `compact_edges(pk, C)`: coalesces all edges that share `(layer_id, idx, ch)` by
/// field-adding their weights and XOR-merging their bit-vector shares, dropping any bucket
/// whose combined weight is zero *and* whose bit-vector is all-zero.
///
/// Emission order is canonical and stable regardless of input order (spec §4.4): layers in
/// ascending order, then columns, with the `P` sub-bucket before `M` at each column.
pub fn compact_edges(pk: &PublicKey, c: &mut Cipher) {
    let m_bits = pk.prm().m_bits();
    let mut buckets: HashMap<(LayerId, u16, Sign), (Fp, BitVec)> = HashMap::new();

    for edge in c.edges.drain(..) {
        let entry = buckets
            .entry(edge.bucket())
            .or_insert_with(|| (Fp::ZERO, BitVec::zero(m_bits)));
        entry.0 = entry.0.add(&edge.w);
        entry.1.xor_with(&edge.s);
    }

    let num_layers = c.layers.len() as u32;
    let mut compacted = Vec::with_capacity(buckets.len());
    for layer_id in 0..num_layers {
        for idx in 0..pk.prm().b() as u16 {
            for sign in [Sign::Plus, Sign::Minus] {
                if let Some((w, s)) = buckets.remove(&(layer_id, idx, sign)) {
                    if bucket_is_nonempty(&w, &s).into() {
                        compacted.push(Edge::new(layer_id, idx, sign, w, s));
                    }
                }
            }
        }
    }

    tracing::trace!(
        edges_in = compacted.len(),
        layers = num_layers,
        "compact_edges"
    );

    c.edges = compacted;
}

/// Constant-time "keep this bucket" predicate (spec §7: the one branch that must not leak
/// via timing). A bucket survives if its weight is nonzero *or* its bit-vector has any bit
/// set; both conditions route through constant-time primitives before being OR'd.
fn bucket_is_nonempty(w: &Fp, s: &BitVec) -> Choice {
    let weight_nonzero = w.ct_is_nonzero();
    let bits_nonzero = Choice::from((s.popcnt() != 0) as u8);
    weight_nonzero | bits_nonzero
}

/// `compact_layers(C)`: removes layers not transitively needed by any edge, then
/// renumbers the survivors (spec §4.5).
pub fn compact_layers(c: &mut Cipher) {
    let n = c.layers.len();
    let mut used = vec![false; n];

    for edge in &c.edges {
        used[edge.layer_id as usize] = true;
    }

    // Fixed-point closure: a used PROD layer's parents are used too.
    loop {
        let mut changed = false;
        for (i, layer) in c.layers.iter().enumerate() {
            if !used[i] {
                continue;
            }
            if let Some((pa, pb)) = layer.parents() {
                for p in [pa, pb] {
                    if !used[p as usize] {
                        used[p as usize] = true;
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    if used.iter().all(|&u| u) {
        return;
    }

    let mut remap = vec![0u32; n];
    let mut next_id = 0u32;
    for (i, &is_used) in used.iter().enumerate() {
        if is_used {
            remap[i] = next_id;
            next_id += 1;
        }
    }

    let new_layers: Vec<Layer> = c
        .layers
        .iter()
        .enumerate()
        .filter(|(i, _)| used[*i])
        .map(|(_, layer)| match layer {
            Layer::Base { seed } => Layer::Base { seed: *seed },
            Layer::Prod { pa, pb, seed } => Layer::Prod {
                pa: remap[*pa as usize],
                pb: remap[*pb as usize],
                seed: *seed,
            },
        })
        .collect();

    for edge in c.edges.iter_mut() {
        edge.layer_id = remap[edge.layer_id as usize];
    }

    tracing::trace!(
        dropped = n - new_layers.len(),
        surviving = new_layers.len(),
        "compact_layers"
    );

    c.layers = new_layers;
}

/// `guard_budget(pk, C, site_tag)`: runs `compact_edges` if `|C.E| > edge_budget`,
/// otherwise is a no-op. `site_tag` is purely diagnostic (spec §4.7, §7: "the only
/// user-visible diagnostic channel").
pub fn guard_budget(pk: &PublicKey, c: &mut Cipher, site_tag: &str) {
    let over_budget = c.edges.len() > pk.prm().edge_budget();
    tracing::debug!(
        site_tag,
        edges = c.edges.len(),
        budget = pk.prm().edge_budget(),
        compacting = over_budget,
        "guard_budget"
    );
    if over_budget {
        compact_edges(pk, c);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::keys::params::test_support::small_prm;
    use crate::prf::{Nonce128, RSeed};

    fn seed(n: u64) -> RSeed {
        RSeed {
            nonce: Nonce128 { lo: n, hi: n },
            ztag: n,
        }
    }

    #[test]
    fn compact_edges_merges_cancelling_pair() {
        let pk = PublicKey::with_default_tag(small_prm(8, 64));
        let w = Fp::from_u64(7);
        let bits = BitVec::from_words(pk.prm().m_bits(), vec![0xABCD]);

        let mut cipher = Cipher::new(
            vec![Layer::Base { seed: seed(1) }],
            vec![
                Edge::new(0, 5, Sign::Plus, w, bits.clone()),
                Edge::new(0, 5, Sign::Plus, w.neg(), bits),
            ],
        );

        compact_edges(&pk, &mut cipher);
        assert!(cipher.edges.is_empty());
    }

    #[test]
    fn compact_edges_is_idempotent() {
        let pk = PublicKey::with_default_tag(small_prm(16, 128));
        let mut cipher = Cipher::new(
            vec![Layer::Base { seed: seed(1) }],
            vec![
                Edge::new(0, 1, Sign::Plus, Fp::from_u64(3), BitVec::zero(pk.prm().m_bits())),
                Edge::new(0, 1, Sign::Plus, Fp::from_u64(4), BitVec::zero(pk.prm().m_bits())),
                Edge::new(0, 2, Sign::Minus, Fp::from_u64(9), BitVec::zero(pk.prm().m_bits())),
            ],
        );

        compact_edges(&pk, &mut cipher);
        let once = cipher.edges.clone();
        compact_edges(&pk, &mut cipher);
        assert_eq!(once, cipher.edges);
    }

    #[test]
    fn compact_edges_emission_is_canonically_ordered() {
        let pk = PublicKey::with_default_tag(small_prm(8, 64));
        let m = pk.prm().m_bits();
        let mut cipher = Cipher::new(
            vec![Layer::Base { seed: seed(1) }],
            vec![
                Edge::new(0, 3, Sign::Minus, Fp::from_u64(1), BitVec::zero(m)),
                Edge::new(0, 1, Sign::Plus, Fp::from_u64(1), BitVec::zero(m)),
                Edge::new(0, 1, Sign::Minus, Fp::from_u64(1), BitVec::zero(m)),
            ],
        );
        compact_edges(&pk, &mut cipher);

        let keys: Vec<_> = cipher.edges.iter().map(|e| (e.layer_id, e.idx, e.ch)).collect();
        let mut sorted = keys.clone();
        sorted.sort_by_key(|(l, i, s)| (*l, *i, matches!(s, Sign::Minus)));
        assert_eq!(keys, sorted);
    }

    #[test]
    fn compact_layers_drops_all_when_no_edges_reference_them() {
        let mut cipher = Cipher {
            layers: vec![
                Layer::Base { seed: seed(1) },
                Layer::Prod {
                    pa: 0,
                    pb: 0,
                    seed: seed(2),
                },
                Layer::Base { seed: seed(3) },
            ],
            edges: vec![],
        };
        compact_layers(&mut cipher);
        assert!(cipher.layers.is_empty());
    }

    #[test]
    fn compact_layers_keeps_transitive_parents() {
        let m = 8;
        let mut cipher = Cipher {
            layers: vec![
                Layer::Base { seed: seed(1) },
                Layer::Base { seed: seed(2) },
                Layer::Prod {
                    pa: 0,
                    pb: 1,
                    seed: seed(3),
                },
            ],
            edges: vec![Edge::new(2, 0, Sign::Plus, Fp::ONE, BitVec::zero(m))],
        };
        compact_layers(&mut cipher);
        assert_eq!(cipher.layers.len(), 3);
    }

    #[test]
    fn guard_budget_compacts_only_when_over_budget() {
        let pk = PublicKey::with_default_tag(small_prm(8, 2));
        let m = pk.prm().m_bits();
        let mut cipher = Cipher::new(
            vec![Layer::Base { seed: seed(1) }],
            vec![
                Edge::new(0, 0, Sign::Plus, Fp::from_u64(1), BitVec::zero(m)),
                Edge::new(0, 0, Sign::Plus, Fp::from_u64(2), BitVec::zero(m)),
                Edge::new(0, 1, Sign::Plus, Fp::from_u64(3), BitVec::zero(m)),
            ],
        );
        guard_budget(&pk, &mut cipher, "test");
        assert!(cipher.edges.len() <= pk.prm().edge_budget());
    }
}
