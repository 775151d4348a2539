//! The `Edge` record (spec §3): a signed, weighted contribution at `(layer, column)`.

use crate::algebra::{BitVec, Fp};
use crate::cipher::layer::LayerId;

/// The sign of an edge's contribution.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[repr(u8)]
pub enum Sign {
    Plus = 0,
    Minus = 1,
}

impl Sign {
    /// `+1` for `Plus`, `-1` for `Minus`, as a field element.
    pub fn as_fp(self) -> Fp {
        match self {
            Sign::Plus => Fp::ONE,
            Sign::Minus => Fp::ONE.neg(),
        }
    }

    /// The opposite sign: used by the Z2 noise group, whose second edge always carries the
    /// flipped sign of its first (spec §4.3).
    pub fn flipped(self) -> Sign {
        match self {
            Sign::Plus => Sign::Minus,
            Sign::Minus => Sign::Plus,
        }
    }
}

/// A signed contribution at a specific `(layer, column)`, carrying a field weight and a
/// bit-vector share.
///
/// The pair `(layer_id, idx, ch)` is the edge's *bucket identity* (spec §3), the key that
/// `compact_edges` coalesces on.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
    pub layer_id: LayerId,
    pub idx: u16,
    pub ch: Sign,
    pub w: Fp,
    pub s: BitVec,
}

impl Edge {
    pub fn new(layer_id: LayerId, idx: u16, ch: Sign, w: Fp, s: BitVec) -> Self {
        Edge {
            layer_id,
            idx,
            ch,
            w,
            s,
        }
    }

    /// The bucket identity `(layer_id, idx, ch)` this edge coalesces under.
    pub fn bucket(&self) -> (LayerId, u16, Sign) {
        (self.layer_id, self.idx, self.ch)
    }
}
