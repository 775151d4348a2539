//! Public-key material exposed to the encryption core (spec §6).

use crate::keys::params::Prm;

/// The public key shape the core reads from: the parameter block plus the fixed,
/// public domain-separation tag fed into `prg_layer_ztag` for every fresh base layer.
#[derive(Clone, Debug)]
pub struct PublicKey {
    prm: Prm,
    /// Public, fixed domain-separation tag (spec §9 Open Questions: "assumed to be a fixed,
    /// public domain-separation tag in the public key").
    canon_tag: Vec<u8>,
}

impl PublicKey {
    pub fn new(prm: Prm, canon_tag: Vec<u8>) -> Self {
        PublicKey { prm, canon_tag }
    }

    /// Builds a public key using the crate's default domain-separation tag.
    pub fn with_default_tag(prm: Prm) -> Self {
        PublicKey {
            prm,
            canon_tag: crate::constants::DEFAULT_CANON_TAG.to_vec(),
        }
    }

    pub fn prm(&self) -> &Prm {
        &self.prm
    }

    pub fn canon_tag(&self) -> &[u8] {
        &self.canon_tag
    }
}
