//! Predicate/object pairs attached to a subject (spec §3.2, §4.10, §4.11).

use super::{
    digest::{Digest, DigestProvider},
    envelope::Envelope,
};

/// A predicate–object pair. Digest is `H(predicate.digest ∥ object.digest)`
/// (spec §4.10).
#[derive(Clone)]
pub struct Assertion {
    predicate: Envelope,
    object: Envelope,
    digest: Digest,
}

impl Assertion {
    pub fn new(predicate: Envelope, object: Envelope) -> Self {
        let digest = Digest::from_digests([&predicate.digest(), &object.digest()]);
        Self { predicate, object, digest }
    }

    pub fn predicate(&self) -> &Envelope {
        &self.predicate
    }

    pub fn object(&self) -> &Envelope {
        &self.object
    }
}

impl DigestProvider for Assertion {
    fn digest(&self) -> Digest {
        self.digest
    }
}

impl PartialEq for Assertion {
    fn eq(&self, other: &Self) -> bool {
        self.digest == other.digest
    }
}
impl Eq for Assertion {}
