//! Inclusion proofs (spec §4.13): minimal digest-preserving substructures
//! that prove a set of target digests exists somewhere in an envelope,
//! without revealing anything else.

use std::collections::HashSet;

use super::{
    digest::{Digest, DigestProvider},
    envelope::{Envelope, EnvelopeCase},
};

impl Envelope {
    /// `proofContainsSet(E, T)` (spec §4.13): builds the minimal envelope
    /// that has the same digest as `self`, reveals the ancestor path to
    /// every digest in `target`, and elides the targets themselves. Returns
    /// `None` if some digest in `target` does not correspond to any subtree
    /// of `self`.
    pub fn proof_contains_set(&self, target: &HashSet<Digest>) -> Option<Envelope> {
        let reveal = self.reveal_set_of(target);
        if !target.is_subset(&reveal) {
            return None;
        }
        Some(self.elide_revealing_set(&reveal).elide_removing_set(target))
    }

    /// Single-target convenience over [`Self::proof_contains_set`].
    pub fn proof_contains_target(&self, target: &dyn DigestProvider) -> Option<Envelope> {
        self.proof_contains_set(&HashSet::from([target.digest()]))
    }

    /// `confirmContainsSet(E, T, P)` (spec §4.13): true iff `proof` has the
    /// same digest as `self` and every digest in `target` is reachable
    /// somewhere within `proof`.
    pub fn confirm_contains_set(&self, target: &HashSet<Digest>, proof: &Envelope) -> bool {
        self.digest() == proof.digest() && proof.contains_all(target)
    }

    /// Single-target convenience over [`Self::confirm_contains_set`].
    pub fn confirm_contains_target(&self, target: &dyn DigestProvider, proof: &Envelope) -> bool {
        self.confirm_contains_set(&HashSet::from([target.digest()]), proof)
    }

    /// Collects, for every digest in `target` found anywhere in `self`, the
    /// full ancestor path (root through the matching subtree) into one set.
    fn reveal_set_of(&self, target: &HashSet<Digest>) -> HashSet<Digest> {
        let mut result = HashSet::new();
        self.collect_reveal_path(target, &HashSet::new(), &mut result);
        result
    }

    fn collect_reveal_path(
        &self,
        target: &HashSet<Digest>,
        ancestors: &HashSet<Digest>,
        result: &mut HashSet<Digest>,
    ) {
        let mut ancestors = ancestors.clone();
        ancestors.insert(self.digest());

        if target.contains(&self.digest()) {
            result.extend(ancestors.iter().copied());
        }

        match self.case() {
            EnvelopeCase::Node { subject, assertions, .. } => {
                subject.collect_reveal_path(target, &ancestors, result);
                for assertion in assertions {
                    assertion.collect_reveal_path(target, &ancestors, result);
                }
            }
            EnvelopeCase::Wrapped { envelope, .. } => {
                envelope.collect_reveal_path(target, &ancestors, result);
            }
            EnvelopeCase::Assertion(assertion) => {
                assertion.predicate().collect_reveal_path(target, &ancestors, result);
                assertion.object().collect_reveal_path(target, &ancestors, result);
            }
            _ => {}
        }
    }

    /// True iff every digest in `target` is the digest of some subtree
    /// reachable within `self`.
    fn contains_all(&self, target: &HashSet<Digest>) -> bool {
        let mut remaining = target.clone();
        self.remove_found(&mut remaining);
        remaining.is_empty()
    }

    fn remove_found(&self, remaining: &mut HashSet<Digest>) {
        remaining.remove(&self.digest());
        if remaining.is_empty() {
            return;
        }
        match self.case() {
            EnvelopeCase::Node { subject, assertions, .. } => {
                subject.remove_found(remaining);
                for assertion in assertions {
                    assertion.remove_found(remaining);
                }
            }
            EnvelopeCase::Wrapped { envelope, .. } => {
                envelope.remove_found(remaining);
            }
            EnvelopeCase::Assertion(assertion) => {
                assertion.predicate().remove_found(remaining);
                assertion.object().remove_found(remaining);
            }
            _ => {}
        }
    }
}
