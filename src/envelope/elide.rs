//! Structural elision (spec §4.12): replacing any subtree with its digest
//! while preserving every ancestor's digest.

use std::collections::HashSet;

use super::{
    digest::{Digest, DigestProvider},
    envelope::{Envelope, EnvelopeCase},
    error::{Error, Result},
};

/// What to do with an envelope element targeted by an elision pass. Only
/// `Elide` itself is implemented here — encryption and compression are
/// peripheral extensions that wrap an already-elided digest in their own
/// opaque blob (spec §6.4) and are out of scope for the core.
pub enum ObscureAction {
    Elide,
}

impl Envelope {
    /// `elide(e)` (spec §4.11/§4.12): replaces `self` with `Elided(self.digest())`.
    /// Returns `self` unchanged if it is already elided.
    pub fn elide(&self) -> Envelope {
        match self.case() {
            EnvelopeCase::Elided(_) => self.clone(),
            _ => Envelope::new_elided(self.digest()),
        }
    }

    /// `elideRemoving(e, target)` (spec §4.12): replaces every subtree whose
    /// digest is in `target` with `Elided`, recursing into the rest.
    pub fn elide_removing_set(&self, target: &HashSet<Digest>) -> Envelope {
        self.elide_set(target, false)
    }

    /// Convenience over [`Self::elide_removing_set`] for a single target.
    pub fn elide_removing_target(&self, target: &dyn DigestProvider) -> Envelope {
        self.elide_removing_set(&HashSet::from([target.digest()]))
    }

    /// `elideRevealing(e, reveal)` (spec §4.12): the dual of
    /// [`Self::elide_removing_set`] — a subtree survives intact iff its
    /// digest, or any descendant's digest, is in `reveal`. The root is always
    /// revealed, whether or not its digest is explicitly in `reveal`.
    pub fn elide_revealing_set(&self, reveal: &HashSet<Digest>) -> Envelope {
        let mut reveal = reveal.clone();
        reveal.insert(self.digest());
        self.elide_set(&reveal, true)
    }

    /// Convenience over [`Self::elide_revealing_set`] for a single target.
    pub fn elide_revealing_target(&self, target: &dyn DigestProvider) -> Envelope {
        self.elide_revealing_set(&HashSet::from([target.digest()]))
    }

    /// The shared implementation behind the four `elide_*` entry points:
    /// a matching element is elided when `is_revealing` is false, kept when
    /// `is_revealing` is true — see the truth table in spec §4.12.
    ///
    /// For removing, a subtree is kept iff its own digest is absent from
    /// `target`. For revealing, a subtree is kept iff its own digest *or any
    /// descendant's digest* is in `target` (spec §4.12) — so revealing can't
    /// just check `self.digest()`, it has to look ahead into the subtree.
    fn elide_set(&self, target: &HashSet<Digest>, is_revealing: bool) -> Envelope {
        let keep = if is_revealing {
            self.subtree_intersects(target)
        } else {
            !target.contains(&self.digest())
        };
        if !keep {
            return self.elide();
        }
        match self.case() {
            EnvelopeCase::Assertion(assertion) => {
                let predicate = assertion.predicate().elide_set(target, is_revealing);
                let object = assertion.object().elide_set(target, is_revealing);
                Envelope::new_assertion(predicate, object)
            }
            EnvelopeCase::Node { subject, assertions, .. } => {
                let subject = subject.elide_set(target, is_revealing);
                let assertions = assertions
                    .iter()
                    .map(|a| a.elide_set(target, is_revealing))
                    .collect();
                Envelope::new_with_unchecked_assertions(subject, assertions)
            }
            EnvelopeCase::Wrapped { envelope, .. } => {
                Envelope::new_wrapped(envelope.elide_set(target, is_revealing))
            }
            _ => self.clone(),
        }
    }

    /// True iff `self`'s own digest, or the digest of some envelope reachable
    /// beneath it, is in `target`. Used by revealing elision, where a
    /// subtree must be kept (not collapsed to `Elided`) whenever any
    /// descendant still needs to be reachable.
    fn subtree_intersects(&self, target: &HashSet<Digest>) -> bool {
        if target.contains(&self.digest()) {
            return true;
        }
        match self.case() {
            EnvelopeCase::Node { subject, assertions, .. } => {
                subject.subtree_intersects(target)
                    || assertions.iter().any(|a| a.subtree_intersects(target))
            }
            EnvelopeCase::Wrapped { envelope, .. } => envelope.subtree_intersects(target),
            EnvelopeCase::Assertion(assertion) => {
                assertion.predicate().subtree_intersects(target)
                    || assertion.object().subtree_intersects(target)
            }
            _ => false,
        }
    }

    /// `unelide(e, source)` (spec §4.12): traverses `self` and `source` in
    /// lockstep, replacing every `Elided(d)` in `self` with the matching
    /// subtree from `source`. Fails with `InvalidDigest` if the digests
    /// diverge anywhere.
    pub fn unelide(&self, source: &Envelope) -> Result<Envelope> {
        if self.digest() != source.digest() {
            return Err(Error::InvalidDigest);
        }
        match self.case() {
            EnvelopeCase::Elided(_) => Ok(source.clone()),
            EnvelopeCase::Assertion(assertion) => {
                let EnvelopeCase::Assertion(source_assertion) = source.case() else {
                    return Ok(source.clone());
                };
                let predicate = assertion.predicate().unelide(&source_assertion.predicate())?;
                let object = assertion.object().unelide(&source_assertion.object())?;
                Ok(Envelope::new_assertion(predicate, object))
            }
            EnvelopeCase::Node { subject, assertions, .. } => {
                let EnvelopeCase::Node { subject: source_subject, assertions: source_assertions, .. } =
                    source.case()
                else {
                    return Ok(source.clone());
                };
                let subject = subject.unelide(source_subject)?;
                let assertions = assertions
                    .iter()
                    .map(|a| {
                        let matching = source_assertions
                            .iter()
                            .find(|s| s.digest() == a.digest())
                            .unwrap_or(a);
                        a.unelide(matching)
                    })
                    .collect::<Result<Vec<_>>>()?;
                Ok(Envelope::new_with_unchecked_assertions(subject, assertions))
            }
            EnvelopeCase::Wrapped { envelope, .. } => {
                let EnvelopeCase::Wrapped { envelope: source_envelope, .. } = source.case() else {
                    return Ok(source.clone());
                };
                Ok(Envelope::new_wrapped(envelope.unelide(source_envelope)?))
            }
            _ => Ok(self.clone()),
        }
    }

    /// `walkUnelide(e, sources)` (spec §4.12): like [`Self::unelide`], but
    /// each `Elided` subtree is replaced by the first of `sources` whose
    /// digest matches.
    pub fn walk_unelide<'a>(
        &self,
        sources: impl IntoIterator<Item = &'a Envelope> + Clone,
    ) -> Result<Envelope> {
        match self.case() {
            EnvelopeCase::Elided(d) => sources
                .into_iter()
                .find(|s| s.digest() == *d)
                .cloned()
                .ok_or(Error::MissingDigest),
            EnvelopeCase::Assertion(assertion) => {
                let predicate = assertion.predicate().walk_unelide(sources.clone())?;
                let object = assertion.object().walk_unelide(sources)?;
                Ok(Envelope::new_assertion(predicate, object))
            }
            EnvelopeCase::Node { subject, assertions, .. } => {
                let subject = subject.walk_unelide(sources.clone())?;
                let assertions = assertions
                    .iter()
                    .map(|a| a.walk_unelide(sources.clone()))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Envelope::new_with_unchecked_assertions(subject, assertions))
            }
            EnvelopeCase::Wrapped { envelope, .. } => {
                Ok(Envelope::new_wrapped(envelope.walk_unelide(sources)?))
            }
            _ => Ok(self.clone()),
        }
    }
}
