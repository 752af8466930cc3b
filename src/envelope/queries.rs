//! Read-only extraction and shape-query API over envelopes (spec §4.11).

use crate::dcbor::CBOR;

use super::{
    assertion::Assertion,
    digest::DigestProvider,
    envelope::{Envelope, EnvelopeCase, EnvelopeEncodable},
    error::{Error, Result},
};

impl Envelope {
    /// `subject(e)` (spec §4.11): `e` itself for non-`Node` cases, the
    /// subject of a `Node` otherwise.
    pub fn subject(&self) -> Envelope {
        match self.case() {
            EnvelopeCase::Node { subject, .. } => subject.clone(),
            _ => self.clone(),
        }
    }

    /// `assertions(e)`: the assertion sequence of a `Node`, empty otherwise.
    pub fn assertions(&self) -> Vec<Envelope> {
        match self.case() {
            EnvelopeCase::Node { assertions, .. } => assertions.clone(),
            _ => Vec::new(),
        }
    }

    pub fn has_assertions(&self) -> bool {
        !self.assertions().is_empty()
    }

    pub fn elements_count(&self) -> usize {
        match self.case() {
            EnvelopeCase::Node { assertions, .. } => 1 + assertions.len(),
            _ => 1,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.case(), EnvelopeCase::Leaf { .. })
    }
    pub fn is_node(&self) -> bool {
        matches!(self.case(), EnvelopeCase::Node { .. })
    }
    pub fn is_wrapped(&self) -> bool {
        matches!(self.case(), EnvelopeCase::Wrapped { .. })
    }
    pub fn is_assertion(&self) -> bool {
        matches!(self.case(), EnvelopeCase::Assertion(_))
    }
    pub fn is_elided(&self) -> bool {
        matches!(self.case(), EnvelopeCase::Elided(_))
    }
    pub fn is_encrypted(&self) -> bool {
        matches!(self.case(), EnvelopeCase::Encrypted { .. })
    }
    pub fn is_compressed(&self) -> bool {
        matches!(self.case(), EnvelopeCase::Compressed { .. })
    }

    /// True if the subject is itself elided/encrypted/compressed.
    pub fn is_subject_obscured(&self) -> bool {
        self.subject().is_obscured()
    }

    pub fn is_internal(&self) -> bool {
        matches!(self.case(), EnvelopeCase::Node { .. } | EnvelopeCase::Wrapped { .. } | EnvelopeCase::Assertion(_))
    }

    /// Returns the leaf's CBOR value, or `NotLeaf`.
    pub fn try_leaf(&self) -> Result<CBOR> {
        match self.case() {
            EnvelopeCase::Leaf { cbor, .. } => Ok(cbor.clone()),
            _ => Err(Error::NotLeaf),
        }
    }

    pub fn as_predicate(&self) -> Result<Envelope> {
        match self.case() {
            EnvelopeCase::Assertion(a) => Ok(a.predicate().clone()),
            _ => Err(Error::NotAssertion),
        }
    }

    pub fn as_object(&self) -> Result<Envelope> {
        match self.case() {
            EnvelopeCase::Assertion(a) => Ok(a.object().clone()),
            _ => Err(Error::NotAssertion),
        }
    }

    pub fn as_assertion(&self) -> Result<Assertion> {
        match self.case() {
            EnvelopeCase::Assertion(a) => Ok(a.clone()),
            _ => Err(Error::NotAssertion),
        }
    }

    /// Extracts the leaf value as `T`.
    pub fn extract_subject<T: TryFrom<CBOR>>(&self) -> Result<T> {
        let cbor = self.subject().try_leaf()?;
        T::try_from(cbor).map_err(|_| Error::InvalidFormat("leaf has unexpected type".to_string()))
    }

    pub fn try_as<T: TryFrom<CBOR>>(&self) -> Result<T> {
        self.extract_subject()
    }

    /// `assertionsWithPredicate(e, pred)` (spec §4.11): filters by predicate
    /// digest.
    pub fn assertions_with_predicate(&self, predicate: impl EnvelopeEncodable) -> Vec<Envelope> {
        let predicate = predicate.into_envelope();
        self.assertions()
            .into_iter()
            .filter(|a| {
                a.as_predicate()
                    .map(|p| p.digest() == predicate.digest())
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Returns the unique assertion with the given predicate, erroring if
    /// zero or multiple match.
    pub fn assertion_with_predicate(&self, predicate: impl EnvelopeEncodable) -> Result<Envelope> {
        let mut matches = self.assertions_with_predicate(predicate);
        match matches.len() {
            0 => Err(Error::NonexistentPredicate),
            1 => Ok(matches.remove(0)),
            _ => Err(Error::AmbiguousPredicate),
        }
    }

    pub fn optional_assertion_with_predicate(
        &self,
        predicate: impl EnvelopeEncodable,
    ) -> Result<Option<Envelope>> {
        let matches = self.assertions_with_predicate(predicate);
        match matches.len() {
            0 => Ok(None),
            1 => Ok(Some(matches[0].clone())),
            _ => Err(Error::AmbiguousPredicate),
        }
    }

    /// `objectForPredicate(e, pred)` (spec §4.11).
    pub fn object_for_predicate(&self, predicate: impl EnvelopeEncodable) -> Result<Envelope> {
        self.assertion_with_predicate(predicate)?.as_object()
    }

    pub fn optional_object_for_predicate(
        &self,
        predicate: impl EnvelopeEncodable,
    ) -> Result<Option<Envelope>> {
        Ok(match self.optional_assertion_with_predicate(predicate)? {
            Some(a) => Some(a.as_object()?),
            None => None,
        })
    }

    pub fn objects_for_predicate(&self, predicate: impl EnvelopeEncodable) -> Vec<Envelope> {
        self.assertions_with_predicate(predicate)
            .into_iter()
            .filter_map(|a| a.as_object().ok())
            .collect()
    }

    pub fn extract_object_for_predicate<T: TryFrom<CBOR>>(
        &self,
        predicate: impl EnvelopeEncodable,
    ) -> Result<T> {
        self.object_for_predicate(predicate)?.extract_subject()
    }

    pub fn extract_objects_for_predicate<T: TryFrom<CBOR>>(
        &self,
        predicate: impl EnvelopeEncodable,
    ) -> Result<Vec<T>> {
        self.objects_for_predicate(predicate)
            .into_iter()
            .map(|o| o.extract_subject())
            .collect()
    }
}
