//! Assertion add/remove/replace operations (spec §4.11).

use super::{
    assertion::Assertion,
    digest::DigestProvider,
    envelope::{Envelope, EnvelopeCase, EnvelopeEncodable},
    error::{Error, Result},
};

impl Envelope {
    /// `addAssertion(e, predicate, object)` (spec §4.11): converts a bare
    /// subject into a one-assertion `Node`, or extends an existing `Node`'s
    /// assertion set (union by digest).
    pub fn add_assertion(
        self,
        predicate: impl EnvelopeEncodable,
        object: impl EnvelopeEncodable,
    ) -> Envelope {
        let assertion = Envelope::new_assertion(predicate, object);
        self.add_assertion_envelope(assertion)
            .expect("constructed assertion is always well-formed")
    }

    /// As [`Self::add_assertion`], but the assertion must already be an
    /// `Assertion`-shaped (or obscured) envelope; returns `NotAssertion` /
    /// `InvalidFormat` otherwise.
    pub fn add_assertion_envelope(self, assertion: impl EnvelopeEncodable) -> Result<Envelope> {
        let assertion = assertion.into_envelope();
        if !assertion.is_subject_assertion() && !assertion.is_obscured() {
            return Err(Error::InvalidFormat(
                "assertion must be an assertion envelope or obscured".to_string(),
            ));
        }
        match self.case() {
            EnvelopeCase::Node { subject, assertions, .. } => {
                if assertions.iter().any(|a| a.digest() == assertion.digest()) {
                    return Ok(self);
                }
                let mut new_assertions = assertions.clone();
                new_assertions.push(assertion);
                Ok(Envelope::new_with_unchecked_assertions(subject.clone(), new_assertions))
            }
            _ => Envelope::new_with_assertions(self, vec![assertion]),
        }
    }

    pub fn add_assertion_envelopes(
        self,
        assertions: impl IntoIterator<Item = Envelope>,
    ) -> Result<Envelope> {
        let mut result = self;
        for a in assertions {
            result = result.add_assertion_envelope(a)?;
        }
        Ok(result)
    }

    /// No-op when `value` is `None`; otherwise behaves like
    /// [`Self::add_assertion`].
    pub fn add_optional_assertion<T: EnvelopeEncodable>(
        self,
        predicate: impl EnvelopeEncodable,
        object: Option<T>,
    ) -> Envelope {
        match object {
            Some(object) => self.add_assertion(predicate, object),
            None => self,
        }
    }

    /// Conditionally adds an assertion only when `condition` is true.
    pub fn add_assertion_if(
        self,
        condition: bool,
        predicate: impl EnvelopeEncodable,
        object: impl EnvelopeEncodable,
    ) -> Envelope {
        if condition {
            self.add_assertion(predicate, object)
        } else {
            self
        }
    }

    /// Removes every assertion whose digest matches `target`'s, collapsing
    /// back to a bare subject if none remain.
    pub fn remove_assertion(self, target: &Envelope) -> Envelope {
        match self.case() {
            EnvelopeCase::Node { subject, assertions, .. } => {
                let remaining: Vec<Envelope> = assertions
                    .iter()
                    .filter(|a| a.digest() != target.digest())
                    .cloned()
                    .collect();
                if remaining.is_empty() {
                    subject.clone()
                } else {
                    Envelope::new_with_unchecked_assertions(subject.clone(), remaining)
                }
            }
            _ => self,
        }
    }

    /// Replaces an assertion with a new one, preserving position otherwise.
    pub fn replace_assertion(self, target: &Envelope, replacement: Envelope) -> Result<Envelope> {
        self.remove_assertion(target).add_assertion_envelope(replacement)
    }

    /// Replaces the subject, keeping the same assertion set.
    pub fn replace_subject(self, subject: impl EnvelopeEncodable) -> Envelope {
        match self.case() {
            EnvelopeCase::Node { assertions, .. } => {
                Envelope::new_with_unchecked_assertions(subject.into_envelope(), assertions.clone())
            }
            _ => subject.into_envelope(),
        }
    }
}

impl Assertion {
    /// Builds an assertion and immediately wraps it as an envelope.
    pub fn new_envelope(predicate: impl EnvelopeEncodable, object: impl EnvelopeEncodable) -> Envelope {
        Envelope::new_assertion(predicate, object)
    }
}
