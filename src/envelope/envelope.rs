//! The envelope value model (spec §3.2) and its core constructors.

use std::collections::HashSet;

#[cfg(not(feature = "multithreaded"))]
use std::rc::Rc as RefCounted;
#[cfg(feature = "multithreaded")]
use std::sync::Arc as RefCounted;

use crate::dcbor::CBOR;

use super::{
    assertion::Assertion,
    digest::{Digest, DigestProvider},
    error::{Error, Result},
};

/// A Gordian Envelope: a recursive, content-addressed structure built on top
/// of dCBOR (spec §3.2).
///
/// `Envelope` wraps an [`EnvelopeCase`] in a reference-counted pointer so
/// that "mutating" operations — which always return a new envelope sharing
/// unchanged children — are cheap (spec §5's persistent-tree resource
/// model).
#[derive(Clone)]
pub struct Envelope(RefCounted<EnvelopeCase>);

/// The sealed set of envelope shapes (spec §3.2). `Encrypted`/`Compressed`
/// are opaque passthrough containers only: the core never encrypts,
/// decrypts, compresses, or decompresses anything (spec §6.2, §6.4).
pub enum EnvelopeCase {
    Node { subject: Envelope, assertions: Vec<Envelope>, digest: Digest },
    Leaf { cbor: CBOR, digest: Digest },
    Wrapped { envelope: Envelope, digest: Digest },
    Assertion(Assertion),
    Elided(Digest),
    Encrypted { payload: CBOR, digest: Digest },
    Compressed { payload: CBOR, digest: Digest },
}

impl Envelope {
    pub fn case(&self) -> &EnvelopeCase {
        &self.0
    }

    fn from_case(case: EnvelopeCase) -> Self {
        Self(RefCounted::new(case))
    }

    /// Wraps a CBOR value as a leaf envelope (spec §4.11 `leaf`).
    pub fn new_leaf(cbor: impl Into<CBOR>) -> Self {
        let cbor = cbor.into();
        let tagged = CBOR::to_tagged_value(crate::dcbor::known_tags::ENCODED_CBOR, cbor.clone());
        let digest = Digest::from_image(tagged.to_cbor_data());
        Self::from_case(EnvelopeCase::Leaf { cbor, digest })
    }

    /// Wraps an envelope, making it the subject of a new `Wrapped` envelope
    /// (spec §4.11 `wrap`).
    pub fn new_wrapped(envelope: Envelope) -> Self {
        let digest = Digest::from_digests([&envelope.digest()]);
        Self::from_case(EnvelopeCase::Wrapped { envelope, digest })
    }

    /// `Elided(d).digest == d` is the identity that lets a subtree be
    /// replaced by its digest without disturbing ancestors' digests (spec
    /// §4.10).
    pub(crate) fn from_elided(digest: Digest) -> Self {
        Self::from_case(EnvelopeCase::Elided(digest))
    }

    /// Opaque encrypted-blob passthrough (spec §3.2, §6.4). `digest` is the
    /// digest of the plaintext this blob encrypts, carried alongside the
    /// blob so ancestor digests stay intact across obscuring.
    pub(crate) fn from_encrypted(payload: CBOR, digest: Digest) -> Self {
        Self::from_case(EnvelopeCase::Encrypted { payload, digest })
    }

    /// Opaque compressed-blob passthrough (spec §3.2, §6.4).
    pub(crate) fn from_compressed(payload: CBOR, digest: Digest) -> Self {
        Self::from_case(EnvelopeCase::Compressed { payload, digest })
    }

    /// Builds a bare assertion envelope (spec §4.11 `assertion`).
    pub fn new_assertion(predicate: impl EnvelopeEncodable, object: impl EnvelopeEncodable) -> Self {
        let assertion = Assertion::new(predicate.into_envelope(), object.into_envelope());
        Self::from_case(EnvelopeCase::Assertion(assertion))
    }

    pub(crate) fn new_assertion_envelope(assertion: Assertion) -> Self {
        Self::from_case(EnvelopeCase::Assertion(assertion))
    }

    /// Builds a `Node` from a subject and an unsorted, possibly-duplicated
    /// assertion list, sorting by digest and deduplicating before hashing
    /// (spec §4.10: "Duplicate assertion digests are deduplicated before
    /// concatenation").
    pub(crate) fn new_with_unchecked_assertions(
        subject: Envelope,
        mut assertions: Vec<Envelope>,
    ) -> Self {
        assertions.sort_by_key(|a| a.digest());
        assertions.dedup_by_key(|a| a.digest());
        let mut seen = HashSet::new();
        let digests: Vec<Digest> = assertions
            .iter()
            .map(|a| a.digest())
            .filter(|d| seen.insert(*d))
            .collect();
        let subject_digest = subject.digest();
        let mut all = vec![subject_digest];
        all.extend(digests);
        let digest = Digest::from_digests(all.iter());
        Self::from_case(EnvelopeCase::Node { subject, assertions, digest })
    }

    /// As [`Self::new_with_unchecked_assertions`], but validates that every
    /// assertion is well-formed (spec §4.11 `addAssertion`'s shape check).
    pub(crate) fn new_with_assertions(
        subject: Envelope,
        assertions: Vec<Envelope>,
    ) -> Result<Self> {
        for a in &assertions {
            if !a.is_subject_assertion() && !a.is_obscured() {
                return Err(Error::InvalidFormat(
                    "assertion envelope must itself be an assertion or obscured".to_string(),
                ));
            }
        }
        Ok(Self::new_with_unchecked_assertions(subject, assertions))
    }

    pub(crate) fn new_obscured(case: EnvelopeCase) -> Self {
        Self::from_case(case)
    }

    /// Constructs any envelope from a value implementing [`EnvelopeEncodable`].
    pub fn new(value: impl EnvelopeEncodable) -> Self {
        value.into_envelope()
    }

    pub(crate) fn is_subject_assertion(&self) -> bool {
        matches!(self.case(), EnvelopeCase::Assertion(_))
    }

    pub fn is_obscured(&self) -> bool {
        matches!(
            self.case(),
            EnvelopeCase::Elided(_) | EnvelopeCase::Encrypted { .. } | EnvelopeCase::Compressed { .. }
        )
    }
}

impl DigestProvider for Envelope {
    fn digest(&self) -> Digest {
        match self.case() {
            EnvelopeCase::Node { digest, .. }
            | EnvelopeCase::Leaf { digest, .. }
            | EnvelopeCase::Wrapped { digest, .. }
            | EnvelopeCase::Encrypted { digest, .. }
            | EnvelopeCase::Compressed { digest, .. } => *digest,
            EnvelopeCase::Assertion(a) => a.digest(),
            EnvelopeCase::Elided(d) => *d,
        }
    }
}

/// Two envelopes are *equivalent* iff their digests are equal (spec §3.2's
/// "Invariants"), distinct from the stricter structural equality the digest
/// module defines.
impl Envelope {
    pub fn is_equivalent_to(&self, other: &Envelope) -> bool {
        self.digest() == other.digest()
    }
}

/// Types that can be turned into an envelope leaf or envelope structure.
pub trait EnvelopeEncodable {
    fn into_envelope(self) -> Envelope;
    fn to_envelope(&self) -> Envelope
    where
        Self: Clone,
    {
        self.clone().into_envelope()
    }
}

impl EnvelopeEncodable for Envelope {
    fn into_envelope(self) -> Envelope {
        self
    }
}

impl EnvelopeEncodable for Assertion {
    fn into_envelope(self) -> Envelope {
        Envelope::new_assertion_envelope(self)
    }
}

impl EnvelopeEncodable for CBOR {
    fn into_envelope(self) -> Envelope {
        Envelope::new_leaf(self)
    }
}

macro_rules! impl_envelope_encodable {
    ($t:ty) => {
        impl EnvelopeEncodable for $t {
            fn into_envelope(self) -> Envelope {
                Envelope::new_leaf(CBOR::from(self))
            }
        }
    };
}

impl_envelope_encodable!(String);
impl_envelope_encodable!(&str);
impl_envelope_encodable!(bool);
impl_envelope_encodable!(u8);
impl_envelope_encodable!(u16);
impl_envelope_encodable!(u32);
impl_envelope_encodable!(u64);
impl_envelope_encodable!(usize);
impl_envelope_encodable!(i8);
impl_envelope_encodable!(i16);
impl_envelope_encodable!(i32);
impl_envelope_encodable!(i64);
impl_envelope_encodable!(f32);
impl_envelope_encodable!(f64);
impl_envelope_encodable!(crate::dcbor::ByteString);
impl_envelope_encodable!(crate::dcbor::Date);
impl_envelope_encodable!(Digest);

impl EnvelopeEncodable for &Envelope {
    fn into_envelope(self) -> Envelope {
        self.clone()
    }
}
