//! The envelope-to-CBOR mapping (spec §6.2): every envelope is tag 200
//! wrapping a case-specific tagged payload. Each nested envelope is encoded
//! as its own complete, self-describing tag-200 item — never as a bare,
//! untagged fragment — so that an assertion's one-entry map can always be
//! reconstructed unambiguously (spec §9, the "CborMap parsing issue with
//! complex assertions" note: this is the fix that note calls for).

use crate::dcbor::{CBOR, CBORCase, Error as CborError, Map, known_tags};

use super::{
    assertion::Assertion,
    digest::{Digest, DigestProvider},
    envelope::{Envelope, EnvelopeCase},
    error::{Error, Result},
};

impl Envelope {
    /// Opaque pass-through constructor for an encrypted-blob envelope (spec
    /// §3.2's extension case, §6.4). The core never encrypts or decrypts;
    /// it only carries the blob so that ancestor digests stay intact.
    pub fn new_encrypted(payload: impl Into<CBOR>, digest: Digest) -> Envelope {
        Envelope::from_encrypted(payload.into(), digest)
    }

    /// Opaque pass-through constructor for a compressed-blob envelope (spec
    /// §3.2's extension case, §6.4).
    pub fn new_compressed(payload: impl Into<CBOR>, digest: Digest) -> Envelope {
        Envelope::from_compressed(payload.into(), digest)
    }

    pub(crate) fn new_elided(digest: Digest) -> Envelope {
        Envelope::from_elided(digest)
    }

    /// Encodes this envelope to its tag-200 CBOR representation (spec §6.2).
    pub fn to_cbor(&self) -> CBOR {
        CBOR::to_tagged_value(known_tags::ENVELOPE, self.untagged_cbor())
    }

    /// Encodes this envelope to its canonical dCBOR bytes.
    pub fn to_cbor_data(&self) -> Vec<u8> {
        self.to_cbor().to_cbor_data()
    }

    fn untagged_cbor(&self) -> CBOR {
        match self.case() {
            EnvelopeCase::Leaf { cbor, .. } => {
                CBOR::to_tagged_value(known_tags::LEAF, cbor.clone())
            }
            EnvelopeCase::Wrapped { envelope, .. } => {
                CBOR::to_tagged_value(known_tags::WRAPPED_ENVELOPE, envelope.to_cbor())
            }
            EnvelopeCase::Assertion(assertion) => {
                CBOR::to_tagged_value(known_tags::ASSERTION, assertion_map(assertion))
            }
            EnvelopeCase::Node { subject, assertions, .. } => {
                let assertion_array =
                    CBOR::from(CBORCase::Array(assertions.iter().map(Envelope::to_cbor).collect()));
                CBOR::to_tagged_value(
                    known_tags::NODE,
                    CBORCase::Array(vec![subject.to_cbor(), assertion_array]),
                )
            }
            EnvelopeCase::Elided(digest) => {
                CBOR::to_tagged_value(known_tags::ELIDED, CBOR::from(*digest))
            }
            EnvelopeCase::Encrypted { payload, .. } => {
                CBOR::to_tagged_value(known_tags::ENCRYPTED, payload.clone())
            }
            EnvelopeCase::Compressed { payload, .. } => {
                CBOR::to_tagged_value(known_tags::COMPRESSED, payload.clone())
            }
        }
    }

    /// Decodes an envelope from its tag-200 CBOR representation.
    pub fn try_from_cbor(cbor: CBOR) -> Result<Envelope> {
        let CBORCase::Tagged(tag, item) = cbor.as_case() else {
            return Err(Error::InvalidFormat("envelope must be tag 200".to_string()));
        };
        if tag.value() != known_tags::ENVELOPE {
            return Err(Error::InvalidFormat(format!(
                "expected envelope tag {}, found {}",
                known_tags::ENVELOPE,
                tag.value()
            )));
        }
        Envelope::from_untagged_cbor(item.clone())
    }

    /// Decodes an envelope from its canonical dCBOR bytes.
    pub fn try_from_cbor_data(data: impl AsRef<[u8]>) -> Result<Envelope> {
        let cbor = CBOR::try_from_data(data).map_err(Error::Cbor)?;
        Self::try_from_cbor(cbor)
    }

    fn from_untagged_cbor(cbor: CBOR) -> Result<Envelope> {
        let CBORCase::Tagged(tag, item) = cbor.as_case() else {
            return Err(Error::InvalidFormat("envelope payload must be tagged".to_string()));
        };
        match tag.value() {
            t if t == known_tags::LEAF => Ok(Envelope::new_leaf(item.clone())),
            t if t == known_tags::WRAPPED_ENVELOPE => {
                Ok(Envelope::new_wrapped(Envelope::try_from_cbor(item.clone())?))
            }
            t if t == known_tags::ASSERTION => {
                let CBORCase::Map(map) = item.as_case() else {
                    return Err(Error::InvalidFormat("assertion payload must be a map".to_string()));
                };
                if map.len() != 1 {
                    return Err(Error::InvalidFormat(
                        "assertion map must have exactly one entry".to_string(),
                    ));
                }
                let (predicate, object) = map.iter().next().unwrap();
                let predicate = Envelope::try_from_cbor(predicate.clone())?;
                let object = Envelope::try_from_cbor(object.clone())?;
                Ok(Envelope::new_assertion(predicate, object))
            }
            t if t == known_tags::NODE => {
                let CBORCase::Array(items) = item.as_case() else {
                    return Err(Error::InvalidFormat("node payload must be an array".to_string()));
                };
                let [subject_cbor, assertions_cbor] = &items[..] else {
                    return Err(Error::InvalidFormat(
                        "node payload must be a 2-element array".to_string(),
                    ));
                };
                let CBORCase::Array(assertion_items) = assertions_cbor.as_case() else {
                    return Err(Error::InvalidFormat(
                        "node's second element must be an assertion array".to_string(),
                    ));
                };
                if assertion_items.is_empty() {
                    return Err(Error::InvalidFormat(
                        "node must have at least one assertion".to_string(),
                    ));
                }
                let subject = Envelope::try_from_cbor(subject_cbor.clone())?;
                let assertions = assertion_items
                    .iter()
                    .map(|i| Envelope::try_from_cbor(i.clone()))
                    .collect::<Result<Vec<_>>>()?;
                Envelope::new_with_assertions(subject, assertions)
            }
            t if t == known_tags::ELIDED => {
                let digest: Digest = item.clone().try_into().map_err(Error::Cbor)?;
                Ok(Envelope::new_elided(digest))
            }
            t if t == known_tags::ENCRYPTED => {
                let digest = encrypted_digest(item)?;
                Ok(Envelope::new_encrypted(item.clone(), digest))
            }
            t if t == known_tags::COMPRESSED => {
                let digest = encrypted_digest(item)?;
                Ok(Envelope::new_compressed(item.clone(), digest))
            }
            other => Err(Error::InvalidFormat(format!("unknown envelope case tag {other}"))),
        }
    }
}

fn assertion_map(assertion: &Assertion) -> Map {
    let mut map = Map::new();
    map.insert(assertion.predicate().to_cbor(), assertion.object().to_cbor());
    map
}

/// Encrypted/compressed blobs carry the original digest as their first
/// array element (spec §6.2) so elision-preserving identity survives the
/// round trip even though the core never inspects the blob's contents.
fn encrypted_digest(item: &CBOR) -> Result<Digest> {
    let CBORCase::Array(items) = item.as_case() else {
        return Err(Error::InvalidFormat("obscured blob must be an array".to_string()));
    };
    let first = items.first().ok_or_else(|| {
        Error::InvalidFormat("obscured blob must carry its digest first".to_string())
    })?;
    first.clone().try_into().map_err(Error::Cbor)
}

impl From<Envelope> for CBOR {
    fn from(value: Envelope) -> Self {
        value.to_cbor()
    }
}

impl TryFrom<CBOR> for Envelope {
    type Error = CborError;
    fn try_from(cbor: CBOR) -> std::result::Result<Self, CborError> {
        Envelope::try_from_cbor(cbor).map_err(|e| match e {
            Error::Cbor(inner) => inner,
            other => CborError::Custom(other.to_string()),
        })
    }
}
