//! SHA-256 digests, the envelope's identity and content-addressing
//! primitive (spec §4.10).

use std::cell::RefCell;

use sha2::{Digest as _, Sha256};

use super::envelope::{Envelope, EnvelopeCase};

/// A 32-byte SHA-256 digest.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; 32]);

impl Digest {
    pub const LEN: usize = 32;

    pub fn from_image(data: impl AsRef<[u8]>) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data.as_ref());
        let out = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&out);
        Self(bytes)
    }

    /// Hashes the concatenation of several digests' raw bytes, in the order
    /// given (spec §4.10's `Node`/`Assertion` formulas).
    pub fn from_digests<'a>(digests: impl IntoIterator<Item = &'a Digest>) -> Self {
        let mut hasher = Sha256::new();
        for d in digests {
            hasher.update(d.0);
        }
        let out = hasher.finalize();
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&out);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn hex(&self) -> String {
        hex::encode(self.0)
    }

    /// A short prefix used in tree-format output (spec §6.3: "~7 chars").
    pub fn short_description(&self) -> String {
        self.hex().chars().take(7).collect()
    }
}

impl std::fmt::Debug for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Digest({})", self.hex())
    }
}

impl std::fmt::Display for Digest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.hex())
    }
}

/// Anything with a content digest: envelopes, assertions, and digests
/// themselves (identity).
pub trait DigestProvider {
    fn digest(&self) -> Digest;
}

impl DigestProvider for Digest {
    fn digest(&self) -> Digest {
        *self
    }
}

impl From<Digest> for crate::dcbor::CBOR {
    fn from(value: Digest) -> Self {
        crate::dcbor::ByteString::from(value.0).into()
    }
}

impl TryFrom<crate::dcbor::CBOR> for Digest {
    type Error = crate::dcbor::Error;
    fn try_from(cbor: crate::dcbor::CBOR) -> Result<Self, Self::Error> {
        let bytes: crate::dcbor::ByteString = cbor.try_into()?;
        if bytes.len() != 32 {
            return Err(crate::dcbor::Error::OutOfRange);
        }
        let mut out = [0u8; 32];
        out.copy_from_slice(bytes.as_bytes());
        Ok(Digest(out))
    }
}

impl Envelope {
    /// A short hex prefix of this envelope's digest, used in tree-formatted
    /// output (spec §6.3).
    pub fn short_id(&self) -> String {
        self.digest().short_description()
    }

    /// A digest sensitive to elision/obscuring patterns, not just content
    /// (spec §4.10's digest formula is insensitive to this by design: an
    /// `Elided` subtree hashes to the same value as its unobscured original).
    /// Two envelopes can be [`Self::is_equivalent_to`] (same root digest)
    /// while differing in which subtrees have been elided; this distinguishes
    /// that case.
    pub fn structural_digest(&self) -> Digest {
        let image = RefCell::new(Vec::new());
        self.walk(false, (), &mut |envelope: &Envelope, _depth, _edge, state| {
            match envelope.case() {
                EnvelopeCase::Elided(_) => image.borrow_mut().push(1u8),
                EnvelopeCase::Encrypted { .. } => image.borrow_mut().push(0u8),
                EnvelopeCase::Compressed { .. } => image.borrow_mut().push(2u8),
                _ => {}
            }
            image.borrow_mut().extend_from_slice(envelope.digest().as_bytes());
            (state, false)
        });
        Digest::from_image(image.into_inner())
    }

    /// True iff `self` and `other` have the same content *and* the same
    /// elision/obscuring structure.
    pub fn is_identical_to(&self, other: &Envelope) -> bool {
        self.is_equivalent_to(other) && self.structural_digest() == other.structural_digest()
    }
}

/// `==` on envelopes is structural identity, not mere digest equivalence —
/// use [`Envelope::is_equivalent_to`] for the coarser comparison.
impl PartialEq for Envelope {
    fn eq(&self, other: &Self) -> bool {
        self.is_identical_to(other)
    }
}
impl Eq for Envelope {}
