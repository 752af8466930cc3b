use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Envelope-level shape errors (spec §7's envelope-level kinds).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("envelope is already elided")]
    AlreadyElided,

    #[error("more than one assertion matches the given predicate")]
    AmbiguousPredicate,

    #[error("digest of the replacement envelope does not match the original")]
    InvalidDigest,

    #[error("envelope does not have the expected format: {0}")]
    InvalidFormat(String),

    #[error("a required digest was missing")]
    MissingDigest,

    #[error("no assertion matches the given predicate")]
    NonexistentPredicate,

    #[error("envelope is not a wrapped envelope")]
    NotWrapped,

    #[error("envelope is not a leaf")]
    NotLeaf,

    #[error("envelope is not an assertion")]
    NotAssertion,

    #[error(transparent)]
    Cbor(#[from] crate::dcbor::Error),
}
