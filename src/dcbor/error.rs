use thiserror::Error;

/// The result type returned by dCBOR encoding and decoding operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error encountered while decoding or extracting a CBOR value.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Error {
    #[error("early end of data")]
    Underrun,

    #[error("unsupported CBOR header value")]
    UnsupportedHeaderValue(u8),

    #[error("a CBOR numeric value was encoded in non-canonical form")]
    NonCanonicalNumeric,

    #[error("invalid CBOR simple value")]
    InvalidSimpleValue,

    #[error("invalid CBOR string format")]
    InvalidString,

    #[error(
        "a CBOR string was not encoded in Unicode Canonical Normalization Form C"
    )]
    NonCanonicalString,

    #[error("the decoded CBOR had {0} extra bytes at the end")]
    UnusedData(usize),

    #[error("the decoded CBOR map has keys that are not in canonical order")]
    MisorderedMapKey,

    #[error("the decoded CBOR map has a duplicate key")]
    DuplicateMapKey,

    #[error("the requested key is not present in the map")]
    MissingMapKey,

    #[error("the numeric value is outside the range of the requested type")]
    OutOfRange,

    #[error("the CBOR value is not the expected type")]
    WrongType,

    #[error("expected tag {expected}, found {actual}")]
    WrongTag { expected: u64, actual: u64 },

    #[error("{0}")]
    Custom(String),
}
