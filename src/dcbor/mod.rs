//! Deterministic CBOR (dCBOR): a canonical binary codec over the CBOR data
//! model (RFC 8949) with the determinism rules that make every abstract
//! value have exactly one valid byte representation.

mod bytestring;
mod convert;
mod date;
mod decode;
mod diagnostic;
mod error;
mod hexdump;
mod map;
mod simple;
mod tag;
mod value;
mod varint;
mod walk;

pub use bytestring::ByteString;
pub use date::Date;
pub use error::{Error, Result};
pub use map::Map;
pub use simple::Simple;
pub use tag::{
    Summarizer, Tag, known_tags, name_for_tag, register_summarizer,
    register_tag, register_tags, remove_tag, tag_for_name,
};
pub use value::{CBOR, CBORCase};
pub use walk::{Element, EdgeType, Visitor, walk};

/// Re-exports the common entry points in one `use dcbor_prelude::*;`.
pub mod prelude {
    pub use super::{
        ByteString, CBOR, CBORCase, Date, EdgeType, Element, Error, Map,
        Result, Simple, Tag, Visitor, known_tags, name_for_tag,
        register_summarizer, register_tag, register_tags, remove_tag,
        tag_for_name, walk,
    };
}

#[cfg(test)]
mod tests;
