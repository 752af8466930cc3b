//! Deterministic CBOR and Gordian Envelope: a canonical binary encoding over
//! the RFC 8949 CBOR data model, and a recursive, content-addressed data
//! structure built on top of it.
//!
//! The two layers are independent: [`dcbor`] has no knowledge of envelopes,
//! and [`envelope`] treats dCBOR purely as its wire format. [`format`]
//! renders envelopes for humans.

pub mod dcbor;
pub mod envelope;
pub mod format;

pub mod prelude {
    pub use crate::dcbor::{
        ByteString, CBOR, CBORCase, Date, Map, Simple, Tag, known_tags,
        name_for_tag, register_summarizer, register_tag, register_tags,
        remove_tag, tag_for_name,
    };
    pub use crate::envelope::prelude::*;
    pub use crate::format::TreeFormatOpts;
}
