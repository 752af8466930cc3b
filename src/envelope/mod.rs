//! The Gordian Envelope core: a recursive, content-addressed data structure
//! built on top of [`crate::dcbor`] (spec §3.2, §4.10-§4.13).

mod assertion;
mod codec;
mod construct;
mod digest;
mod elide;
mod envelope;
mod error;
mod proof;
mod queries;
mod walk;
mod wrap;

pub use assertion::Assertion;
pub use digest::{Digest, DigestProvider};
pub use elide::ObscureAction;
pub use envelope::{Envelope, EnvelopeCase, EnvelopeEncodable};
pub use error::{Error, Result};
pub use walk::{EdgeType, Visitor};

/// Re-exports the common entry points in one `use envelope::prelude::*;`.
pub mod prelude {
    pub use super::{
        Assertion, Digest, DigestProvider, EdgeType, Envelope, EnvelopeCase,
        EnvelopeEncodable, Error, ObscureAction, Result, Visitor,
    };
}

#[cfg(test)]
mod tests;
