//! `wrap`/`unwrap` (spec §4.11).

use super::{
    envelope::{Envelope, EnvelopeCase},
    error::{Error, Result},
};

impl Envelope {
    /// `wrap(e)` (spec §4.11): makes `self` the content of a new `Wrapped`
    /// envelope.
    pub fn wrap(self) -> Envelope {
        Envelope::new_wrapped(self)
    }

    /// `unwrap(e)` (spec §4.11): succeeds iff `self` is `Wrapped`, returning
    /// the inner envelope.
    pub fn unwrap_envelope(&self) -> Result<Envelope> {
        match self.case() {
            EnvelopeCase::Wrapped { envelope, .. } => Ok(envelope.clone()),
            _ => Err(Error::NotWrapped),
        }
    }
}
