//! Human-readable renderings of envelopes (spec §6.3). The tree renderer is
//! built directly on [`crate::envelope::Envelope::walk`]; diagnostic and
//! hex-dump rendering of an envelope simply forward to its CBOR encoding
//! (spec §4.7, §4.8).

mod tree;

pub use tree::TreeFormatOpts;
