//! Tree-formats an envelope for debugging and visualization (spec §6.3).
//!
//! Each line shows a short digest prefix, the edge label it was reached
//! through (`subj`, `pred`, `obj`, `cont`), and a one-line description of
//! the element (`NODE`, `ASSERTION`, or a leaf's diagnostic summary).
//! Indentation is two spaces per level.
//!
//! ```
//! use gordian_envelope::envelope::Envelope;
//!
//! let envelope = Envelope::new("Alice")
//!     .add_assertion("knows", Envelope::new("Bob").add_assertion("email", "bob@example.com"));
//! println!("{}", envelope.format());
//! ```

use std::collections::HashSet;

use crate::envelope::{Digest, DigestProvider, EdgeType, Envelope, EnvelopeCase};

/// Options controlling [`Envelope::tree_format`].
#[derive(Clone, Default)]
pub struct TreeFormatOpts {
    /// If true, `Node` containers are not shown as their own line; their
    /// subject and assertions appear at the depth the `Node` would have
    /// occupied.
    pub hide_nodes: bool,
    /// Digests to mark with a leading `*`.
    pub highlighting: HashSet<Digest>,
}

impl Envelope {
    /// Tree-formats the envelope with default options.
    pub fn format(&self) -> String {
        self.tree_format(&TreeFormatOpts::default())
    }

    /// Tree-formats the envelope with explicit options. An alias for
    /// [`Self::tree_format`], kept for parity with `diagnostic`/`diagnostic_opt`.
    pub fn format_opt(&self, opts: &TreeFormatOpts) -> String {
        self.tree_format(opts)
    }

    /// Tree-formats the envelope (spec §6.3).
    pub fn tree_format(&self, opts: &TreeFormatOpts) -> String {
        let mut lines = Vec::new();
        self.walk(opts.hide_nodes, (), &mut |envelope: &Envelope, depth, edge, state| {
            lines.push(tree_line(envelope, depth, edge, opts));
            (state, false)
        });
        lines.join("\n")
    }

    /// The dCBOR diagnostic form of this envelope's own tagged encoding
    /// (spec §4.7 applied to the envelope's wire format, §6.3), on one line.
    pub fn diagnostic(&self) -> String {
        self.to_cbor().diagnostic_flat()
    }

    /// The dCBOR diagnostic form of this envelope's own tagged encoding,
    /// pretty-printed across multiple lines.
    pub fn diagnostic_opt(&self) -> String {
        self.to_cbor().diagnostic_pretty()
    }

    /// A one-line human-readable summary of this node, the same text used
    /// for each line of [`Self::tree_format`].
    pub fn summary(&self) -> String {
        element_description(self)
    }
}

fn tree_line(envelope: &Envelope, depth: usize, edge: EdgeType, opts: &TreeFormatOpts) -> String {
    let mut parts = Vec::new();
    if opts.highlighting.contains(&envelope.digest()) {
        parts.push("*".to_string());
    }
    parts.push(envelope.digest().short_description());
    if let Some(label) = edge.label() {
        parts.push(label.to_string());
    }
    parts.push(element_description(envelope));
    let indent = "  ".repeat(depth);
    format!("{indent}{}", parts.join(" "))
}

fn element_description(envelope: &Envelope) -> String {
    match envelope.case() {
        EnvelopeCase::Node { .. } => "NODE".to_string(),
        EnvelopeCase::Assertion(_) => "ASSERTION".to_string(),
        EnvelopeCase::Wrapped { .. } => "WRAPPED".to_string(),
        EnvelopeCase::Elided(_) => "ELIDED".to_string(),
        EnvelopeCase::Encrypted { .. } => "ENCRYPTED".to_string(),
        EnvelopeCase::Compressed { .. } => "COMPRESSED".to_string(),
        EnvelopeCase::Leaf { cbor, .. } => cbor.diagnostic_flat(),
    }
}
