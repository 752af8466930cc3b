//! RFC 8949 §8 diagnostic notation, in flat and pretty modes (spec §4.7).

use super::{
    tag::{summarize, tag_display_name},
    value::{CBOR, CBORCase},
};

impl CBOR {
    /// Single-line diagnostic notation.
    pub fn diagnostic_flat(&self) -> String {
        self.to_string()
    }

    /// Alias kept for call-site parity with the reference crate's API.
    pub fn diagnostic(&self) -> String {
        self.diagnostic_flat()
    }

    /// Multi-line diagnostic notation, two-space indentation per level.
    pub fn diagnostic_pretty(&self) -> String {
        let mut out = String::new();
        write_pretty(self, 0, &mut out);
        out
    }
}

fn indent(level: usize) -> String {
    "  ".repeat(level)
}

fn write_pretty(cbor: &CBOR, level: usize, out: &mut String) {
    match cbor.as_case() {
        CBORCase::Array(items) if !items.is_empty() => {
            out.push_str("[\n");
            for (i, item) in items.iter().enumerate() {
                out.push_str(&indent(level + 1));
                write_pretty(item, level + 1, out);
                if i + 1 < items.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&indent(level));
            out.push(']');
        }
        CBORCase::Map(map) if !map.is_empty() => {
            out.push_str("{\n");
            let entries: Vec<_> = map.iter().collect();
            for (i, (k, v)) in entries.iter().enumerate() {
                out.push_str(&indent(level + 1));
                out.push_str(&k.to_string());
                out.push_str(": ");
                write_pretty(v, level + 1, out);
                if i + 1 < entries.len() {
                    out.push(',');
                }
                out.push('\n');
            }
            out.push_str(&indent(level));
            out.push('}');
        }
        CBORCase::Tagged(tag, item) => {
            if let Some(s) = summarize(tag.value(), item) {
                out.push_str(&s);
            } else {
                out.push_str(&tag_display_name(tag.value()));
                out.push('(');
                write_pretty(item, level, out);
                out.push(')');
            }
        }
        _ => out.push_str(&cbor.to_string()),
    }
}
