//! Annotated hex dump (spec §4.8): one line per CBOR head or leaf payload,
//! with a tree-indented description of what the bytes mean.

use super::{
    tag::tag_display_name,
    value::{CBOR, CBORCase},
    varint::{EncodeVarInt, MajorType},
};

impl CBOR {
    /// Produces the annotated, multi-line hex dump for this value.
    pub fn hex_dump(&self) -> String {
        let mut lines = Vec::new();
        dump_item(self, 0, &mut lines);
        lines.join("\n")
    }
}

fn line(bytes: &[u8], depth: usize, description: impl Into<String>) -> String {
    format!("{}  # {}{}", hex::encode(bytes), "    ".repeat(depth), description.into())
}

fn head_bytes(major: MajorType, argument: u64) -> Vec<u8> {
    argument.encode_varint(major)
}

fn dump_item(cbor: &CBOR, depth: usize, lines: &mut Vec<String>) {
    match cbor.as_case() {
        CBORCase::Unsigned(n) => {
            lines.push(line(&head_bytes(MajorType::Unsigned, *n), depth, format!("unsigned({n})")));
        }
        CBORCase::Negative(n) => {
            lines.push(line(
                &head_bytes(MajorType::Negative, *n),
                depth,
                format!("negative({})", -1 - (*n as i128)),
            ));
        }
        CBORCase::ByteString(b) => {
            let mut bytes = head_bytes(MajorType::ByteString, b.len() as u64);
            bytes.extend_from_slice(b.as_bytes());
            lines.push(line(&bytes, depth, format!("bytes, {} byte(s)", b.len())));
        }
        CBORCase::Text(s) => {
            let nfc_len = s.len();
            let mut bytes = head_bytes(MajorType::Text, nfc_len as u64);
            bytes.extend_from_slice(s.as_bytes());
            lines.push(line(&bytes, depth, format!("text({s:?})")));
        }
        CBORCase::Array(items) => {
            lines.push(line(
                &head_bytes(MajorType::Array, items.len() as u64),
                depth,
                format!("array({})", items.len()),
            ));
            for item in items {
                dump_item(item, depth + 1, lines);
            }
        }
        CBORCase::Map(m) => {
            lines.push(line(
                &head_bytes(MajorType::Map, m.len() as u64),
                depth,
                format!("map({})", m.len()),
            ));
            for (k, v) in m.iter() {
                dump_item(k, depth + 1, lines);
                dump_item(v, depth + 1, lines);
            }
        }
        CBORCase::Tagged(tag, item) => {
            lines.push(line(
                &head_bytes(MajorType::Tagged, tag.value()),
                depth,
                format!("tag({})", tag_display_name(tag.value())),
            ));
            dump_item(item, depth + 1, lines);
        }
        CBORCase::Simple(s) => {
            lines.push(line(&s.cbor_data(), depth, format!("simple({})", s.name())));
        }
    }
}
