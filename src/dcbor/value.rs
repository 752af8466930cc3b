//! The CBOR value model (spec §3.1, "Value model").

use std::hash;

#[cfg(not(feature = "multithreaded"))]
use std::rc::Rc as RefCounted;
#[cfg(feature = "multithreaded")]
use std::sync::Arc as RefCounted;

use unicode_normalization::UnicodeNormalization;

use super::{
    bytestring::ByteString,
    decode::decode_cbor,
    error::Result,
    map::Map,
    simple::{Simple, encode_float},
    tag::{Tag, tag_display_name},
    varint::{EncodeVarInt, MajorType},
};

/// A symbolic representation of a CBOR data item.
///
/// `CBOR` wraps an immutable [`CBORCase`] in a reference-counted pointer, so
/// cloning a value (and, recursively, the values it contains) is O(1).
#[derive(Clone, Eq)]
pub struct CBOR(RefCounted<CBORCase>);

/// The eight CBOR major types as a sealed, exhaustively-matched enum (spec
/// §3.1, §9 "Tagged sums over inheritance").
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CBORCase {
    Unsigned(u64),
    Negative(u64),
    ByteString(ByteString),
    Text(String),
    Array(Vec<CBOR>),
    Map(Map),
    Tagged(Tag, CBOR),
    Simple(Simple),
}

impl CBOR {
    pub fn as_case(&self) -> &CBORCase {
        &self.0
    }

    pub fn into_case(self) -> CBORCase {
        match RefCounted::try_unwrap(self.0) {
            Ok(case) => case,
            Err(rc) => (*rc).clone(),
        }
    }

    /// Convenience constructor for a tagged value from any two
    /// `Into<CBOR>`-compatible pieces.
    pub fn to_tagged_value(tag: u64, item: impl Into<CBOR>) -> CBOR {
        CBORCase::Tagged(Tag::with_value(tag), item.into()).into()
    }

    pub fn try_from_data(data: impl AsRef<[u8]>) -> Result<CBOR> {
        decode_cbor(data.as_ref())
    }

    pub fn try_from_hex(hex_str: &str) -> Result<CBOR> {
        let data = hex::decode(hex_str).map_err(|e| {
            super::error::Error::Custom(format!("invalid hex: {e}"))
        })?;
        Self::try_from_data(data)
    }

    pub fn hex(&self) -> String {
        hex::encode(self.to_cbor_data())
    }

    /// Encodes this value to its canonical byte representation (spec §4.4).
    pub fn to_cbor_data(&self) -> Vec<u8> {
        match self.as_case() {
            CBORCase::Unsigned(n) => n.encode_varint(MajorType::Unsigned),
            CBORCase::Negative(n) => n.encode_varint(MajorType::Negative),
            CBORCase::ByteString(b) => {
                let mut buf = b.len().encode_varint(MajorType::ByteString);
                buf.extend_from_slice(b.as_bytes());
                buf
            }
            CBORCase::Text(s) => {
                let nfc: String = s.nfc().collect();
                let mut buf = nfc.len().encode_varint(MajorType::Text);
                buf.extend_from_slice(nfc.as_bytes());
                buf
            }
            CBORCase::Array(items) => {
                let mut buf = items.len().encode_varint(MajorType::Array);
                for item in items {
                    buf.extend(item.to_cbor_data());
                }
                buf
            }
            CBORCase::Map(m) => m.cbor_data(),
            CBORCase::Tagged(tag, item) => {
                let mut buf = tag.value().encode_varint(MajorType::Tagged);
                buf.extend(item.to_cbor_data());
                buf
            }
            CBORCase::Simple(s) => s.cbor_data(),
        }
    }
}

impl From<CBORCase> for CBOR {
    fn from(case: CBORCase) -> Self {
        Self(RefCounted::new(case))
    }
}

impl PartialEq for CBOR {
    fn eq(&self, other: &Self) -> bool {
        self.as_case() == other.as_case()
    }
}

impl hash::Hash for CBOR {
    fn hash<H: hash::Hasher>(&self, state: &mut H) {
        self.as_case().hash(state)
    }
}

fn format_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn format_array(items: &[CBOR]) -> String {
    let inner = items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(", ");
    format!("[{inner}]")
}

fn format_map(m: &Map) -> String {
    let inner = m
        .iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{inner}}}")
}

impl std::fmt::Debug for CBOR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.as_case() {
            CBORCase::Unsigned(n) => write!(f, "unsigned({n})"),
            CBORCase::Negative(n) => write!(f, "negative({})", -1 - (*n as i128)),
            CBORCase::ByteString(b) => write!(f, "bytes({})", hex::encode(b.as_bytes())),
            CBORCase::Text(s) => write!(f, "text({s:?})"),
            CBORCase::Array(items) => {
                write!(f, "array({items:?})")
            }
            CBORCase::Map(m) => write!(f, "map({m:?})"),
            CBORCase::Tagged(tag, item) => {
                write!(f, "tagged({}, {item:?})", tag.value())
            }
            CBORCase::Simple(s) => write!(f, "simple({})", s.name()),
        }
    }
}

impl std::fmt::Debug for Map {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self
            .iter()
            .map(|(k, v)| format!("0x{}: ({k:?}, {v:?})", hex::encode(k.to_cbor_data())))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{{{entries}}}")
    }
}

impl std::fmt::Display for CBOR {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self.as_case() {
            CBORCase::Unsigned(n) => format!("{n}"),
            CBORCase::Negative(n) => format!("{}", -1 - (*n as i128)),
            CBORCase::ByteString(b) => format!("h'{}'", hex::encode(b.as_bytes())),
            CBORCase::Text(s) => format_string(s),
            CBORCase::Array(items) => format_array(items),
            CBORCase::Map(m) => format_map(m),
            CBORCase::Tagged(tag, item) => {
                format!("{}({})", tag_display_name(tag.value()), item)
            }
            CBORCase::Simple(s) => format!("{s}"),
        };
        f.write_str(&s)
    }
}

impl From<f64> for CBOR {
    fn from(value: f64) -> Self {
        decode_float_bytes_to_case(&encode_float(value)).into()
    }
}

/// Re-interprets the bytes [`encode_float`] just produced as the matching
/// `CBORCase`, so that the `From<f64>` impl and the wire encoder always
/// agree on which case a given float lands in.
fn decode_float_bytes_to_case(bytes: &[u8]) -> CBORCase {
    match bytes[0] >> 5 {
        0 => {
            let head = super::varint::parse_head(bytes).unwrap();
            CBORCase::Unsigned(head.argument)
        }
        1 => {
            let head = super::varint::parse_head(bytes).unwrap();
            CBORCase::Negative(head.argument)
        }
        _ => {
            let (simple, _) = super::simple::decode_simple(bytes[0] & 0x1f, bytes).unwrap();
            CBORCase::Simple(simple)
        }
    }
}
