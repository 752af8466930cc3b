//! The canonical (major-type, argument) head codec (spec §4.1, §4.4, §4.5).

use super::error::{Error, Result};

/// The eight CBOR major types, as their 3-bit discriminant shifted into the
/// high bits of the initial byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MajorType {
    Unsigned = 0,
    Negative = 1,
    ByteString = 2,
    Text = 3,
    Array = 4,
    Map = 5,
    Tagged = 6,
    Simple = 7,
}

impl MajorType {
    fn from_byte(b: u8) -> Self {
        match b >> 5 {
            0 => MajorType::Unsigned,
            1 => MajorType::Negative,
            2 => MajorType::ByteString,
            3 => MajorType::Text,
            4 => MajorType::Array,
            5 => MajorType::Map,
            6 => MajorType::Tagged,
            7 => MajorType::Simple,
            _ => unreachable!(),
        }
    }
}

/// Encodes an unsigned argument under the given major type using the
/// smallest legal head width (spec §4.1).
pub trait EncodeVarInt {
    fn encode_varint(self, major_type: MajorType) -> Vec<u8>;
}

impl EncodeVarInt for u64 {
    fn encode_varint(self, major_type: MajorType) -> Vec<u8> {
        let high = (major_type as u8) << 5;
        if self < 24 {
            vec![high | self as u8]
        } else if self <= u8::MAX as u64 {
            vec![high | 24, self as u8]
        } else if self <= u16::MAX as u64 {
            let mut v = vec![high | 25];
            v.extend_from_slice(&(self as u16).to_be_bytes());
            v
        } else if self <= u32::MAX as u64 {
            let mut v = vec![high | 26];
            v.extend_from_slice(&(self as u32).to_be_bytes());
            v
        } else {
            let mut v = vec![high | 27];
            v.extend_from_slice(&self.to_be_bytes());
            v
        }
    }
}

impl EncodeVarInt for usize {
    fn encode_varint(self, major_type: MajorType) -> Vec<u8> {
        (self as u64).encode_varint(major_type)
    }
}

/// The parsed (major type, argument) pair, plus the number of bytes the head
/// occupied in the input.
pub struct Head {
    pub major_type: MajorType,
    pub argument: u64,
    pub header_len: usize,
}

/// Parses one CBOR head from `data`, rejecting any non-minimal encoding.
///
/// The minimal-width check only applies to major types 0-6: a major-type-7
/// head's argument bits are a float/simple-value payload, not an integer
/// argument, so a numerically small bit pattern there is not a width
/// violation. `decode_simple` (simple.rs) applies the correct reducibility
/// and NaN-canonicality checks for those bits once this function hands them
/// back unexamined.
pub fn parse_head(data: &[u8]) -> Result<Head> {
    let first = *data.first().ok_or(Error::Underrun)?;
    let major_type = MajorType::from_byte(first);
    let is_simple = major_type == MajorType::Simple;
    let additional = first & 0x1f;
    match additional {
        0..=23 => Ok(Head { major_type, argument: additional as u64, header_len: 1 }),
        24 => {
            let b = *data.get(1).ok_or(Error::Underrun)?;
            if !is_simple && b < 24 {
                return Err(Error::NonCanonicalNumeric);
            }
            Ok(Head { major_type, argument: b as u64, header_len: 2 })
        }
        25 => {
            let bytes: [u8; 2] =
                data.get(1..3).ok_or(Error::Underrun)?.try_into().unwrap();
            let v = u16::from_be_bytes(bytes);
            if !is_simple && v <= u8::MAX as u16 {
                return Err(Error::NonCanonicalNumeric);
            }
            Ok(Head { major_type, argument: v as u64, header_len: 3 })
        }
        26 => {
            let bytes: [u8; 4] =
                data.get(1..5).ok_or(Error::Underrun)?.try_into().unwrap();
            let v = u32::from_be_bytes(bytes);
            if !is_simple && v <= u16::MAX as u32 {
                return Err(Error::NonCanonicalNumeric);
            }
            Ok(Head { major_type, argument: v as u64, header_len: 5 })
        }
        27 => {
            let bytes: [u8; 8] =
                data.get(1..9).ok_or(Error::Underrun)?.try_into().unwrap();
            let v = u64::from_be_bytes(bytes);
            if !is_simple && v <= u32::MAX as u64 {
                return Err(Error::NonCanonicalNumeric);
            }
            Ok(Head { major_type, argument: v as u64, header_len: 9 })
        }
        28..=30 => Err(Error::UnsupportedHeaderValue(first)),
        31 => Err(Error::UnsupportedHeaderValue(first)),
        _ => unreachable!(),
    }
}
