//! The canonical decoder (spec §4.5). Single-pass, builds children before
//! parents, and rejects any input that is not already in canonical form.

use unicode_normalization::{IsNormalized, UnicodeNormalization, is_nfc_quick};

use super::{
    bytestring::ByteString,
    error::{Error, Result},
    map::Map,
    simple::decode_simple,
    tag::Tag,
    value::{CBOR, CBORCase},
    varint::{MajorType, parse_head},
};

/// Decodes a complete CBOR item from `data`, requiring that every byte is
/// consumed (spec §4.5's `UnusedData` rule).
pub fn decode_cbor(data: &[u8]) -> Result<CBOR> {
    let (value, consumed) = decode_item(data)?;
    if consumed < data.len() {
        return Err(Error::UnusedData(data.len() - consumed));
    }
    Ok(value)
}

/// Decodes one CBOR item from the front of `data`, returning it along with
/// the number of bytes consumed. Used recursively for array/map/tagged
/// children, and once (with a trailing-byte check) for a top-level decode.
fn decode_item(data: &[u8]) -> Result<(CBOR, usize)> {
    let head = parse_head(data)?;
    match head.major_type {
        MajorType::Unsigned => {
            Ok((CBORCase::Unsigned(head.argument).into(), head.header_len))
        }
        MajorType::Negative => {
            Ok((CBORCase::Negative(head.argument).into(), head.header_len))
        }
        MajorType::ByteString => {
            let len = head.argument as usize;
            let start = head.header_len;
            let end = start.checked_add(len).ok_or(Error::Underrun)?;
            let bytes = data.get(start..end).ok_or(Error::Underrun)?;
            Ok((
                CBORCase::ByteString(ByteString::from(bytes)).into(),
                end,
            ))
        }
        MajorType::Text => {
            let len = head.argument as usize;
            let start = head.header_len;
            let end = start.checked_add(len).ok_or(Error::Underrun)?;
            let bytes = data.get(start..end).ok_or(Error::Underrun)?;
            let s = std::str::from_utf8(bytes)
                .map_err(|_| Error::InvalidString)?;
            let is_canonical = match is_nfc_quick(s.chars()) {
                IsNormalized::Yes => true,
                IsNormalized::No => false,
                IsNormalized::Maybe => {
                    let nfc: String = s.nfc().collect();
                    nfc == s
                }
            };
            if !is_canonical {
                return Err(Error::NonCanonicalString);
            }
            Ok((CBORCase::Text(s.to_string()).into(), end))
        }
        MajorType::Array => {
            let count = head.argument as usize;
            let mut offset = head.header_len;
            let mut items = Vec::with_capacity(count.min(1024));
            for _ in 0..count {
                let (item, consumed) = decode_item(
                    data.get(offset..).ok_or(Error::Underrun)?,
                )?;
                items.push(item);
                offset += consumed;
            }
            Ok((CBORCase::Array(items).into(), offset))
        }
        MajorType::Map => {
            let count = head.argument as usize;
            let mut offset = head.header_len;
            let mut map = Map::new();
            let mut prev_key_bytes: Option<Vec<u8>> = None;
            for _ in 0..count {
                let (key, key_len) = decode_item(
                    data.get(offset..).ok_or(Error::Underrun)?,
                )?;
                offset += key_len;
                let (value, value_len) = decode_item(
                    data.get(offset..).ok_or(Error::Underrun)?,
                )?;
                offset += value_len;
                let key_bytes = key.to_cbor_data();
                if let Some(prev) = &prev_key_bytes {
                    match key_bytes.cmp(prev) {
                        std::cmp::Ordering::Greater => {}
                        std::cmp::Ordering::Equal => {
                            return Err(Error::DuplicateMapKey);
                        }
                        std::cmp::Ordering::Less => {
                            return Err(Error::MisorderedMapKey);
                        }
                    }
                }
                prev_key_bytes = Some(key_bytes.clone());
                map.insert_unchecked(key_bytes, key, value);
            }
            Ok((CBORCase::Map(map).into(), offset))
        }
        MajorType::Tagged => {
            let (item, consumed) = decode_item(
                data.get(head.header_len..).ok_or(Error::Underrun)?,
            )?;
            Ok((
                CBORCase::Tagged(Tag::with_value(head.argument), item).into(),
                head.header_len + consumed,
            ))
        }
        MajorType::Simple => {
            let additional = data[0] & 0x1f;
            let (simple, len) = decode_simple(additional, data)?;
            Ok((CBORCase::Simple(simple).into(), len))
        }
    }
}
