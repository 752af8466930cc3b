//! Simple values: booleans, null, and the floating-point canonicalisation
//! cascade (spec §3.1, §4.1).

use half::f16;

use super::{
    error::{Error, Result},
    varint::{EncodeVarInt, MajorType},
};

/// A CBOR major-type-7 simple value, restricted to the subset dCBOR allows:
/// `false`, `true`, `null`, and the three floating-point widths.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Simple {
    False,
    True,
    Null,
    Float(f64),
}

impl Simple {
    pub fn name(&self) -> String {
        match self {
            Simple::False => "false".to_string(),
            Simple::True => "true".to_string(),
            Simple::Null => "null".to_string(),
            Simple::Float(f) => format_float(*f),
        }
    }

    pub fn cbor_data(&self) -> Vec<u8> {
        match self {
            Simple::False => vec![0xf4],
            Simple::True => vec![0xf5],
            Simple::Null => vec![0xf6],
            Simple::Float(f) => encode_float(*f),
        }
    }
}

impl std::fmt::Display for Simple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Formats a float the way the diagnostic/display renderer does: integral
/// floats that escaped integer-canonicalisation (can't happen for canonical
/// values, but may appear via direct construction) print with no trailing
/// `.0`; everything else uses Rust's default `{}` float formatting, with
/// special-cased NaN/infinity spellings.
fn format_float(f: f64) -> String {
    if f.is_nan() {
        "NaN".to_string()
    } else if f.is_infinite() {
        if f > 0.0 { "inf".to_string() } else { "-inf".to_string() }
    } else {
        format!("{}", f)
    }
}

/// True if `f` has an exact representation as an integer in `[-2^63, 2^64)`,
/// i.e. it must canonicalise to `Unsigned`/`Negative` rather than a float
/// head (spec §3.1, §4.1 step 1).
pub fn exact_integer_value(f: f64) -> Option<i128> {
    if !f.is_finite() {
        return None;
    }
    if f.fract() != 0.0 {
        return None;
    }
    // -0.0 canonicalises to 0.
    let f = if f == 0.0 { 0.0 } else { f };
    let i = f as i128;
    if i as f64 == f && (-(1i128 << 63)..(1i128 << 64)).contains(&i) {
        Some(i)
    } else {
        None
    }
}

/// Encodes an f64 following the canonicalisation cascade in spec §4.1.
pub fn encode_float(f: f64) -> Vec<u8> {
    if let Some(i) = exact_integer_value(f) {
        return if i >= 0 {
            (i as u64).encode_varint(MajorType::Unsigned)
        } else {
            ((-1 - i) as u64).encode_varint(MajorType::Negative)
        };
    }
    if f.is_nan() {
        return vec![0xf9, 0x7e, 0x00];
    }
    if f.is_infinite() {
        return if f > 0.0 {
            vec![0xf9, 0x7c, 0x00]
        } else {
            vec![0xf9, 0xfc, 0x00]
        };
    }
    let as_f16 = f16::from_f64(f);
    if as_f16.to_f64() == f {
        let mut v = vec![0xf9];
        v.extend_from_slice(&as_f16.to_bits().to_be_bytes());
        return v;
    }
    let as_f32 = f as f32;
    if as_f32 as f64 == f {
        let mut v = vec![0xfa];
        v.extend_from_slice(&as_f32.to_bits().to_be_bytes());
        return v;
    }
    let mut v = vec![0xfb];
    v.extend_from_slice(&f.to_bits().to_be_bytes());
    v
}

/// Decodes a simple value (major type 7) from the byte immediately following
/// an already-consumed initial byte, rejecting any non-canonical numeric
/// reduction or NaN bit pattern (spec §4.1, §4.5).
pub fn decode_simple(additional: u8, data: &[u8]) -> Result<(Simple, usize)> {
    match additional {
        20 => Ok((Simple::False, 1)),
        21 => Ok((Simple::True, 1)),
        22 => Ok((Simple::Null, 1)),
        25 => {
            let bytes: [u8; 2] =
                data.get(1..3).ok_or(Error::Underrun)?.try_into().unwrap();
            let bits = u16::from_be_bytes(bytes);
            let v = f16::from_bits(bits);
            if v.is_nan() {
                if bits != 0x7e00 {
                    return Err(Error::NonCanonicalNumeric);
                }
                return Ok((Simple::Float(f64::NAN), 3));
            }
            let f = v.to_f64();
            if exact_integer_value(f).is_some() {
                return Err(Error::NonCanonicalNumeric);
            }
            Ok((Simple::Float(f), 3))
        }
        26 => {
            let bytes: [u8; 4] =
                data.get(1..5).ok_or(Error::Underrun)?.try_into().unwrap();
            let bits = u32::from_be_bytes(bytes);
            let v = f32::from_bits(bits);
            if v.is_nan() {
                return Err(Error::NonCanonicalNumeric);
            }
            let f = v as f64;
            if exact_integer_value(f).is_some() {
                return Err(Error::NonCanonicalNumeric);
            }
            let as_f16 = f16::from_f64(f);
            if as_f16.to_f64() == f {
                return Err(Error::NonCanonicalNumeric);
            }
            Ok((Simple::Float(f), 5))
        }
        27 => {
            let bytes: [u8; 8] =
                data.get(1..9).ok_or(Error::Underrun)?.try_into().unwrap();
            let bits = u64::from_be_bytes(bytes);
            let f = f64::from_bits(bits);
            if f.is_nan() {
                return Err(Error::NonCanonicalNumeric);
            }
            if exact_integer_value(f).is_some() {
                return Err(Error::NonCanonicalNumeric);
            }
            let as_f32 = f as f32;
            if as_f32 as f64 == f {
                return Err(Error::NonCanonicalNumeric);
            }
            Ok((Simple::Float(f), 9))
        }
        _ => Err(Error::InvalidSimpleValue),
    }
}

impl std::hash::Hash for Simple {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            Simple::False => 0u8.hash(state),
            Simple::True => 1u8.hash(state),
            Simple::Null => 2u8.hash(state),
            Simple::Float(f) => {
                3u8.hash(state);
                f.to_bits().hash(state);
            }
        }
    }
}

impl Eq for Simple {}
