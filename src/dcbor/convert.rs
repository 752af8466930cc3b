//! Conversions between `CBOR` and ordinary Rust types (ambient ergonomics;
//! spec's "value model" module implies these but doesn't enumerate them).

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use super::{
    bytestring::ByteString,
    date::Date,
    error::{Error, Result},
    map::Map,
    simple::Simple,
    tag::known_tags,
    value::{CBOR, CBORCase},
};

macro_rules! impl_unsigned {
    ($t:ty) => {
        impl From<$t> for CBOR {
            fn from(value: $t) -> Self {
                CBORCase::Unsigned(value as u64).into()
            }
        }
        impl TryFrom<CBOR> for $t {
            type Error = Error;
            fn try_from(cbor: CBOR) -> Result<Self> {
                match cbor.into_case() {
                    CBORCase::Unsigned(n) => {
                        <$t>::try_from(n).map_err(|_| Error::OutOfRange)
                    }
                    _ => Err(Error::WrongType),
                }
            }
        }
    };
}

impl_unsigned!(u8);
impl_unsigned!(u16);
impl_unsigned!(u32);
impl_unsigned!(u64);
impl_unsigned!(usize);

macro_rules! impl_signed {
    ($t:ty) => {
        impl From<$t> for CBOR {
            fn from(value: $t) -> Self {
                if value >= 0 {
                    CBORCase::Unsigned(value as u64).into()
                } else {
                    CBORCase::Negative((-1 - value as i64) as u64).into()
                }
            }
        }
        impl TryFrom<CBOR> for $t {
            type Error = Error;
            fn try_from(cbor: CBOR) -> Result<Self> {
                match cbor.into_case() {
                    CBORCase::Unsigned(n) => {
                        <$t>::try_from(n).map_err(|_| Error::OutOfRange)
                    }
                    CBORCase::Negative(n) => {
                        let v = -1i128 - n as i128;
                        if v < <$t>::MIN as i128 || v > <$t>::MAX as i128 {
                            return Err(Error::OutOfRange);
                        }
                        Ok(v as $t)
                    }
                    _ => Err(Error::WrongType),
                }
            }
        }
    };
}

impl_signed!(i8);
impl_signed!(i16);
impl_signed!(i32);
impl_signed!(i64);

impl From<bool> for CBOR {
    fn from(value: bool) -> Self {
        CBORCase::Simple(if value { Simple::True } else { Simple::False }).into()
    }
}

impl TryFrom<CBOR> for bool {
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        match cbor.into_case() {
            CBORCase::Simple(Simple::True) => Ok(true),
            CBORCase::Simple(Simple::False) => Ok(false),
            _ => Err(Error::WrongType),
        }
    }
}

impl From<f32> for CBOR {
    fn from(value: f32) -> Self {
        CBOR::from(value as f64)
    }
}

impl TryFrom<CBOR> for f64 {
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        match cbor.into_case() {
            CBORCase::Simple(Simple::Float(f)) => Ok(f),
            CBORCase::Unsigned(n) => Ok(n as f64),
            CBORCase::Negative(n) => Ok(-1.0 - n as f64),
            _ => Err(Error::WrongType),
        }
    }
}

impl TryFrom<CBOR> for f32 {
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        f64::try_from(cbor).map(|f| f as f32)
    }
}

impl From<String> for CBOR {
    fn from(value: String) -> Self {
        CBORCase::Text(value).into()
    }
}

impl From<&str> for CBOR {
    fn from(value: &str) -> Self {
        CBORCase::Text(value.to_string()).into()
    }
}

impl TryFrom<CBOR> for String {
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        match cbor.into_case() {
            CBORCase::Text(s) => Ok(s),
            _ => Err(Error::WrongType),
        }
    }
}

impl From<ByteString> for CBOR {
    fn from(value: ByteString) -> Self {
        CBORCase::ByteString(value).into()
    }
}

impl TryFrom<CBOR> for ByteString {
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        match cbor.into_case() {
            CBORCase::ByteString(b) => Ok(b),
            _ => Err(Error::WrongType),
        }
    }
}

impl<T: Into<CBOR>> From<Vec<T>> for CBOR {
    fn from(value: Vec<T>) -> Self {
        CBORCase::Array(value.into_iter().map(Into::into).collect()).into()
    }
}

impl<T: Into<CBOR>, const N: usize> From<[T; N]> for CBOR {
    fn from(value: [T; N]) -> Self {
        CBORCase::Array(value.into_iter().map(Into::into).collect()).into()
    }
}

impl<T: TryFrom<CBOR>> TryFrom<CBOR> for Vec<T> {
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        match cbor.into_case() {
            CBORCase::Array(items) => items
                .into_iter()
                .map(|i| T::try_from(i).map_err(|_| Error::WrongType))
                .collect(),
            _ => Err(Error::WrongType),
        }
    }
}

impl<T: TryFrom<CBOR> + std::hash::Hash + Eq> TryFrom<CBOR> for HashSet<T> {
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        let v: Vec<T> = cbor.try_into()?;
        Ok(v.into_iter().collect())
    }
}

impl<T: Into<CBOR> + std::hash::Hash + Eq> From<HashSet<T>> for CBOR {
    fn from(value: HashSet<T>) -> Self {
        CBORCase::Array(value.into_iter().map(Into::into).collect()).into()
    }
}

impl<T: Into<CBOR>> From<VecDeque<T>> for CBOR {
    fn from(value: VecDeque<T>) -> Self {
        CBORCase::Array(value.into_iter().map(Into::into).collect()).into()
    }
}

impl<T: TryFrom<CBOR>> TryFrom<CBOR> for VecDeque<T> {
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        let v: Vec<T> = cbor.try_into()?;
        Ok(v.into())
    }
}

impl<K: Into<CBOR> + Ord, V: Into<CBOR>> From<BTreeMap<K, V>> for CBOR {
    fn from(value: BTreeMap<K, V>) -> Self {
        let map: Map = value.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        CBORCase::Map(map).into()
    }
}

impl<K: TryFrom<CBOR> + Ord, V: TryFrom<CBOR>> TryFrom<CBOR> for BTreeMap<K, V> {
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        match cbor.into_case() {
            CBORCase::Map(m) => m
                .iter()
                .map(|(k, v)| {
                    let key = K::try_from(k.clone()).map_err(|_| Error::WrongType)?;
                    let value = V::try_from(v.clone()).map_err(|_| Error::WrongType)?;
                    Ok((key, value))
                })
                .collect(),
            _ => Err(Error::WrongType),
        }
    }
}

impl<K: Into<CBOR> + std::hash::Hash + Eq, V: Into<CBOR>> From<HashMap<K, V>> for CBOR {
    fn from(value: HashMap<K, V>) -> Self {
        let map: Map = value.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        CBORCase::Map(map).into()
    }
}

impl<K: TryFrom<CBOR> + std::hash::Hash + Eq, V: TryFrom<CBOR>> TryFrom<CBOR>
    for HashMap<K, V>
{
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        match cbor.into_case() {
            CBORCase::Map(m) => m
                .iter()
                .map(|(k, v)| {
                    let key = K::try_from(k.clone()).map_err(|_| Error::WrongType)?;
                    let value = V::try_from(v.clone()).map_err(|_| Error::WrongType)?;
                    Ok((key, value))
                })
                .collect(),
            _ => Err(Error::WrongType),
        }
    }
}

impl From<Map> for CBOR {
    fn from(value: Map) -> Self {
        CBORCase::Map(value).into()
    }
}

impl TryFrom<CBOR> for Map {
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        match cbor.into_case() {
            CBORCase::Map(m) => Ok(m),
            _ => Err(Error::WrongType),
        }
    }
}

impl From<Date> for CBOR {
    fn from(value: Date) -> Self {
        CBOR::to_tagged_value(known_tags::DATE, value.timestamp())
    }
}

impl TryFrom<CBOR> for Date {
    type Error = Error;
    fn try_from(cbor: CBOR) -> Result<Self> {
        match cbor.into_case() {
            CBORCase::Tagged(tag, item) if tag.value() == known_tags::DATE => {
                let seconds: f64 = item.try_into()?;
                Ok(Date::from_timestamp(seconds))
            }
            CBORCase::Tagged(tag, _) => Err(Error::WrongTag {
                expected: known_tags::DATE,
                actual: tag.value(),
            }),
            _ => Err(Error::WrongType),
        }
    }
}
