//! The canonical-order map container (spec §4.3).
//!
//! Entries are kept sorted by the *encoded* bytes of their key, not by the
//! key's abstract value, so that iteration order always matches what a
//! canonical encoder would emit.

use super::{
    error::{Error, Result},
    value::CBOR,
};

/// A CBOR map (major type 5) whose iteration order is the ascending
/// lexicographic order of each entry's encoded key bytes.
#[derive(Debug, Clone, Default)]
pub struct Map {
    // Sorted by `.0` (the encoded key bytes).
    entries: Vec<(Vec<u8>, CBOR, CBOR)>,
}

impl Map {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts a key/value pair, maintaining canonical order. A later insert
    /// with an equal key overwrites the earlier value (construction-time
    /// convenience; the *decoder* instead rejects duplicate keys outright).
    pub fn insert(&mut self, key: impl Into<CBOR>, value: impl Into<CBOR>) {
        let key = key.into();
        let value = value.into();
        let key_bytes = key.to_cbor_data();
        match self.entries.binary_search_by(|(k, _, _)| k.cmp(&key_bytes)) {
            Ok(idx) => self.entries[idx] = (key_bytes, key, value),
            Err(idx) => self.entries.insert(idx, (key_bytes, key, value)),
        }
    }

    /// Inserts a pre-encoded entry without re-checking order; used by the
    /// decoder, which has already validated ordering and uniqueness.
    pub(crate) fn insert_unchecked(
        &mut self,
        key_bytes: Vec<u8>,
        key: CBOR,
        value: CBOR,
    ) {
        self.entries.push((key_bytes, key, value));
    }

    pub fn get<K, V>(&self, key: K) -> Option<V>
    where
        K: Into<CBOR>,
        V: TryFrom<CBOR>,
    {
        let key_bytes = key.into().to_cbor_data();
        self.entries
            .iter()
            .find(|(k, _, _)| k == &key_bytes)
            .and_then(|(_, _, v)| V::try_from(v.clone()).ok())
    }

    pub fn extract<K, V>(&self, key: K) -> Result<V>
    where
        K: Into<CBOR>,
        V: TryFrom<CBOR>,
    {
        let key_bytes = key.into().to_cbor_data();
        let v = self
            .entries
            .iter()
            .find(|(k, _, _)| k == &key_bytes)
            .map(|(_, _, v)| v.clone())
            .ok_or(Error::MissingMapKey)?;
        V::try_from(v).map_err(|_| Error::WrongType)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CBOR, &CBOR)> {
        self.entries.iter().map(|(_, k, v)| (k, v))
    }

    pub fn cbor_data(&self) -> Vec<u8> {
        use super::varint::{EncodeVarInt, MajorType};
        let mut buf = self.entries.len().encode_varint(MajorType::Map);
        for (_, k, v) in &self.entries {
            buf.extend(k.to_cbor_data());
            buf.extend(v.to_cbor_data());
        }
        buf
    }
}

impl PartialEq for Map {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self
                .entries
                .iter()
                .zip(other.entries.iter())
                .all(|(a, b)| a.0 == b.0 && a.2 == b.2)
    }
}
impl Eq for Map {}

impl std::hash::Hash for Map {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        for (k, _, v) in &self.entries {
            k.hash(state);
            v.hash(state);
        }
    }
}

impl FromIterator<(CBOR, CBOR)> for Map {
    fn from_iter<T: IntoIterator<Item = (CBOR, CBOR)>>(iter: T) -> Self {
        let mut m = Map::new();
        for (k, v) in iter {
            m.insert(k, v);
        }
        m
    }
}
