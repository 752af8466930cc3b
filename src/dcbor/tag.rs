//! The process-wide tag registry used for diagnostic rendering (spec §4.6).

use std::{
    collections::HashMap,
    sync::{OnceLock, RwLock},
};

use super::value::CBOR;

/// Number assigned to the Gordian Envelope's own wrapper tags (spec §6.2).
pub mod known_tags {
    pub const ENCODED_CBOR: u64 = 24;
    pub const DATE: u64 = 1;
    pub const ENVELOPE: u64 = 200;
    pub const LEAF: u64 = 24;
    pub const WRAPPED_ENVELOPE: u64 = 224;
    pub const ASSERTION: u64 = 221;
    pub const NODE: u64 = 217;
    pub const ELIDED: u64 = 203;
    pub const ENCRYPTED: u64 = 204;
    pub const COMPRESSED: u64 = 205;
}

/// A semantic CBOR tag: a number plus an optional human-readable name.
#[derive(Debug, Clone)]
pub struct Tag {
    value: u64,
    name: Option<String>,
}

impl Tag {
    pub fn new(value: u64, name: impl Into<String>) -> Self {
        Self { value, name: Some(name.into()) }
    }

    pub fn with_value(value: u64) -> Self {
        Self { value, name: None }
    }

    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}
impl Eq for Tag {}

impl std::hash::Hash for Tag {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.name {
            Some(name) => f.write_str(name),
            None => write!(f, "{}", self.value),
        }
    }
}

/// A function that renders a tagged value's inner content for diagnostic
/// output, overriding the default `tag(inner)` rendering.
pub type Summarizer = fn(&CBOR) -> Option<String>;

#[derive(Default)]
struct Registry {
    names: HashMap<u64, String>,
    summarizers: HashMap<u64, Summarizer>,
}

fn registry() -> &'static RwLock<Registry> {
    static REGISTRY: OnceLock<RwLock<Registry>> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let mut r = Registry::default();
        r.names.insert(known_tags::DATE, "date".to_string());
        r.names.insert(known_tags::ENCODED_CBOR, "encoded-cbor".to_string());
        r.names.insert(known_tags::ENVELOPE, "envelope".to_string());
        r.names
            .insert(known_tags::WRAPPED_ENVELOPE, "wrapped-envelope".to_string());
        r.names.insert(known_tags::ASSERTION, "assertion".to_string());
        r.names.insert(known_tags::NODE, "node".to_string());
        r.names.insert(known_tags::ELIDED, "elided".to_string());
        r.names.insert(known_tags::ENCRYPTED, "encrypted".to_string());
        r.names.insert(known_tags::COMPRESSED, "compressed".to_string());
        RwLock::new(r)
    })
}

/// Registers a display name for `value`, overwriting any prior registration.
pub fn register_tag(value: u64, name: impl Into<String>) {
    registry().write().unwrap().names.insert(value, name.into());
}

/// Registers several tags at once.
pub fn register_tags(tags: impl IntoIterator<Item = (u64, &'static str)>) {
    let mut reg = registry().write().unwrap();
    for (value, name) in tags {
        reg.names.insert(value, name.to_string());
    }
}

/// Removes any registration for `value`.
pub fn remove_tag(value: u64) {
    let mut reg = registry().write().unwrap();
    reg.names.remove(&value);
    reg.summarizers.remove(&value);
}

/// Registers a custom diagnostic summarizer for `value`.
pub fn register_summarizer(value: u64, summarizer: Summarizer) {
    registry().write().unwrap().summarizers.insert(value, summarizer);
}

/// Looks up the registered name for a tag number, if any.
pub fn name_for_tag(value: u64) -> Option<String> {
    registry().read().unwrap().names.get(&value).cloned()
}

/// Looks up the tag number registered under `name`, if any.
pub fn tag_for_name(name: &str) -> Option<u64> {
    registry()
        .read()
        .unwrap()
        .names
        .iter()
        .find(|(_, v)| v.as_str() == name)
        .map(|(k, _)| *k)
}

/// Returns the tag's name if registered, else its numeric value as a string.
pub fn tag_display_name(value: u64) -> String {
    name_for_tag(value).unwrap_or_else(|| value.to_string())
}

/// Invokes the registered summarizer for `value`, if any.
pub fn summarize(value: u64, inner: &CBOR) -> Option<String> {
    let f = *registry().read().unwrap().summarizers.get(&value)?;
    f(inner)
}
