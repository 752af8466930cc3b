//! A stateful, cooperative visitor over a CBOR value graph (spec §4.9).

use super::value::{CBOR, CBORCase};

/// Identifies the edge a child was reached through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeType {
    /// The walk's starting value.
    None,
    /// The `i`th element of an array.
    ArrayElement(usize),
    /// A map entry, visited once before its key and value are each visited
    /// individually.
    MapKeyValue,
    /// The key half of a map entry.
    MapKey,
    /// The value half of a map entry.
    MapValue,
    /// The payload of a tagged value.
    TaggedContent,
}

/// One item the walker yields: either a lone value, or a map entry emitted
/// as a unit before its key and value are visited separately (spec §4.9).
#[derive(Debug, Clone)]
pub enum Element<'a> {
    Single(&'a CBOR),
    KeyValue(&'a CBOR, &'a CBOR),
}

/// The visitor signature: given the current element, its depth, the edge it
/// was reached through, and the threaded state, returns the state to use for
/// descendants plus whether to skip descending into this element's children.
pub trait Visitor<S> {
    fn visit(&mut self, element: Element<'_>, depth: usize, edge: EdgeType, state: S) -> (S, bool);
}

impl<S, F: FnMut(Element<'_>, usize, EdgeType, S) -> (S, bool)> Visitor<S> for F {
    fn visit(&mut self, element: Element<'_>, depth: usize, edge: EdgeType, state: S) -> (S, bool) {
        self(element, depth, edge, state)
    }
}

/// Walks `value` depth-first, calling `visitor` once per element.
pub fn walk<S: Clone>(value: &CBOR, state: S, visitor: &mut impl Visitor<S>) {
    walk_at(value, 0, EdgeType::None, state, visitor);
}

fn walk_at<S: Clone>(
    value: &CBOR,
    depth: usize,
    edge: EdgeType,
    state: S,
    visitor: &mut impl Visitor<S>,
) {
    let (state, stop) = visitor.visit(Element::Single(value), depth, edge, state);
    if stop {
        return;
    }
    match value.as_case() {
        CBORCase::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                walk_at(item, depth + 1, EdgeType::ArrayElement(i), state.clone(), visitor);
            }
        }
        CBORCase::Map(map) => {
            for (k, v) in map.iter() {
                let (kv_state, kv_stop) =
                    visitor.visit(Element::KeyValue(k, v), depth + 1, EdgeType::MapKeyValue, state.clone());
                if kv_stop {
                    continue;
                }
                walk_at(k, depth + 2, EdgeType::MapKey, kv_state.clone(), visitor);
                walk_at(v, depth + 2, EdgeType::MapValue, kv_state, visitor);
            }
        }
        CBORCase::Tagged(_, item) => {
            walk_at(item, depth + 1, EdgeType::TaggedContent, state, visitor);
        }
        _ => {}
    }
}
