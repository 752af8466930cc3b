use std::collections::HashSet;

use super::*;
use crate::dcbor::ByteString;

fn alice_knows_bob() -> Envelope {
    Envelope::new("Alice").add_assertion("knows", "Bob")
}

fn alice_friends() -> Envelope {
    Envelope::new("Alice")
        .add_assertion("knows", "Bob")
        .add_assertion("knows", "Carol")
        .add_assertion("knows", "Dan")
}

#[test]
fn leaf_digest_is_stable() {
    let a = Envelope::new("Hello.");
    let b = Envelope::new("Hello.");
    assert_eq!(a.digest(), b.digest());
    assert!(a.is_equivalent_to(&b));
}

#[test]
fn different_leaves_have_different_digests() {
    let a = Envelope::new("Hello.");
    let b = Envelope::new("Goodbye.");
    assert_ne!(a.digest(), b.digest());
}

#[test]
fn node_digest_is_order_independent_over_assertions() {
    let a = Envelope::new("Alice")
        .add_assertion("knows", "Bob")
        .add_assertion("knows", "Carol");
    let b = Envelope::new("Alice")
        .add_assertion("knows", "Carol")
        .add_assertion("knows", "Bob");
    assert_eq!(a.digest(), b.digest());
}

#[test]
fn duplicate_assertions_are_deduplicated_before_hashing() {
    let once = Envelope::new("Alice").add_assertion("knows", "Bob");
    let twice = Envelope::new("Alice")
        .add_assertion("knows", "Bob")
        .add_assertion("knows", "Bob");
    assert_eq!(once.digest(), twice.digest());
    assert_eq!(twice.assertions().len(), 1);
}

#[test]
fn wrap_then_unwrap_roundtrips() {
    let e = alice_knows_bob();
    let wrapped = e.clone().wrap();
    assert!(wrapped.is_wrapped());
    let unwrapped = wrapped.unwrap_envelope().unwrap();
    assert!(unwrapped.is_equivalent_to(&e));
}

#[test]
fn unwrap_non_wrapped_fails() {
    let e = Envelope::new("Hello.");
    assert!(matches!(e.unwrap_envelope(), Err(Error::NotWrapped)));
}

#[test]
fn queries_find_objects_by_predicate() {
    let e = alice_friends();
    let bob: String = e.extract_object_for_predicate("knows").unwrap();
    assert_eq!(bob, "Bob");
    let all: Vec<String> = e.extract_objects_for_predicate("knows").unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.contains(&"Bob".to_string()));
    assert!(all.contains(&"Carol".to_string()));
    assert!(all.contains(&"Dan".to_string()));
}

#[test]
fn ambiguous_predicate_is_an_error() {
    let e = alice_friends();
    assert!(matches!(
        e.object_for_predicate("knows"),
        Err(Error::AmbiguousPredicate)
    ));
}

#[test]
fn nonexistent_predicate_is_an_error() {
    let e = alice_knows_bob();
    assert!(matches!(
        e.object_for_predicate("hates"),
        Err(Error::NonexistentPredicate)
    ));
}

#[test]
fn elide_preserves_digest() {
    let e = alice_knows_bob();
    let elided = e.elide();
    assert!(e.is_equivalent_to(&elided));
    assert!(elided.is_elided());
}

#[test]
fn elide_removing_target_preserves_root_digest() {
    let e = alice_knows_bob();
    let bob = Envelope::new("Bob");
    let elided = e.elide_removing_target(&bob);
    assert!(e.is_equivalent_to(&elided));
    let obj = elided.assertions()[0].as_object().unwrap();
    assert!(obj.is_elided());
}

#[test]
fn unelide_after_elide_removing_reconstructs_original() {
    let e = alice_knows_bob();
    let bob = Envelope::new("Bob");
    let elided = e.elide_removing_target(&bob);
    let restored = elided.unelide(&e).unwrap();
    assert!(restored.is_equivalent_to(&e));
    assert_eq!(restored.to_cbor_data(), e.to_cbor_data());
}

#[test]
fn elide_revealing_empty_set_elides_everything_but_the_root_digest() {
    let e = alice_friends();
    let root = e.elide_revealing_set(&HashSet::new());
    assert!(root.is_node());
    assert!(root.subject().is_elided());
    assert!(root.assertions().iter().all(|a| a.is_elided()));
    assert!(root.is_equivalent_to(&e));
}

#[test]
fn proof_contains_target_confirms_against_fully_elided_root() {
    let e = alice_friends();
    let root = e.elide_revealing_set(&HashSet::new());
    let knows_bob = Envelope::new_assertion("knows", "Bob");
    let proof = e.proof_contains_target(&knows_bob).unwrap();
    assert!(e.is_equivalent_to(&proof));
    assert!(root.confirm_contains_target(&knows_bob, &proof));
}

#[test]
fn proof_fails_for_digest_not_present() {
    let e = alice_friends();
    let knows_eve = Envelope::new_assertion("knows", "Eve");
    assert!(e.proof_contains_target(&knows_eve).is_none());
}

#[test]
fn proof_does_not_confirm_absent_target() {
    let e = alice_friends();
    let root = e.elide_revealing_set(&HashSet::new());
    let knows_bob = Envelope::new_assertion("knows", "Bob");
    let knows_eve = Envelope::new_assertion("knows", "Eve");
    let proof = e.proof_contains_target(&knows_bob).unwrap();
    assert!(!root.confirm_contains_target(&knows_eve, &proof));
}

#[test]
fn cbor_roundtrip_preserves_digest() {
    let e = alice_friends();
    let data = e.to_cbor_data();
    let decoded = Envelope::try_from_cbor_data(&data).unwrap();
    assert!(decoded.is_equivalent_to(&e));
    assert_eq!(decoded.to_cbor_data(), data);
}

#[test]
fn byte_string_leaf_roundtrips() {
    let bytes = ByteString::from([1u8, 2, 3, 4]);
    let e = Envelope::new_leaf(bytes.clone());
    let data = e.to_cbor_data();
    let decoded = Envelope::try_from_cbor_data(&data).unwrap();
    let out: ByteString = decoded.try_leaf().unwrap().try_into().unwrap();
    assert_eq!(out, bytes);
}

#[test]
fn walk_visits_every_element_once_per_structure() {
    let e = alice_friends();
    let mut count = 0usize;
    e.walk(false, (), &mut |_env: &Envelope, _depth, _edge, state| {
        count += 1;
        (state, false)
    });
    // subject + 3 assertion nodes + (predicate, object) each = 1 + 3 + 1 + 6
    assert_eq!(count, 1 + 3 + 1 + 6);
}

#[test]
fn walk_can_stop_descent() {
    let e = alice_friends();
    let mut visited_assertions = 0usize;
    e.walk(false, (), &mut |_env: &Envelope, _depth, edge, state| {
        if edge == EdgeType::Assertion {
            visited_assertions += 1;
            return (state, true);
        }
        (state, false)
    });
    assert_eq!(visited_assertions, 3);
}

#[test]
fn replace_subject_preserves_assertions() {
    let e = alice_knows_bob();
    let replaced = e.clone().replace_subject("Alicia");
    assert_eq!(replaced.assertions().len(), 1);
    let subj: String = replaced.extract_subject().unwrap();
    assert_eq!(subj, "Alicia");
}

#[test]
fn remove_assertion_collapses_to_bare_subject() {
    let e = alice_knows_bob();
    let target = e.assertions()[0].clone();
    let removed = e.remove_assertion(&target);
    assert!(!removed.is_node());
    let subj: String = removed.extract_subject().unwrap();
    assert_eq!(subj, "Alice");
}
