use std::collections::HashSet;

use gordian_envelope::prelude::*;

#[test]
fn alice_can_prove_she_knows_bob_without_revealing_carol_or_dan() {
    let alice_friends = Envelope::new("Alice")
        .add_assertion("knows", "Bob")
        .add_assertion("knows", "Carol")
        .add_assertion("knows", "Dan");

    let alice_friends_root = alice_friends.elide_revealing_set(&HashSet::new());
    assert!(alice_friends_root.is_node());
    assert!(alice_friends_root.subject().is_elided());
    assert!(alice_friends_root.assertions().iter().all(|a| a.is_elided()));
    assert!(alice_friends_root.is_equivalent_to(&alice_friends));

    let knows_bob = Envelope::new_assertion("knows", "Bob");
    let proof = alice_friends.proof_contains_target(&knows_bob).unwrap();
    assert!(proof.is_equivalent_to(&alice_friends));

    assert!(alice_friends_root.confirm_contains_target(&knows_bob, &proof));

    let knows_eve = Envelope::new_assertion("knows", "Eve");
    assert!(!alice_friends_root.confirm_contains_target(&knows_eve, &proof));
}

#[test]
fn envelope_round_trips_through_cbor_with_a_stable_digest() {
    let e = Envelope::new("Alice")
        .add_assertion("knows", Envelope::new("Bob").add_assertion("email", "bob@example.com"));

    let data = e.to_cbor_data();
    let decoded = Envelope::try_from_cbor_data(&data).unwrap();
    assert!(decoded.is_equivalent_to(&e));
    assert_eq!(decoded.to_cbor_data(), data);
}

#[test]
fn wrapping_an_envelope_hides_it_from_new_assertions() {
    let e = Envelope::new("Alice").add_assertion("knows", "Bob");
    let wrapped = e.clone().wrap();
    let signed = wrapped.clone().add_assertion("note", "reviewed");

    assert!(signed.subject().is_equivalent_to(&wrapped));
    assert_eq!(signed.extract_object_for_predicate::<String>("note").unwrap(), "reviewed");

    let unwrapped = signed.subject().unwrap_envelope().unwrap();
    assert!(unwrapped.is_equivalent_to(&e));
}

#[test]
fn elide_removing_then_unelide_reconstructs_the_original() {
    let e = Envelope::new("Alice").add_assertion("knows", "Bob");
    let bob = Envelope::new("Bob");
    let elided = e.elide_removing_target(&bob);

    assert!(elided.is_equivalent_to(&e));
    assert!(elided.assertions()[0].as_object().unwrap().is_elided());

    let restored = elided.unelide(&e).unwrap();
    assert_eq!(restored.to_cbor_data(), e.to_cbor_data());
}

#[test]
fn tree_format_shows_digest_prefixes_and_edge_labels() {
    let e = Envelope::new("Alice").add_assertion("knows", "Bob");
    let text = e.format();
    assert!(text.contains("NODE"));
    assert!(text.contains("subj"));
    assert!(text.contains("ASSERTION"));
    assert!(text.contains("pred"));
    assert!(text.contains("obj"));
}

#[test]
fn elided_leaf_decodes_back_to_the_original_digest() {
    let bob = Envelope::new("Bob");
    let elided = bob.elide();
    let data = elided.to_cbor_data();
    let decoded = Envelope::try_from_cbor_data(&data).unwrap();
    assert!(decoded.is_elided());
    assert_eq!(decoded.digest(), bob.digest());
}
