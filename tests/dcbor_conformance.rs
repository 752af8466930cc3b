use gordian_envelope::prelude::*;
use hex_literal::hex;
use indoc::indoc;

#[test]
fn decodes_a_known_dcbor_byte_sequence() {
    let data = hex!("a3616101616202616303");
    let cbor = CBOR::try_from_data(data).unwrap();
    assert_eq!(cbor.diagnostic_flat(), r#"{"a": 1, "b": 2, "c": 3}"#);
    assert_eq!(cbor.to_cbor_data(), data);
}

#[test]
fn pretty_diagnostic_indents_two_spaces_per_level() {
    let mut map = Map::new();
    map.insert("a", 1);
    map.insert("b", vec![2, 3]);
    let cbor: CBOR = map.into();
    assert_eq!(
        cbor.diagnostic_pretty(),
        indoc! {r#"
            {
              "a": 1,
              "b": [
                2,
                3
              ]
            }"#}
    );
}

#[test]
fn integer_minimal_width_roundtrip() {
    for (value, hex) in [(0u64, "00"), (23, "17"), (24, "1818"), (255, "18ff"), (256, "190100")] {
        let cbor: CBOR = value.into();
        assert_eq!(cbor.hex(), hex);
        assert_eq!(CBOR::try_from_hex(hex).unwrap(), cbor);
    }
}

#[test]
fn float_cascades_to_shortest_exact_form() {
    assert_eq!(CBOR::from(1.5).hex(), "f93e00");
    assert_eq!(CBOR::from(42.0).hex(), "182a");
    assert_eq!(CBOR::from(f64::NAN).hex(), "f97e00");
}

#[test]
fn map_keys_sort_by_encoded_bytes() {
    let mut map = Map::new();
    map.insert("b", 1);
    map.insert("a", 2);
    map.insert(1, 3);
    let cbor: CBOR = map.into();
    assert_eq!(cbor.diagnostic_flat(), r#"{1: 3, "a": 2, "b": 1}"#);
}

#[test]
fn tag_registry_resolves_diagnostic_names() {
    register_tag(known_tags::DATE, "date");
    let cbor = CBOR::to_tagged_value(known_tags::DATE, "2026-07-26");
    assert_eq!(cbor.diagnostic_flat(), r#"date("2026-07-26")"#);
}

#[test]
fn rejects_non_canonical_encodings() {
    assert_eq!(CBOR::try_from_hex("1817").unwrap_err(), Error::NonCanonicalNumeric);
    assert_eq!(CBOR::try_from_hex("a2026141016142").unwrap_err(), Error::MisorderedMapKey);
}

#[test]
fn hex_dump_annotates_every_head() {
    let cbor: CBOR = vec![1u8, 2, 3].into();
    let dump = cbor.hex_dump();
    assert!(dump.contains("array"));
    assert_eq!(dump.lines().count(), 4);
}
