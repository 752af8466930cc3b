use super::*;

fn roundtrip(cbor: CBOR, expected_hex: &str) {
    let data = cbor.to_cbor_data();
    assert_eq!(hex::encode(&data), expected_hex);
    let decoded = CBOR::try_from_data(&data).unwrap();
    assert_eq!(decoded, cbor);
}

#[test]
fn conformance_table() {
    roundtrip(0u64.into(), "00");
    roundtrip(23u64.into(), "17");
    roundtrip(24u64.into(), "1818");
    roundtrip(65535u64.into(), "19ffff");
    roundtrip((-1i64).into(), "20");
    roundtrip((-128i64).into(), "387f");
    roundtrip("Hello".into(), "6548656c6c6f");
    roundtrip(ByteString::from([0x00, 0x11, 0x22, 0x33]).into(), "4400112233");
    roundtrip(vec![1, 2, 3].into(), "83010203");
    roundtrip(CBOR::to_tagged_value(1, "Hello"), "c16548656c6c6f");
    roundtrip(1.5.into(), "f93e00");
    roundtrip(1.2.into(), "fb3ff3333333333333");
    roundtrip(42.0.into(), "182a");
    roundtrip(f64::NAN.into(), "f97e00");
    roundtrip(f64::INFINITY.into(), "f97c00");
}

#[test]
fn conformance_map() {
    let mut m = Map::new();
    m.insert(10, 1);
    m.insert(100, 2);
    m.insert(-1, 3);
    m.insert("z", 4);
    m.insert("aa", 5);
    m.insert(vec![100], 6);
    m.insert(vec![-1], 7);
    m.insert(false, 8);
    let cbor: CBOR = m.into();
    assert_eq!(
        cbor.hex(),
        "a80a011864022003617a046261610581186406812007f408"
    );
}

#[test]
fn rejects_non_canonical_numeric_width() {
    let err = CBOR::try_from_hex("1817").unwrap_err();
    assert_eq!(err, Error::NonCanonicalNumeric);
}

#[test]
fn rejects_misordered_map_keys() {
    let err = CBOR::try_from_hex("a2026141016142").unwrap_err();
    assert_eq!(err, Error::MisorderedMapKey);
}

#[test]
fn rejects_non_nfc_string() {
    let err = CBOR::try_from_hex("6365cc81").unwrap_err();
    assert_eq!(err, Error::NonCanonicalString);
}

#[test]
fn rejects_non_canonical_nan() {
    let err = CBOR::try_from_hex("f97e01").unwrap_err();
    assert_eq!(err, Error::NonCanonicalNumeric);
}

#[test]
fn rejects_reducible_float() {
    let err = CBOR::try_from_hex("fb3ff8000000000000").unwrap_err();
    assert_eq!(err, Error::NonCanonicalNumeric);
}

#[test]
fn rejects_unused_data() {
    let err = CBOR::try_from_hex("0001").unwrap_err();
    assert_eq!(err, Error::UnusedData(1));
}

#[test]
fn duplicate_map_key_is_rejected() {
    // {1:1, 1:2}
    let err = CBOR::try_from_hex("a2010101 02".replace(' ', "").as_str()).unwrap_err();
    assert_eq!(err, Error::DuplicateMapKey);
}

#[test]
fn normalized_string_equivalence() {
    let composed = "\u{00E9}";
    let decomposed = "\u{0065}\u{0301}";
    let a = CBOR::from(composed).to_cbor_data();
    let b = CBOR::from(decomposed).to_cbor_data();
    assert_eq!(a, b);
}

#[test]
fn heterogeneous_array_roundtrip() {
    let array: Vec<CBOR> = vec![1.into(), "Hello".into(), vec![1, 2, 3].into()];
    let cbor: CBOR = array.clone().into();
    let data = cbor.to_cbor_data();
    let decoded = CBOR::try_from_data(&data).unwrap();
    assert_eq!(decoded, cbor);
    assert_eq!(decoded.diagnostic_flat(), r#"[1, "Hello", [1, 2, 3]]"#);
}

#[test]
fn idempotence_of_canonicalisation() {
    let v: CBOR = vec![1, 2, 3].into();
    let once = v.to_cbor_data();
    let decoded = CBOR::try_from_data(&once).unwrap();
    let twice = decoded.to_cbor_data();
    assert_eq!(once, twice);
}

#[test]
fn negative_encoded_as_65_bit_decodes() {
    // Only representable via direct hex decode, not constructible from i64.
    let decoded = CBOR::try_from_hex("3bffffffffffffffff").unwrap();
    match decoded.as_case() {
        CBORCase::Negative(n) => assert_eq!(*n, u64::MAX),
        _ => panic!("expected negative"),
    }
}

#[test]
fn small_float_bit_patterns_are_not_mistaken_for_oversized_integer_heads() {
    // The smallest positive f16 subnormal: argument bits are numerically
    // tiny, but this is a float head, not an integer head, so the
    // minimal-width check must not apply to it.
    let f16_subnormal = CBOR::try_from_hex("f90001").unwrap();
    assert_eq!(f16_subnormal.to_cbor_data(), hex::decode("f90001").unwrap());

    // The smallest positive f32 subnormal, likewise.
    let f32_subnormal = CBOR::try_from_hex("fa00000001").unwrap();
    assert_eq!(f32_subnormal.to_cbor_data(), hex::decode("fa00000001").unwrap());
}
