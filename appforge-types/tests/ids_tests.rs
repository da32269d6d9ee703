use appforge_types::ResourceId;
use std::str::FromStr;

// ── Sentinel ─────────────────────────────────────────────────────

#[test]
fn default_is_unset() {
    assert_eq!(ResourceId::default(), ResourceId::NONE);
    assert!(!ResourceId::default().is_set());
}

#[test]
fn zero_is_unset() {
    assert!(!ResourceId::new(0).is_set());
    assert_eq!(ResourceId::new(0), ResourceId::NONE);
}

#[test]
fn nonzero_is_set() {
    assert!(ResourceId::new(42).is_set());
}

// ── Parsing ──────────────────────────────────────────────────────

#[test]
fn parse_decimal_string() {
    let id = ResourceId::parse("282224072518296067").unwrap();
    assert_eq!(id.value(), 282_224_072_518_296_067);
}

#[test]
fn parse_empty_is_unset() {
    assert_eq!(ResourceId::parse("").unwrap(), ResourceId::NONE);
}

#[test]
fn parse_invalid_errors() {
    assert!(ResourceId::parse("not-a-number").is_err());
    assert!(ResourceId::from_str("12x").is_err());
}

#[test]
fn display_and_parse_roundtrip() {
    let id = ResourceId::new(9_007_199_254_740_993);
    let parsed = ResourceId::parse(&id.to_string()).unwrap();
    assert_eq!(id, parsed);
}

// ── Serde ────────────────────────────────────────────────────────

#[test]
fn serializes_as_decimal_string() {
    let id = ResourceId::new(282_224_072_518_296_067);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, r#""282224072518296067""#);
}

#[test]
fn deserializes_from_string() {
    let id: ResourceId = serde_json::from_str(r#""123""#).unwrap();
    assert_eq!(id.value(), 123);
}

#[test]
fn deserializes_from_integer() {
    let id: ResourceId = serde_json::from_str("123").unwrap();
    assert_eq!(id.value(), 123);
}

#[test]
fn deserialize_rejects_garbage() {
    assert!(serde_json::from_str::<ResourceId>(r#""abc""#).is_err());
    assert!(serde_json::from_str::<ResourceId>("true").is_err());
}
