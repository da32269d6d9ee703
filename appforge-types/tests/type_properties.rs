//! Property-based tests for the core types.
//!
//! These pin the contracts the entity layer leans on:
//! - identifier string round-trips are lossless
//! - coercion is deterministic and idempotent
//! - the ring buffer never exceeds capacity and keeps the latest N in
//!   insertion order

use appforge_types::cast;
use appforge_types::{Circular, ResourceId};
use proptest::prelude::*;

proptest! {
    #[test]
    fn resource_id_roundtrips_through_display(v in any::<u64>()) {
        let id = ResourceId::new(v);
        let parsed = ResourceId::parse(&id.to_string()).unwrap();
        prop_assert_eq!(id, parsed);
    }

    #[test]
    fn resource_id_roundtrips_through_serde(v in any::<u64>()) {
        let id = ResourceId::new(v);
        let json = serde_json::to_string(&id).unwrap();
        let back: ResourceId = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(id, back);
    }

    #[test]
    fn bool_coercion_is_deterministic(s in ".*") {
        let v = serde_json::Value::String(s);
        prop_assert_eq!(cast::coerce_bool(&v), cast::coerce_bool(&v));
    }

    #[test]
    fn id_coercion_never_panics(s in ".*") {
        let _ = cast::to_id(&serde_json::Value::String(s));
    }

    #[test]
    fn epoch_roundtrips_through_datetime(ms in 1i64..4_102_444_800_000i64) {
        let dt = cast::to_datetime(&serde_json::json!(ms)).unwrap();
        prop_assert_eq!(dt.timestamp_millis(), ms);
    }

    #[test]
    fn ring_buffer_keeps_last_n(cap in 1usize..16, items in prop::collection::vec(any::<i32>(), 0..64)) {
        let mut cc = Circular::new(cap);
        for &it in &items {
            cc.push(it);
        }

        prop_assert!(cc.len() <= cap);

        let expect: Vec<i32> = items
            .iter()
            .copied()
            .skip(items.len().saturating_sub(cap))
            .collect();
        prop_assert_eq!(cc.to_vec(), expect);
    }
}
