use appforge_types::cast::{self, Apply};
use appforge_types::ResourceId;
use chrono::{TimeZone, Utc};
use serde_json::json;

// ── Apply presence semantics ─────────────────────────────────────

#[test]
fn absent_key_leaves_target_untouched() {
    let raw = json!({});
    let apply = Apply::new(&raw);

    let mut s = "keep".to_string();
    apply.string(&mut s, "handle");
    assert_eq!(s, "keep");

    let mut b = true;
    apply.bool(&mut b, "enabled");
    assert!(b);

    let mut id = ResourceId::new(7);
    apply.id(&mut id, "ownerID");
    assert_eq!(id.value(), 7);
}

#[test]
fn present_null_assigns_coerced_default() {
    let raw = json!({"handle": null, "enabled": null});
    let apply = Apply::new(&raw);

    let mut s = "keep".to_string();
    apply.string(&mut s, "handle");
    assert_eq!(s, "");

    let mut b = true;
    apply.bool(&mut b, "enabled");
    assert!(!b);
}

#[test]
fn non_object_source_behaves_as_empty() {
    let raw = json!(["not", "an", "object"]);
    let apply = Apply::new(&raw);
    assert!(!apply.has("anything"));

    let mut s = "keep".to_string();
    apply.string(&mut s, "anything");
    assert_eq!(s, "keep");
}

#[test]
fn present_values_assign() {
    let raw = json!({"handle": "wf_one", "enabled": false, "place": 3});
    let apply = Apply::new(&raw);

    let mut s = String::new();
    apply.string(&mut s, "handle");
    assert_eq!(s, "wf_one");

    let mut b = true;
    apply.bool(&mut b, "enabled");
    assert!(!b);

    let mut p = 0u16;
    apply.u16(&mut p, "place");
    assert_eq!(p, 3);
}

// ── String coercion ──────────────────────────────────────────────

#[test]
fn string_coercion_renders_scalars() {
    assert_eq!(cast::coerce_string(&json!("x")), "x");
    assert_eq!(cast::coerce_string(&json!(42)), "42");
    assert_eq!(cast::coerce_string(&json!(true)), "true");
    assert_eq!(cast::coerce_string(&json!(null)), "");
    assert_eq!(cast::coerce_string(&json!({"a": 1})), "");
    assert_eq!(cast::coerce_string(&json!([1])), "");
}

// ── Boolean coercion ─────────────────────────────────────────────

#[test]
fn bool_coercion_is_truthiness() {
    assert!(!cast::coerce_bool(&json!(null)));
    assert!(!cast::coerce_bool(&json!(false)));
    assert!(!cast::coerce_bool(&json!(0)));
    assert!(!cast::coerce_bool(&json!("")));

    assert!(cast::coerce_bool(&json!(true)));
    assert!(cast::coerce_bool(&json!(1)));
    assert!(cast::coerce_bool(&json!("false")));
    assert!(cast::coerce_bool(&json!([])));
}

// ── Date coercion ────────────────────────────────────────────────

#[test]
fn date_from_iso_string() {
    let dt = cast::to_datetime(&json!("2023-04-05T06:07:08Z")).unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap());
}

#[test]
fn date_from_offset_string_normalizes_to_utc() {
    let dt = cast::to_datetime(&json!("2023-04-05T08:07:08+02:00")).unwrap();
    assert_eq!(dt, Utc.with_ymd_and_hms(2023, 4, 5, 6, 7, 8).unwrap());
}

#[test]
fn date_from_epoch_millis() {
    let dt = cast::to_datetime(&json!(1_680_674_828_000i64)).unwrap();
    assert_eq!(dt.timestamp_millis(), 1_680_674_828_000);
}

#[test]
fn date_unset_inputs_are_none() {
    assert_eq!(cast::to_datetime(&json!(0)), None);
    assert_eq!(cast::to_datetime(&json!(null)), None);
    assert_eq!(cast::to_datetime(&json!("not a date")), None);
    assert_eq!(cast::to_datetime(&json!({})), None);
}

#[test]
fn apply_date_clears_on_present_null() {
    let raw = json!({"deletedAt": null});
    let apply = Apply::new(&raw);

    let mut dt = Some(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap());
    apply.date(&mut dt, "deletedAt");
    assert_eq!(dt, None);
}

// ── ID coercion ──────────────────────────────────────────────────

#[test]
fn id_from_string_and_number() {
    assert_eq!(cast::to_id(&json!("123")).value(), 123);
    assert_eq!(cast::to_id(&json!(123)).value(), 123);
}

#[test]
fn id_unset_inputs_are_none_sentinel() {
    assert_eq!(cast::to_id(&json!(0)), ResourceId::NONE);
    assert_eq!(cast::to_id(&json!("")), ResourceId::NONE);
    assert_eq!(cast::to_id(&json!(null)), ResourceId::NONE);
    assert_eq!(cast::to_id(&json!("garbage")), ResourceId::NONE);
    assert_eq!(cast::to_id(&json!(-5)), ResourceId::NONE);
}

// ── Guards ───────────────────────────────────────────────────────

#[test]
fn all_strings_guard() {
    assert!(cast::all_strings(&json!(["a", "b"])));
    assert!(cast::all_strings(&json!([])));
    assert!(!cast::all_strings(&json!(["a", 1])));
    assert!(!cast::all_strings(&json!("a")));
    assert!(!cast::all_strings(&json!(null)));
}
