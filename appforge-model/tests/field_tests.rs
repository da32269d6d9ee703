use appforge_model::field::FieldOptions;
use appforge_model::{ModuleField, Resource};
use appforge_types::ResourceId;
use pretty_assertions::assert_eq;
use serde_json::json;

// ── Common attributes ────────────────────────────────────────────

#[test]
fn common_attributes_coerce() {
    let field = ModuleField::new(&json!({
        "kind": "Text",
        "fieldID": "2921",
        "name": "title",
        "label": "Title",
        "place": 2,
        "isRequired": true,
        "isMulti": false,
        "createdAt": "2022-01-02T03:04:05Z",
    }));

    assert_eq!(field.field_id.value(), 2921);
    assert_eq!(field.name, "title");
    assert_eq!(field.label, "Title");
    assert_eq!(field.place, 2);
    assert!(field.required);
    assert!(!field.multi);
    assert!(field.audit.created_at.is_some());
    assert!(!field.audit.is_deleted());
}

#[test]
fn empty_input_yields_valid_defaults() {
    let field = ModuleField::new(&json!({}));

    assert_eq!(field.field_id, ResourceId::NONE);
    assert_eq!(field.kind(), "");
    assert_eq!(field.name, "");
    assert!(!field.required);
    assert!(matches!(field.options, FieldOptions::Generic(_)));
}

#[test]
fn apply_never_changes_kind() {
    let mut field = ModuleField::with_kind("Number", &json!({}));
    field.apply(&json!({"kind": "Select", "name": "renamed"}));

    assert_eq!(field.kind(), "Number");
    assert_eq!(field.name, "renamed");
}

#[test]
fn resource_identity() {
    let field = ModuleField::new(&json!({"kind": "Text", "fieldID": "7"}));
    assert_eq!(field.resource_type(), "compose:module-field");
    assert_eq!(field.resource_id(), "compose:module-field:7");
}

// ── Variant option attributes ────────────────────────────────────

#[test]
fn text_options_coerce() {
    let field = ModuleField::new(&json!({
        "kind": "Text",
        "options": {"maxLength": 120, "multiLine": true, "useRichInput": false},
    }));

    match &field.options {
        FieldOptions::Text(o) => {
            assert_eq!(o.max_length, 120);
            assert!(o.multi_line);
            assert!(!o.use_rich_input);
        }
        other => panic!("expected Text options, got {}", other.kind()),
    }
}

#[test]
fn number_options_coerce() {
    let field = ModuleField::new(&json!({
        "kind": "Number",
        "options": {"precision": 2, "multiplier": 0.01, "prefix": "$", "suffix": "net"},
    }));

    match &field.options {
        FieldOptions::Number(o) => {
            assert_eq!(o.precision, 2);
            assert_eq!(o.multiplier, 0.01);
            assert_eq!(o.prefix, "$");
            assert_eq!(o.suffix, "net");
        }
        other => panic!("expected Number options, got {}", other.kind()),
    }
}

#[test]
fn number_multiplier_defaults_to_identity() {
    let field = ModuleField::new(&json!({"kind": "Number"}));

    match &field.options {
        FieldOptions::Number(o) => assert_eq!(o.multiplier, 1.0),
        other => panic!("expected Number options, got {}", other.kind()),
    }
}

#[test]
fn checkbox_options_coerce() {
    let field = ModuleField::new(&json!({
        "kind": "Checkbox",
        "options": {"trueLabel": "yes", "falseLabel": "no"},
    }));

    match &field.options {
        FieldOptions::Checkbox(o) => {
            assert_eq!(o.true_label, "yes");
            assert_eq!(o.false_label, "no");
        }
        other => panic!("expected Checkbox options, got {}", other.kind()),
    }
}

#[test]
fn datetime_options_coerce() {
    let field = ModuleField::new(&json!({
        "kind": "DateTime",
        "options": {"onlyDate": true, "onlyFutureValues": true},
    }));

    match &field.options {
        FieldOptions::DateTime(o) => {
            assert!(o.only_date);
            assert!(!o.only_time);
            assert!(o.only_future_values);
            assert!(!o.only_past_values);
        }
        other => panic!("expected DateTime options, got {}", other.kind()),
    }
}

#[test]
fn non_object_options_are_ignored() {
    let field = ModuleField::new(&json!({"kind": "Text", "options": "garbage"}));

    match &field.options {
        FieldOptions::Text(o) => assert_eq!(*o, Default::default()),
        other => panic!("expected Text options, got {}", other.kind()),
    }
}

// ── Serialization ────────────────────────────────────────────────

#[test]
fn serialized_field_carries_recognized_input() {
    let field = ModuleField::new(&json!({
        "kind": "Select",
        "fieldID": "11",
        "name": "state",
        "options": {"options": ["open", "closed"]},
        "ignoredExtra": "dropped",
    }));

    let out = serde_json::to_value(&field).unwrap();
    assert_eq!(out["kind"], "Select");
    assert_eq!(out["fieldID"], "11");
    assert_eq!(out["name"], "state");
    assert_eq!(out["options"]["options"][0]["value"], "open");
    assert_eq!(out["options"]["options"][1]["text"], "closed");
    assert!(out.get("ignoredExtra").is_none());
}

#[test]
fn field_roundtrips_through_serde() {
    let field = ModuleField::new(&json!({
        "kind": "Select",
        "fieldID": "11",
        "name": "state",
        "isMulti": true,
        "options": {
            "options": [{"value": "a", "text": "A", "style": {"backgroundColor": "#000"}}],
            "selectType": "multiple",
        },
    }));

    let json = serde_json::to_string(&field).unwrap();
    let back: ModuleField = serde_json::from_str(&json).unwrap();
    assert_eq!(back, field);
}

#[test]
fn deserialization_is_as_lenient_as_construction() {
    let back: ModuleField = serde_json::from_value(json!({
        "kind": "Select",
        "options": {"options": ["a"]},
    }))
    .unwrap();

    assert_eq!(back, ModuleField::new(&json!({
        "kind": "Select",
        "options": {"options": ["a"]},
    })));
}
