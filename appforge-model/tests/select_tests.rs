use appforge_model::field::{FieldOptions, SelectDisplayType, SelectOption, SelectOptionStyle};
use appforge_model::{FieldRegistry, ModuleField};
use pretty_assertions::assert_eq;
use serde_json::json;

fn select_options(field: &ModuleField) -> &appforge_model::field::SelectOptions {
    match &field.options {
        FieldOptions::Select(o) => o,
        other => panic!("expected Select options, got {}", other.kind()),
    }
}

// ── Defaults ─────────────────────────────────────────────────────

#[test]
fn empty_input_yields_full_defaults() {
    let registry = FieldRegistry::with_builtins();
    let field = registry.construct(&json!({"kind": "Select"}));

    let o = select_options(&field);
    assert_eq!(o.options, vec![]);
    assert_eq!(o.select_type, "default");
    assert_eq!(o.multi_delimiter, "\n");
    assert_eq!(o.display_type, SelectDisplayType::Text);
    assert!(!o.unique_multi_value);
}

#[test]
fn defaults_are_not_shared_between_instances() {
    let registry = FieldRegistry::with_builtins();

    let mut a = registry.construct(&json!({"kind": "Select"}));
    let b = registry.construct(&json!({"kind": "Select"}));

    if let FieldOptions::Select(o) = &mut a.options {
        o.options.push(SelectOption {
            value: "mutated".into(),
            text: "mutated".into(),
            style: SelectOptionStyle::default(),
        });
        o.select_type = "multiple".into();
    }

    let bo = select_options(&b);
    assert_eq!(bo.options, vec![]);
    assert_eq!(bo.select_type, "default");
}

// ── Option list normalization ────────────────────────────────────

#[test]
fn string_list_becomes_value_text_records() {
    let registry = FieldRegistry::with_builtins();
    let field = registry.construct(&json!({
        "kind": "Select",
        "options": {"options": ["a", "b"]},
    }));

    let o = select_options(&field);
    assert_eq!(
        o.options,
        vec![
            SelectOption {
                value: "a".into(),
                text: "a".into(),
                style: SelectOptionStyle {
                    text_color: String::new(),
                    background_color: String::new(),
                },
            },
            SelectOption {
                value: "b".into(),
                text: "b".into(),
                style: SelectOptionStyle {
                    text_color: String::new(),
                    background_color: String::new(),
                },
            },
        ],
    );
}

#[test]
fn partial_records_fill_missing_attributes() {
    let registry = FieldRegistry::with_builtins();
    let field = registry.construct(&json!({
        "kind": "Select",
        "options": {"options": [{"value": "x", "text": "X", "style": {"textColor": "#fff"}}]},
    }));

    let o = select_options(&field);
    assert_eq!(o.options.len(), 1);
    assert_eq!(o.options[0].value, "x");
    assert_eq!(o.options[0].text, "X");
    assert_eq!(o.options[0].style.text_color, "#fff");
    assert_eq!(o.options[0].style.background_color, "");
}

#[test]
fn record_without_style_gets_empty_style() {
    let registry = FieldRegistry::with_builtins();
    let field = registry.construct(&json!({
        "kind": "Select",
        "options": {"options": [{"value": "y"}]},
    }));

    let o = select_options(&field);
    assert_eq!(o.options[0].text, "");
    assert_eq!(o.options[0].style, SelectOptionStyle::default());
}

#[test]
fn mixed_list_normalizes_each_element() {
    let registry = FieldRegistry::with_builtins();
    let field = registry.construct(&json!({
        "kind": "Select",
        "options": {"options": ["bare", {"value": "v", "text": "T"}, 42, null]},
    }));

    let o = select_options(&field);
    assert_eq!(o.options.len(), 2);
    assert_eq!(o.options[0].value, "bare");
    assert_eq!(o.options[0].text, "bare");
    assert_eq!(o.options[1].value, "v");
    assert_eq!(o.options[1].text, "T");
}

#[test]
fn absent_options_list_leaves_existing_untouched() {
    let registry = FieldRegistry::with_builtins();
    let mut field = registry.construct(&json!({
        "kind": "Select",
        "options": {"options": ["keep"]},
    }));

    field.apply(&json!({"options": {"selectType": "multiple"}}));

    let o = select_options(&field);
    assert_eq!(o.options.len(), 1);
    assert_eq!(o.options[0].value, "keep");
    assert_eq!(o.select_type, "multiple");
}

#[test]
fn supplied_list_replaces_wholesale() {
    let registry = FieldRegistry::with_builtins();
    let mut field = registry.construct(&json!({
        "kind": "Select",
        "options": {"options": ["a", "b", "c"]},
    }));

    field.apply(&json!({"options": {"options": ["z"]}}));

    let o = select_options(&field);
    assert_eq!(o.options.len(), 1);
    assert_eq!(o.options[0].value, "z");
}

// ── Scalar option attributes ─────────────────────────────────────

#[test]
fn scalar_attributes_coerce() {
    let registry = FieldRegistry::with_builtins();
    let field = registry.construct(&json!({
        "kind": "Select",
        "options": {
            "selectType": "multiple",
            "multiDelimiter": ",",
            "isUniqueMultiValue": true,
            "displayType": "badge",
        },
    }));

    let o = select_options(&field);
    assert_eq!(o.select_type, "multiple");
    assert_eq!(o.multi_delimiter, ",");
    assert!(o.unique_multi_value);
    assert_eq!(o.display_type, SelectDisplayType::Badge);
}

#[test]
fn unknown_display_type_falls_back_to_text() {
    let registry = FieldRegistry::with_builtins();
    let field = registry.construct(&json!({
        "kind": "Select",
        "options": {"displayType": "hologram"},
    }));

    assert_eq!(select_options(&field).display_type, SelectDisplayType::Text);
}

// ── Determinism ──────────────────────────────────────────────────

#[test]
fn repeated_construction_is_deterministic() {
    let registry = FieldRegistry::with_builtins();
    let raw = json!({
        "kind": "Select",
        "options": {"options": ["a", {"value": "b"}], "selectType": "multiple"},
    });

    let one = registry.construct(&raw);
    let two = registry.construct(&raw);
    assert_eq!(one, two);
}
