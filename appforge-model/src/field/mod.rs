//! Compose module fields.
//!
//! A module field is one concrete shape out of a polymorphic family,
//! distinguished by its `kind` discriminant. The built-in kinds are a
//! closed set modeled as [`FieldOptions`]; reconstruction from untyped
//! input (and open extension with new kinds) goes through
//! [`crate::FieldRegistry`].

mod checkbox;
mod datetime;
mod generic;
mod number;
mod select;
mod text;

pub use checkbox::CheckboxOptions;
pub use datetime::DateTimeOptions;
pub use generic::GenericOptions;
pub use number::NumberOptions;
pub use select::{SelectDisplayType, SelectOption, SelectOptionStyle, SelectOptions};
pub use text::TextOptions;

use crate::{Audit, Resource};
use appforge_types::cast::Apply;
use appforge_types::ResourceId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A field of a compose module.
///
/// Constructed from raw input via [`ModuleField::new`] (kind taken from
/// the input) or [`crate::FieldRegistry::construct`]. Construction is
/// total: any input yields a valid, fully-defaulted instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ModuleField {
    #[serde(rename = "fieldID")]
    pub field_id: ResourceId,
    pub name: String,
    pub label: String,
    pub place: u16,
    #[serde(rename = "isRequired")]
    pub required: bool,
    #[serde(rename = "isMulti")]
    pub multi: bool,

    #[serde(flatten)]
    pub audit: Audit,

    #[serde(flatten)]
    pub options: FieldOptions,
}

impl ModuleField {
    /// Constructs a field, reading the kind discriminant from `raw`.
    #[must_use]
    pub fn new(raw: &Value) -> Self {
        let kind = raw.get("kind").and_then(Value::as_str).unwrap_or_default();
        Self::with_kind(kind, raw)
    }

    /// Constructs a field of the given kind, then overlays `raw`.
    ///
    /// Unknown kinds yield the generic fallback carrying the kind string.
    #[must_use]
    pub fn with_kind(kind: &str, raw: &Value) -> Self {
        let mut f = Self {
            options: FieldOptions::defaults_for(kind),
            ..Self::default()
        };
        f.apply(raw);
        f
    }

    /// Overlays attributes defined in `raw`. The kind discriminant is
    /// fixed at construction and never changed by apply.
    pub fn apply(&mut self, raw: &Value) {
        let a = Apply::new(raw);

        a.id(&mut self.field_id, "fieldID");
        a.string(&mut self.name, "name");
        a.string(&mut self.label, "label");
        a.u16(&mut self.place, "place");
        a.bool(&mut self.required, "isRequired");
        a.bool(&mut self.multi, "isMulti");

        self.audit.apply(raw);

        if let Some(options) = a.get("options") {
            self.options.apply(options);
        }
    }

    /// The field's kind discriminant.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.options.kind()
    }
}

impl Resource for ModuleField {
    fn resource_type(&self) -> &'static str {
        "compose:module-field"
    }

    fn id(&self) -> ResourceId {
        self.field_id
    }
}

/// Option attributes shared by every field kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CommonOptions {
    pub description: String,
    pub hint: String,
}

impl CommonOptions {
    /// Overlays the shared option attributes defined in `raw`.
    pub fn apply(&mut self, raw: &Value) {
        let a = Apply::new(raw);

        a.string(&mut self.description, "description");
        a.string(&mut self.hint, "hint");
    }
}

/// Kind-specific options of a module field; the variant is the kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldOptions {
    Select(SelectOptions),
    Text(TextOptions),
    Number(NumberOptions),
    Checkbox(CheckboxOptions),
    DateTime(DateTimeOptions),
    /// Fallback for unregistered kinds; keeps the raw discriminant.
    Generic(GenericOptions),
}

impl FieldOptions {
    /// The built-in kind discriminants.
    pub const KINDS: [&'static str; 5] = ["Select", "Text", "Number", "Checkbox", "DateTime"];

    /// Fresh defaults for the given kind; unknown kinds get the generic
    /// fallback carrying the discriminant as-is.
    #[must_use]
    pub fn defaults_for(kind: &str) -> Self {
        match kind {
            "Select" => Self::Select(SelectOptions::default()),
            "Text" => Self::Text(TextOptions::default()),
            "Number" => Self::Number(NumberOptions::default()),
            "Checkbox" => Self::Checkbox(CheckboxOptions::default()),
            "DateTime" => Self::DateTime(DateTimeOptions::default()),
            other => Self::Generic(GenericOptions::with_kind(other)),
        }
    }

    /// Defaults for `kind` overlaid with `raw` option input.
    #[must_use]
    pub fn from_kind(kind: &str, raw: &Value) -> Self {
        let mut o = Self::defaults_for(kind);
        o.apply(raw);
        o
    }

    /// The kind discriminant this options value belongs to.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Select(_) => "Select",
            Self::Text(_) => "Text",
            Self::Number(_) => "Number",
            Self::Checkbox(_) => "Checkbox",
            Self::DateTime(_) => "DateTime",
            Self::Generic(o) => &o.kind,
        }
    }

    /// The option attributes shared by all kinds.
    #[must_use]
    pub fn common(&self) -> &CommonOptions {
        match self {
            Self::Select(o) => &o.common,
            Self::Text(o) => &o.common,
            Self::Number(o) => &o.common,
            Self::Checkbox(o) => &o.common,
            Self::DateTime(o) => &o.common,
            Self::Generic(o) => &o.common,
        }
    }

    /// Overlays option attributes defined in `raw`; non-object input is
    /// a no-op.
    pub fn apply(&mut self, raw: &Value) {
        match self {
            Self::Select(o) => o.apply(raw),
            Self::Text(o) => o.apply(raw),
            Self::Number(o) => o.apply(raw),
            Self::Checkbox(o) => o.apply(raw),
            Self::DateTime(o) => o.apply(raw),
            Self::Generic(o) => o.apply(raw),
        }
    }
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self::Generic(GenericOptions::default())
    }
}

// The wire shape is adjacently tagged ({"kind": ..., "options": {...}})
// and flattened into the surrounding field object. Deserialization runs
// through the same defaults-then-apply path as construction so both are
// equally lenient.
impl Serialize for FieldOptions {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Tagged<'a, T> {
            kind: &'a str,
            options: &'a T,
        }

        match self {
            Self::Select(o) => Tagged { kind: "Select", options: o }.serialize(serializer),
            Self::Text(o) => Tagged { kind: "Text", options: o }.serialize(serializer),
            Self::Number(o) => Tagged { kind: "Number", options: o }.serialize(serializer),
            Self::Checkbox(o) => Tagged { kind: "Checkbox", options: o }.serialize(serializer),
            Self::DateTime(o) => Tagged { kind: "DateTime", options: o }.serialize(serializer),
            Self::Generic(o) => Tagged { kind: &o.kind, options: o }.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for FieldOptions {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(default)]
        struct Tagged {
            kind: String,
            options: Value,
        }

        impl Default for Tagged {
            fn default() -> Self {
                Self {
                    kind: String::new(),
                    options: Value::Null,
                }
            }
        }

        let raw = Tagged::deserialize(deserializer)?;
        Ok(Self::from_kind(&raw.kind, &raw.options))
    }
}
