use super::CommonOptions;
use appforge_types::cast::Apply;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a selected value is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectDisplayType {
    #[default]
    Text,
    Badge,
}

impl SelectDisplayType {
    fn from_raw(v: &Value) -> Self {
        match v.as_str() {
            Some("badge") => Self::Badge,
            _ => Self::Text,
        }
    }
}

/// Per-option render styling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectOptionStyle {
    pub text_color: String,
    pub background_color: String,
}

/// One selectable option.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOption {
    pub value: String,
    pub text: String,
    pub style: SelectOptionStyle,
}

impl SelectOption {
    /// Normalizes a raw list element into an option record.
    ///
    /// A bare string becomes both value and text with empty styling; an
    /// object fills absent attributes with empty strings; anything else
    /// is not an option and yields `None`. This makes mixed string/record
    /// lists well-defined: each element is handled independently.
    fn from_raw(v: &Value) -> Option<Self> {
        match v {
            Value::String(s) => Some(Self {
                value: s.clone(),
                text: s.clone(),
                style: SelectOptionStyle::default(),
            }),
            Value::Object(_) => {
                let a = Apply::new(v);

                let mut opt = Self::default();
                a.string(&mut opt.value, "value");
                a.string(&mut opt.text, "text");

                if let Some(style) = a.get("style") {
                    let s = Apply::new(style);
                    s.string(&mut opt.style.text_color, "textColor");
                    s.string(&mut opt.style.background_color, "backgroundColor");
                }

                Some(opt)
            }
            _ => None,
        }
    }
}

/// Options of the Select field kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectOptions {
    #[serde(flatten)]
    pub common: CommonOptions,

    pub options: Vec<SelectOption>,
    pub select_type: String,
    pub display_type: SelectDisplayType,
    pub multi_delimiter: String,
    #[serde(rename = "isUniqueMultiValue")]
    pub unique_multi_value: bool,
}

impl Default for SelectOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            options: Vec::new(),
            select_type: "default".to_string(),
            display_type: SelectDisplayType::Text,
            multi_delimiter: "\n".to_string(),
            unique_multi_value: false,
        }
    }
}

impl SelectOptions {
    /// Overlays option attributes defined in `raw`.
    ///
    /// When an `options` list is supplied it replaces the current list
    /// wholesale; there is no per-option merge by identity.
    pub fn apply(&mut self, raw: &Value) {
        if !raw.is_object() {
            return;
        }

        self.common.apply(raw);

        let a = Apply::new(raw);
        a.string(&mut self.select_type, "selectType");
        a.string(&mut self.multi_delimiter, "multiDelimiter");
        a.bool(&mut self.unique_multi_value, "isUniqueMultiValue");

        if let Some(display) = a.get("displayType") {
            self.display_type = SelectDisplayType::from_raw(display);
        }

        if let Some(list) = a.get("options").and_then(Value::as_array) {
            self.options = list.iter().filter_map(SelectOption::from_raw).collect();
        }
    }
}
