use super::CommonOptions;
use appforge_types::cast::Apply;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options of the Checkbox field kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckboxOptions {
    #[serde(flatten)]
    pub common: CommonOptions,

    /// Label rendered next to a checked value.
    pub true_label: String,
    /// Label rendered next to an unchecked value.
    pub false_label: String,
}

impl CheckboxOptions {
    pub fn apply(&mut self, raw: &Value) {
        if !raw.is_object() {
            return;
        }

        self.common.apply(raw);

        let a = Apply::new(raw);
        a.string(&mut self.true_label, "trueLabel");
        a.string(&mut self.false_label, "falseLabel");
    }
}
