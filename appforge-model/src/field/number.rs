use super::CommonOptions;
use appforge_types::cast::Apply;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options of the Number field kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NumberOptions {
    #[serde(flatten)]
    pub common: CommonOptions,

    /// Display precision in decimal places.
    pub precision: u16,
    /// Stored values are multiplied by this factor for display.
    pub multiplier: f64,
    pub prefix: String,
    pub suffix: String,
}

impl Default for NumberOptions {
    fn default() -> Self {
        Self {
            common: CommonOptions::default(),
            precision: 0,
            multiplier: 1.0,
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl NumberOptions {
    pub fn apply(&mut self, raw: &Value) {
        if !raw.is_object() {
            return;
        }

        self.common.apply(raw);

        let a = Apply::new(raw);
        a.u16(&mut self.precision, "precision");
        a.f64(&mut self.multiplier, "multiplier");
        a.string(&mut self.prefix, "prefix");
        a.string(&mut self.suffix, "suffix");
    }
}
