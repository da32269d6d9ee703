use super::CommonOptions;
use appforge_types::cast::Apply;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options of the Text field kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextOptions {
    #[serde(flatten)]
    pub common: CommonOptions,

    /// Maximum accepted input length; 0 means unbounded.
    pub max_length: u16,
    pub multi_line: bool,
    pub use_rich_input: bool,
}

impl TextOptions {
    pub fn apply(&mut self, raw: &Value) {
        if !raw.is_object() {
            return;
        }

        self.common.apply(raw);

        let a = Apply::new(raw);
        a.u16(&mut self.max_length, "maxLength");
        a.bool(&mut self.multi_line, "multiLine");
        a.bool(&mut self.use_rich_input, "useRichInput");
    }
}
