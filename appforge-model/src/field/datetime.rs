use super::CommonOptions;
use appforge_types::cast::Apply;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Options of the DateTime field kind.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DateTimeOptions {
    #[serde(flatten)]
    pub common: CommonOptions,

    pub only_date: bool,
    pub only_time: bool,
    pub only_future_values: bool,
    pub only_past_values: bool,
}

impl DateTimeOptions {
    pub fn apply(&mut self, raw: &Value) {
        if !raw.is_object() {
            return;
        }

        self.common.apply(raw);

        let a = Apply::new(raw);
        a.bool(&mut self.only_date, "onlyDate");
        a.bool(&mut self.only_time, "onlyTime");
        a.bool(&mut self.only_future_values, "onlyFutureValues");
        a.bool(&mut self.only_past_values, "onlyPastValues");
    }
}
