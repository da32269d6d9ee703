use super::CommonOptions;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fallback options for field kinds without a registered shape.
///
/// Keeps the raw discriminant so the original kind is not lost when the
/// instance travels back out; only the shared option attributes are
/// interpreted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenericOptions {
    #[serde(skip)]
    pub kind: String,

    #[serde(flatten)]
    pub common: CommonOptions,
}

impl GenericOptions {
    /// Fresh defaults carrying the given raw discriminant.
    #[must_use]
    pub fn with_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            common: CommonOptions::default(),
        }
    }

    pub fn apply(&mut self, raw: &Value) {
        if !raw.is_object() {
            return;
        }

        self.common.apply(raw);
    }
}
