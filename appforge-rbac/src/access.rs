use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of an access-control evaluation.
///
/// `Inherit` is the neutral element: a rule with it holds no opinion and
/// a check resolving to it grants nothing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    #[default]
    Inherit,
    Allow,
    Deny,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Inherit => "inherit",
            Self::Allow => "allow",
            Self::Deny => "deny",
        })
    }
}
