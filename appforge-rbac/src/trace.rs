use crate::{Access, Rule};

/// Why a check resolved without full rule evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Session holds a bypass role; everything is allowed.
    BypassMembership,
    /// Session mixes the anonymous role with other kinds; denied.
    FailedIntegrityCheck,
    /// Contextual roles cannot be resolved on a wildcard resource.
    UnknownContext,
}

/// Diagnostic record of a single access check.
///
/// Collects every rule that held an opinion during evaluation, plus the
/// final outcome; meant for permission debugging surfaces, not for hot
/// paths.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    pub resource: String,
    pub operation: String,
    /// Role IDs effective for the session on this resource.
    pub roles: Vec<u64>,
    /// Matching rules, most specific first.
    pub rules: Vec<Rule>,
    pub access: Access,
    pub resolution: Option<Resolution>,
}

impl Trace {
    #[must_use]
    pub fn new(resource: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            operation: operation.into(),
            ..Self::default()
        }
    }

    /// Records the final outcome.
    pub fn resolve(&mut self, access: Access, resolution: Option<Resolution>) {
        self.access = access;
        self.resolution = resolution;
    }

    /// Stable rule order for rendering: most specific first, role ID as
    /// the tie-breaker.
    pub fn sort_rules(&mut self) {
        self.rules.sort_by(|a, b| {
            b.specificity()
                .cmp(&a.specificity())
                .then(a.role_id.cmp(&b.role_id))
        });
    }
}
